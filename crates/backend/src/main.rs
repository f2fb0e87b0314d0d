use std::sync::Arc;

use menu_admin_backend::catalog::{CatalogRepository, CatalogService, MemoryCatalogRepository};
use menu_admin_backend::domain::sqlite_repository::SqliteCatalogRepository;
use menu_admin_backend::handlers::state::AppState;
use menu_admin_backend::shared::config::{get_database_path, load_config};
use menu_admin_backend::shared::data::db;
use menu_admin_backend::{routes, system};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    system::tracing::initialize()?;

    let config = load_config()?;

    // --memory: каталог без БД, теряется при остановке
    let repository: Arc<dyn CatalogRepository> = if std::env::args().any(|a| a == "--memory") {
        tracing::warn!("Running with in-memory catalog, changes will not be persisted");
        Arc::new(MemoryCatalogRepository::new())
    } else {
        let db_path = get_database_path(&config)?;
        let conn = db::initialize_database(&db_path)
            .await
            .map_err(|e| anyhow::anyhow!("db init failed: {e}"))?;
        Arc::new(SqliteCatalogRepository::new(conn))
    };
    let catalog = CatalogService::load(repository, config.catalog.delete_policy).await?;
    tracing::info!("Delete policy: {:?}", catalog.delete_policy());

    if config.catalog.seed_test_data {
        catalog.insert_test_data().await?;
    }

    let app = routes::configure_routes(AppState::new(catalog));

    let addr = format!("{}:{}", config.server.host, config.server.port);
    tracing::info!("Attempting to bind server to http://{}", addr);
    let listener = match TcpListener::bind(&addr).await {
        Ok(listener) => {
            tracing::info!("Server successfully bound to {}", addr);
            listener
        }
        Err(e) => {
            if e.kind() == std::io::ErrorKind::AddrInUse {
                tracing::error!("Error: {} is already in use", addr);
            } else {
                tracing::error!("Failed to bind to {}. Error: {}", addr, e);
            }
            return Err(e.into());
        }
    };

    axum::serve(listener, app).await?;

    Ok(())
}
