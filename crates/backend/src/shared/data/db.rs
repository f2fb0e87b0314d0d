use std::path::Path;

use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement,
};

/// Таблицы каталога: (имя, DDL)
const TABLES: &[(&str, &str)] = &[
    (
        "a001_menu",
        r#"
        CREATE TABLE a001_menu (
            id TEXT PRIMARY KEY NOT NULL,
            name TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            status INTEGER NOT NULL DEFAULT 1,
            display_order INTEGER NOT NULL DEFAULT 0,
            tag_line TEXT,
            created_at TEXT,
            updated_at TEXT
        );
        "#,
    ),
    (
        "a002_category",
        r#"
        CREATE TABLE a002_category (
            id TEXT PRIMARY KEY NOT NULL,
            menu_id TEXT NOT NULL,
            name TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            status INTEGER NOT NULL DEFAULT 1,
            display_order INTEGER NOT NULL DEFAULT 0,
            image TEXT,
            created_at TEXT,
            updated_at TEXT
        );
        "#,
    ),
    (
        "a003_sub_category",
        r#"
        CREATE TABLE a003_sub_category (
            id TEXT PRIMARY KEY NOT NULL,
            category_id TEXT NOT NULL,
            name TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            status INTEGER NOT NULL DEFAULT 1,
            display_order INTEGER NOT NULL DEFAULT 0,
            image TEXT,
            created_at TEXT,
            updated_at TEXT
        );
        "#,
    ),
    (
        "a004_product",
        r#"
        CREATE TABLE a004_product (
            id TEXT PRIMARY KEY NOT NULL,
            sub_category_id TEXT NOT NULL,
            category_id TEXT NOT NULL,
            menu_id TEXT NOT NULL,
            name TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            price REAL NOT NULL DEFAULT 0,
            status INTEGER NOT NULL DEFAULT 1,
            display_order INTEGER NOT NULL DEFAULT 0,
            tags_json TEXT NOT NULL DEFAULT '[]',
            ingredients_json TEXT NOT NULL DEFAULT '[]',
            images_json TEXT NOT NULL DEFAULT '[]',
            allergies TEXT,
            tag_line TEXT,
            created_at TEXT,
            updated_at TEXT
        );
        "#,
    ),
    (
        "a005_offer",
        r#"
        CREATE TABLE a005_offer (
            id TEXT PRIMARY KEY NOT NULL,
            menu_id TEXT NOT NULL,
            name TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            status INTEGER NOT NULL DEFAULT 1,
            display_order INTEGER NOT NULL DEFAULT 0,
            start_date TEXT,
            end_date TEXT,
            discount_percentage REAL NOT NULL DEFAULT 0,
            foods_json TEXT NOT NULL DEFAULT '[]',
            drinks_json TEXT NOT NULL DEFAULT '[]',
            images_json TEXT NOT NULL DEFAULT '[]',
            created_at TEXT,
            updated_at TEXT
        );
        "#,
    ),
];

/// Открыть файл БД SQLite (создаётся при отсутствии) и подготовить схему
pub async fn initialize_database(db_file: &Path) -> anyhow::Result<DatabaseConnection> {
    if let Some(parent) = db_file.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let absolute_path = if db_file.is_absolute() {
        db_file.to_path_buf()
    } else {
        std::env::current_dir()?.join(db_file)
    };
    // Normalize path separators and ensure proper URL form on Windows
    let normalized = absolute_path.to_string_lossy().replace('\\', "/");
    let needs_leading_slash = !normalized.starts_with('/') && normalized.contains(':');
    let prefix = if needs_leading_slash { "/" } else { "" };
    let db_url = format!("sqlite://{}{}?mode=rwc", prefix, normalized);

    tracing::info!("Connecting to database: {}", db_url);
    connect(&db_url).await
}

/// Подключиться по URL и создать недостающие таблицы
///
/// Одно соединение: запись идёт только под блокировкой `CatalogService`.
pub async fn connect(db_url: &str) -> anyhow::Result<DatabaseConnection> {
    let mut options = ConnectOptions::new(db_url.to_owned());
    options.max_connections(1).sqlx_logging(false);
    let conn = Database::connect(options).await?;
    bootstrap_schema(&conn).await?;
    Ok(conn)
}

async fn bootstrap_schema(conn: &DatabaseConnection) -> anyhow::Result<()> {
    for (table, ddl) in TABLES {
        let check_table = format!(
            "SELECT name FROM sqlite_master WHERE type='table' AND name='{}';",
            table
        );
        let existing = conn
            .query_all(Statement::from_string(DatabaseBackend::Sqlite, check_table))
            .await?;

        if existing.is_empty() {
            tracing::info!("Creating {} table", table);
            conn.execute(Statement::from_string(
                DatabaseBackend::Sqlite,
                ddl.to_string(),
            ))
            .await?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn schema_bootstrap_is_idempotent() {
        let conn = connect("sqlite::memory:").await.unwrap();
        bootstrap_schema(&conn).await.unwrap();

        let tables = conn
            .query_all(Statement::from_string(
                DatabaseBackend::Sqlite,
                "SELECT name FROM sqlite_master WHERE type='table' AND name LIKE 'a00%';".to_string(),
            ))
            .await
            .unwrap();
        assert_eq!(tables.len(), TABLES.len());
    }
}
