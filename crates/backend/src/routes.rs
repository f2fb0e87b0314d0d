use axum::http::{header, Method};
use axum::{
    middleware,
    routing::{get, post, put, MethodRouter},
    Router,
};
use contracts::domain::a001_menu::aggregate::Menu;
use contracts::domain::a002_category::aggregate::Category;
use contracts::domain::a003_sub_category::aggregate::SubCategory;
use contracts::domain::a004_product::aggregate::Product;
use contracts::domain::a005_offer::aggregate::Offer;
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};

use crate::catalog::Stored;
use crate::handlers::{self, catalog, state::AppState};
use crate::system::middleware::request_logger::request_logger;

/// Стандартный набор маршрутов одного вида записей: `/api/{kind}/...`
fn catalog_routes<T: Stored + Serialize>(
    create: MethodRouter<AppState>,
    update: MethodRouter<AppState>,
) -> Router<AppState> {
    let base = format!("/api/{}", T::kind().api_segment());
    Router::new()
        .route(&base, get(catalog::list::<T>))
        .route(&format!("{}/create", base), create)
        .route(&format!("{}/reorder", base), post(catalog::reorder::<T>))
        .route(&format!("{}/update/:id", base), update)
        .route(&format!("{}/delete/:id", base), axum::routing::delete(catalog::delete::<T>))
        .route(
            &format!("{}/toggle-status/:id", base),
            post(catalog::toggle_status::<T>),
        )
        .route(&format!("{}/:id", base), get(catalog::get_by_id::<T>))
}

/// Конфигурация всех роутов приложения
pub fn configure_routes(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    Router::new()
        .route("/health", get(|| async { "ok" }))
        // A001 Menu
        .merge(catalog_routes::<Menu>(
            post(handlers::a001_menu::create),
            put(handlers::a001_menu::update),
        ))
        .route("/api/menu/:id/items", get(handlers::a001_menu::items))
        .route(
            "/api/menu/:id/items/status",
            put(handlers::a001_menu::set_items_status),
        )
        .route("/api/menu/:id/tree", get(handlers::a001_menu::tree))
        // A002 Category
        .merge(catalog_routes::<Category>(
            post(handlers::a002_category::create),
            put(handlers::a002_category::update),
        ))
        // A003 SubCategory
        .merge(catalog_routes::<SubCategory>(
            post(handlers::a003_sub_category::create),
            put(handlers::a003_sub_category::update),
        ))
        // A004 Product (items)
        .merge(catalog_routes::<Product>(
            post(handlers::a004_product::create),
            put(handlers::a004_product::update),
        ))
        // A005 Offer
        .merge(catalog_routes::<Offer>(
            post(handlers::a005_offer::create),
            put(handlers::a005_offer::update),
        ))
        .route("/api/catalog/testdata", post(catalog::insert_test_data))
        .layer(middleware::from_fn(request_logger))
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::catalog::store::fixtures::catalog;
    use crate::catalog::{CatalogService, DeletePolicy, MemoryCatalogRepository};

    fn app() -> Router {
        let store = catalog();
        let repository = Arc::new(MemoryCatalogRepository::with_store(store.clone()));
        let service = CatalogService::new(store, repository, DeletePolicy::Restrict);
        configure_routes(AppState::new(service))
    }

    async fn send(app: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn health_is_ok() {
        let (status, _) = send(app(), "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn list_applies_hierarchy_filter() {
        let (status, body) = send(app(), "GET", "/api/subcategory?menuId=m1&categoryId=c1", None).await;
        assert_eq!(status, StatusCode::OK);
        let ids: Vec<&str> = body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, vec!["s1", "s2"]);

        // empty parameters mean "no filter"
        let (_, body) = send(app(), "GET", "/api/item?menuId=", None).await;
        assert_eq!(body["data"].as_array().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn create_returns_enveloped_record() {
        let (status, body) = send(
            app(),
            "POST",
            "/api/item/create",
            Some(json!({ "subCategoryId": "s3", "name": "Latte", "price": 80, "status": "inactive" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["menuId"], "m1");
        assert_eq!(body["data"]["categoryId"], "c2");
        assert_eq!(body["data"]["status"], false);
        assert_eq!(body["data"]["displayOrder"], 2);
    }

    #[tokio::test]
    async fn invalid_create_is_bad_request() {
        let (status, body) = send(
            app(),
            "POST",
            "/api/category/create",
            Some(json!({ "name": "Desserts" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "ValidationError");
    }

    #[tokio::test]
    async fn partial_update_keeps_other_fields() {
        let (status, body) = send(
            app(),
            "PUT",
            "/api/category/update/c2",
            Some(json!({ "name": "Renamed" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["name"], "Renamed");
        assert_eq!(body["data"]["menuId"], "m1");
    }

    #[tokio::test]
    async fn missing_record_is_not_found() {
        let (status, body) = send(app(), "GET", "/api/offer/o404", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "NotFound");
    }

    #[tokio::test]
    async fn delete_with_children_is_conflict() {
        let (status, body) = send(app(), "DELETE", "/api/category/delete/c1", None).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "HasChildren");

        let (status, body) = send(app(), "DELETE", "/api/category/delete/c3", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["id"], "c3");
    }

    #[tokio::test]
    async fn toggle_status_flips_flag() {
        let (status, body) = send(app(), "POST", "/api/menu/toggle-status/m2", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["status"], false);
    }

    #[tokio::test]
    async fn reorder_with_filter_and_bad_index() {
        let (status, body) = send(
            app(),
            "POST",
            "/api/item/reorder",
            Some(json!({ "oldIndex": 1, "newIndex": 0, "subCategoryId": "s1" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"][0]["id"], "p2");
        assert_eq!(body["data"][0]["displayOrder"], 1);

        let (status, body) = send(
            app(),
            "POST",
            "/api/menu/reorder",
            Some(json!({ "oldIndex": -1, "newIndex": 0 })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "InvalidIndex");
    }

    #[tokio::test]
    async fn menu_items_and_tree() {
        let (status, body) = send(app(), "GET", "/api/menu/m1/items", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"].as_array().unwrap().len(), 4);

        let (status, body) = send(app(), "GET", "/api/menu/m1/tree", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["categories"].as_array().unwrap().len(), 2);

        let (status, body) = send(
            app(),
            "PUT",
            "/api/menu/m1/items/status",
            Some(json!([{ "itemId": "p3", "active": 0 }])),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"][0]["status"], false);
    }
}
