use axum::extract::{Path, State};
use axum::Json;
use contracts::domain::a001_menu::aggregate::{Menu, MenuDto, MenuPatch};
use contracts::domain::a004_product::aggregate::Product;
use contracts::domain::common::EntityId;
use contracts::shared::api::{ApiEnvelope, ItemStatusChange};
use contracts::shared::menu_tree::{MenuProduct, MenuTree};

use super::error::ApiResult;
use super::state::AppState;

/// POST /api/menu/create
pub async fn create(
    State(state): State<AppState>,
    Json(dto): Json<MenuDto>,
) -> ApiResult<Json<ApiEnvelope<Menu>>> {
    let menu = state.catalog.create_menu(dto).await?;
    Ok(Json(ApiEnvelope::new(menu)))
}

/// PUT /api/menu/update/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<MenuPatch>,
) -> ApiResult<Json<ApiEnvelope<Menu>>> {
    let menu = state.catalog.update_menu(&EntityId::new(id), patch).await?;
    Ok(Json(ApiEnvelope::new(menu)))
}

/// GET /api/menu/:id/items
pub async fn items(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiEnvelope<Vec<MenuProduct>>>> {
    let rows = state.catalog.menu_items(&EntityId::new(id)).await?;
    Ok(Json(ApiEnvelope::new(rows)))
}

/// PUT /api/menu/:id/items/status
///
/// Тело: `[{ "itemId": "...", "active": true }, ...]`
pub async fn set_items_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(changes): Json<Vec<ItemStatusChange>>,
) -> ApiResult<Json<ApiEnvelope<Vec<Product>>>> {
    let updated = state
        .catalog
        .set_menu_item_status(&EntityId::new(id), changes)
        .await?;
    Ok(Json(ApiEnvelope::new(updated)))
}

/// GET /api/menu/:id/tree
pub async fn tree(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiEnvelope<MenuTree>>> {
    let tree = state.catalog.menu_tree(&EntityId::new(id)).await?;
    Ok(Json(ApiEnvelope::new(tree)))
}
