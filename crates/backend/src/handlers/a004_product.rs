use axum::extract::{Path, State};
use axum::Json;
use contracts::domain::a004_product::aggregate::{Product, ProductDto, ProductPatch};
use contracts::domain::common::EntityId;
use contracts::shared::api::ApiEnvelope;

use super::error::ApiResult;
use super::state::AppState;

/// POST /api/item/create
pub async fn create(
    State(state): State<AppState>,
    Json(dto): Json<ProductDto>,
) -> ApiResult<Json<ApiEnvelope<Product>>> {
    let created = state.catalog.create_product(dto).await?;
    Ok(Json(ApiEnvelope::new(created)))
}

/// PUT /api/item/update/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<ProductPatch>,
) -> ApiResult<Json<ApiEnvelope<Product>>> {
    let updated = state.catalog.update_product(&EntityId::new(id), patch).await?;
    Ok(Json(ApiEnvelope::new(updated)))
}
