use axum::extract::{Path, State};
use axum::Json;
use contracts::domain::a002_category::aggregate::{Category, CategoryDto, CategoryPatch};
use contracts::domain::common::EntityId;
use contracts::shared::api::ApiEnvelope;

use super::error::ApiResult;
use super::state::AppState;

/// POST /api/category/create
pub async fn create(
    State(state): State<AppState>,
    Json(dto): Json<CategoryDto>,
) -> ApiResult<Json<ApiEnvelope<Category>>> {
    let created = state.catalog.create_category(dto).await?;
    Ok(Json(ApiEnvelope::new(created)))
}

/// PUT /api/category/update/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<CategoryPatch>,
) -> ApiResult<Json<ApiEnvelope<Category>>> {
    let updated = state.catalog.update_category(&EntityId::new(id), patch).await?;
    Ok(Json(ApiEnvelope::new(updated)))
}
