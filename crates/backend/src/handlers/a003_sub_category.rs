use axum::extract::{Path, State};
use axum::Json;
use contracts::domain::a003_sub_category::aggregate::{SubCategory, SubCategoryDto, SubCategoryPatch};
use contracts::domain::common::EntityId;
use contracts::shared::api::ApiEnvelope;

use super::error::ApiResult;
use super::state::AppState;

/// POST /api/subcategory/create
pub async fn create(
    State(state): State<AppState>,
    Json(dto): Json<SubCategoryDto>,
) -> ApiResult<Json<ApiEnvelope<SubCategory>>> {
    let created = state.catalog.create_sub_category(dto).await?;
    Ok(Json(ApiEnvelope::new(created)))
}

/// PUT /api/subcategory/update/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<SubCategoryPatch>,
) -> ApiResult<Json<ApiEnvelope<SubCategory>>> {
    let updated = state.catalog.update_sub_category(&EntityId::new(id), patch).await?;
    Ok(Json(ApiEnvelope::new(updated)))
}
