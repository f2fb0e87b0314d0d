use axum::extract::{Path, State};
use axum::Json;
use contracts::domain::a005_offer::aggregate::{Offer, OfferDto, OfferPatch};
use contracts::domain::common::EntityId;
use contracts::shared::api::ApiEnvelope;

use super::error::ApiResult;
use super::state::AppState;

/// POST /api/offer/create
pub async fn create(
    State(state): State<AppState>,
    Json(dto): Json<OfferDto>,
) -> ApiResult<Json<ApiEnvelope<Offer>>> {
    let created = state.catalog.create_offer(dto).await?;
    Ok(Json(ApiEnvelope::new(created)))
}

/// PUT /api/offer/update/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<OfferPatch>,
) -> ApiResult<Json<ApiEnvelope<Offer>>> {
    let updated = state.catalog.update_offer(&EntityId::new(id), patch).await?;
    Ok(Json(ApiEnvelope::new(updated)))
}
