//! Обработчики, общие для всех видов записей каталога
//!
//! Параметризованы типом агрегата: маршрут `/api/category` использует
//! `list::<Category>`, `/api/item` использует `list::<Product>` и т.д.

use axum::extract::{Path, Query, State};
use axum::Json;
use contracts::domain::common::EntityId;
use contracts::shared::api::{ApiEnvelope, DeletedResponse, ReorderRequest};
use contracts::shared::hierarchy::HierarchySelection;
use serde::{Deserialize, Serialize};

use super::error::ApiResult;
use super::state::AppState;
use crate::catalog::Stored;

/// Параметры фильтра списка: `?menuId=..&categoryId=..&subCategoryId=..`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub menu_id: Option<String>,
    pub category_id: Option<String>,
    pub sub_category_id: Option<String>,
}

impl ListQuery {
    pub fn selection(&self) -> HierarchySelection {
        HierarchySelection::from_query(
            self.menu_id.as_deref(),
            self.category_id.as_deref(),
            self.sub_category_id.as_deref(),
        )
    }
}

/// GET /api/{kind}
pub async fn list<T: Stored + Serialize>(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Json<ApiEnvelope<Vec<T>>> {
    let items = state.catalog.list::<T>(&query.selection()).await;
    Json(ApiEnvelope::new(items))
}

/// GET /api/{kind}/:id
pub async fn get_by_id<T: Stored + Serialize>(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiEnvelope<T>>> {
    let item = state.catalog.get::<T>(&EntityId::new(id)).await?;
    Ok(Json(ApiEnvelope::new(item)))
}

/// DELETE /api/{kind}/delete/:id
pub async fn delete<T: Stored>(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiEnvelope<DeletedResponse>>> {
    let deleted = state.catalog.delete::<T>(&EntityId::new(id)).await?;
    Ok(Json(ApiEnvelope::new(deleted)))
}

/// POST /api/{kind}/toggle-status/:id
pub async fn toggle_status<T: Stored + Serialize>(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiEnvelope<T>>> {
    let item = state.catalog.toggle_status::<T>(&EntityId::new(id)).await?;
    Ok(Json(ApiEnvelope::new(item)))
}

/// POST /api/{kind}/reorder
pub async fn reorder<T: Stored + Serialize>(
    State(state): State<AppState>,
    Json(request): Json<ReorderRequest>,
) -> ApiResult<Json<ApiEnvelope<Vec<T>>>> {
    let visible = state.catalog.reorder::<T>(&request).await?;
    Ok(Json(ApiEnvelope::new(visible)))
}

#[derive(Debug, Serialize)]
pub struct TestDataResult {
    pub created: usize,
}

/// POST /api/catalog/testdata
pub async fn insert_test_data(
    State(state): State<AppState>,
) -> ApiResult<Json<ApiEnvelope<TestDataResult>>> {
    let created = state.catalog.insert_test_data().await?;
    Ok(Json(ApiEnvelope::new(TestDataResult { created })))
}
