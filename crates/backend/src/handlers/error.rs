use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use contracts::shared::api::ErrorResponse;
use thiserror::Error;

use crate::catalog::CatalogError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid index: {0}")]
    InvalidIndex(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Persistence error: {0}")]
    Persistence(String),
}

impl From<CatalogError> for ApiError {
    fn from(e: CatalogError) -> Self {
        match e {
            CatalogError::Validation(msg) => ApiError::Validation(msg),
            e @ CatalogError::NotFound { .. } => ApiError::NotFound(e.to_string()),
            e @ CatalogError::InvalidIndex { .. } => ApiError::InvalidIndex(e.to_string()),
            e @ CatalogError::HasChildren { .. } => ApiError::Conflict(e.to_string()),
            CatalogError::Persistence(msg) => ApiError::Persistence(msg),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match self {
            ApiError::Validation(msg) => {
                tracing::warn!("Validation error: {}", msg);
                (StatusCode::BAD_REQUEST, "ValidationError", msg)
            }
            ApiError::NotFound(msg) => {
                tracing::warn!("Not found: {}", msg);
                (StatusCode::NOT_FOUND, "NotFound", msg)
            }
            ApiError::InvalidIndex(msg) => {
                tracing::warn!("Invalid index: {}", msg);
                (StatusCode::BAD_REQUEST, "InvalidIndex", msg)
            }
            ApiError::Conflict(msg) => {
                tracing::warn!("Conflict: {}", msg);
                (StatusCode::CONFLICT, "HasChildren", msg)
            }
            ApiError::Persistence(msg) => {
                tracing::error!("Persistence error: {}", msg);
                (StatusCode::BAD_GATEWAY, "PersistenceError", msg)
            }
        };

        let body = Json(ErrorResponse {
            error: error_type.to_string(),
            message,
        });

        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::common::{EntityId, EntityKind};

    fn status_of(e: CatalogError) -> StatusCode {
        ApiError::from(e).into_response().status()
    }

    #[test]
    fn catalog_errors_map_to_http_statuses() {
        let id = EntityId::new("m1");
        assert_eq!(status_of(CatalogError::Validation("x".into())), StatusCode::BAD_REQUEST);
        assert_eq!(
            status_of(CatalogError::not_found(EntityKind::Menu, &id)),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(CatalogError::InvalidIndex { index: -1, len: 0 }),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(CatalogError::HasChildren {
                kind: EntityKind::Menu,
                id,
                children: 2
            }),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(CatalogError::Persistence("disk".into())),
            StatusCode::BAD_GATEWAY
        );
    }
}
