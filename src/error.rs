use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ui::paths::PathError;

/// Error response type
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Response type for health check endpoint
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

/// Response type for unhealthy status
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct UnhealthyResponse {
    pub status: String,
    pub error: String,
}

/// Custom error type for the GraphQL endpoints
///
/// Mapped to an HTTP status code and rendered as a JSON [`ErrorResponse`].
#[derive(Debug)]
pub enum ApiError {
    /// No schema has been registered yet
    SchemaNotInitialized,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ApiError::SchemaNotInitialized => (
                StatusCode::SERVICE_UNAVAILABLE,
                "GraphQL schema is not initialized".to_string(),
            ),
        };

        let body = Json(ErrorResponse {
            error: error_message,
        });

        (status, body).into_response()
    }
}

/// Errors raised while serving the GraphQL UI.
///
/// Both are reported as plain text with status 500. A missing asset is not
/// mapped to 404.
#[derive(Debug, Error)]
pub enum UiError {
    #[error(transparent)]
    Path(#[from] PathError),
    #[error("Resource not found: {0}")]
    AssetNotFound(String),
}

impl IntoResponse for UiError {
    fn into_response(self) -> Response {
        match &self {
            UiError::Path(err) => tracing::warn!("GraphQL UI not initialized: {}", err),
            UiError::AssetNotFound(resource) => {
                tracing::error!("GraphQL UI resource missing: {}", resource)
            }
        }

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            format!("{}\n", self),
        )
            .into_response()
    }
}
