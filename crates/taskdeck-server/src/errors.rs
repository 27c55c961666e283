//! Domain-error → HTTP response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use taskdeck_store::StoreError;
use thiserror::Error;
use tracing::error;

/// Errors surfaced to API clients as JSON `{"error": ...}` bodies.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or invalid session token.
    #[error("Unauthorized")]
    Unauthorized,
    /// Login with unknown email or wrong password.
    #[error("Invalid credentials")]
    InvalidCredentials,
    /// Authenticated, but not allowed to touch this resource.
    #[error("Forbidden")]
    Forbidden,
    /// Resource does not exist.
    #[error("{0}")]
    NotFound(String),
    /// Request body failed validation.
    #[error("{0}")]
    BadRequest(String),
    /// Anything the client cannot act on.
    #[error("Internal server error")]
    Internal(#[source] anyhow::Error),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Unauthorized | Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Self::Internal(ref source) = self {
            error!(error = %source, "request failed");
        }
        let body = Json(json!({ "error": self.to_string() }));
        (self.status(), body).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { entity, id: _ } => Self::NotFound(format!("{entity} not found")),
            StoreError::Forbidden { .. } => Self::Forbidden,
            StoreError::Validation(msg) => Self::BadRequest(msg),
            StoreError::EmailTaken(_) => Self::BadRequest("User already exists".to_string()),
            other @ (StoreError::Database(_) | StoreError::Pool(_)) => {
                Self::Internal(anyhow::Error::new(other))
            }
        }
    }
}
