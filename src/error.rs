//! Application error types with Axum response mapping.
//!
//! Page routes answer with short plain-text bodies; the refresh route is a
//! JSON endpoint and answers with JSON. Upstream detail is logged by the
//! handlers and never echoed to the browser.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::instagram::ProviderError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Missing code")]
    MissingAuthorizationCode,

    #[error("Token exchange failed: {0}")]
    TokenExchangeFailed(ProviderError),

    #[error("Profile fetch failed: {0}")]
    ProfileFetchFailed(ProviderError),

    #[error("Media fetch failed: {0}")]
    MediaFetchFailed(ProviderError),

    #[error("Refresh failed: {0}")]
    RefreshFailed(ProviderError),

    #[error("Template rendering failed: {0}")]
    Render(#[from] askama::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Status and public body. Never includes upstream detail.
    fn public_parts(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::MissingAuthorizationCode => (StatusCode::BAD_REQUEST, "Missing code"),
            AppError::TokenExchangeFailed(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to exchange code for token",
            ),
            AppError::ProfileFetchFailed(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "OAuth callback failed")
            }
            AppError::MediaFetchFailed(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch media")
            }
            AppError::RefreshFailed(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Failed to refresh"),
            AppError::Render(_) | AppError::Internal(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.public_parts().0.is_server_error() {
            tracing::error!("{}", self);
        }

        let (status, message) = self.public_parts();
        match self {
            AppError::RefreshFailed(_) => {
                (status, axum::Json(json!({"error": message}))).into_response()
            }
            _ => (status, message).into_response(),
        }
    }
}
