//! GET /auth

use axum::extract::State;
use axum::response::Response;
use std::sync::Arc;

use crate::error::AppError;
use crate::instagram::oauth::build_authorization_url;
use crate::routes::found;

/// Start the OAuth flow: redirect the browser to Instagram's consent page.
pub async fn start_auth(State(state): State<Arc<crate::AppState>>) -> Result<Response, AppError> {
    let config = &state.config;
    let url = build_authorization_url(
        &config.ig_auth_url,
        &config.ig_app_id,
        &config.ig_redirect_uri,
        &config.ig_scope,
    )
    .map_err(|e| AppError::Internal(format!("invalid authorization endpoint: {e}")))?;

    Ok(found(url.as_str()))
}
