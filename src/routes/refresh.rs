//! GET /refresh-token

use axum::Json;
use axum::extract::State;
use std::sync::Arc;

use crate::audit::{self, Activity, Outcome};
use crate::error::AppError;
use crate::instagram::client;
use crate::session::middleware::SessionHandle;

/// Refresh the long-lived token and pass the provider's JSON through.
///
/// The session token is replaced only when the provider returned a new one;
/// an upstream error object is passed through with the old token kept.
pub async fn refresh_token(
    State(state): State<Arc<crate::AppState>>,
    session: SessionHandle,
) -> Result<Json<serde_json::Value>, AppError> {
    let mut tokens = session
        .tokens()
        .await
        .ok_or_else(|| AppError::Internal("refresh route reached without a session".into()))?;

    let refreshed = client::refresh_token(&state.http_client, &state.config, &tokens.access_token)
        .await
        .map_err(|e| {
            audit::record(
                Activity::TokenRefresh,
                Outcome::Failure,
                tokens.username.as_deref(),
                &format!("Token refresh failed: {e}"),
            );
            AppError::RefreshFailed(e)
        })?;

    match refreshed.access_token() {
        Some(new_token) => {
            tokens.access_token = new_token.to_string();
            audit::record(
                Activity::TokenRefresh,
                Outcome::Success,
                tokens.username.as_deref(),
                "Token refresh succeeded",
            );
            session.set_tokens(tokens).await;
        }
        None => audit::record(
            Activity::TokenRefresh,
            Outcome::Failure,
            tokens.username.as_deref(),
            "Token refresh returned no access token",
        ),
    }

    Ok(Json(refreshed.raw))
}
