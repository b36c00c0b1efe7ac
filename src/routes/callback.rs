//! GET /callback

use axum::extract::{Query, State};
use axum::response::Response;
use serde::Deserialize;
use std::sync::Arc;

use crate::audit::{self, Activity, Outcome};
use crate::error::AppError;
use crate::instagram::{client, oauth};
use crate::routes::found;
use crate::session::middleware::SessionHandle;
use crate::types::SessionTokens;

/// Query parameters from Instagram's OAuth redirect.
#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub error: Option<String>,
    pub error_reason: Option<String>,
    pub error_description: Option<String>,
}

/// OAuth callback: exchange the code, fetch the profile, store both in the
/// session and continue to the media listing.
///
/// The session is written only after both upstream calls succeed, so any
/// failure leaves the browser anonymous.
pub async fn oauth_callback(
    State(state): State<Arc<crate::AppState>>,
    session: SessionHandle,
    Query(params): Query<CallbackParams>,
) -> Result<Response, AppError> {
    let code = match params.code.as_deref() {
        Some(c) if !c.is_empty() => c,
        _ => {
            if let Some(error) = &params.error {
                tracing::warn!(
                    error = %error,
                    reason = params.error_reason.as_deref().unwrap_or(""),
                    description = params.error_description.as_deref().unwrap_or(""),
                    "Authorization denied by provider"
                );
            }
            return Err(AppError::MissingAuthorizationCode);
        }
    };

    let token = oauth::exchange_code_for_token(&state.http_client, &state.config, code)
        .await
        .map_err(|e| {
            audit::record(
                Activity::TokenExchange,
                Outcome::Failure,
                None,
                &format!("OAuth token exchange failed: {e}"),
            );
            AppError::TokenExchangeFailed(e)
        })?;

    let profile = client::fetch_profile(&state.http_client, &state.config, &token.access_token)
        .await
        .map_err(|e| {
            audit::record(
                Activity::TokenExchange,
                Outcome::Failure,
                None,
                &format!("Profile fetch after token exchange failed: {e}"),
            );
            AppError::ProfileFetchFailed(e)
        })?;

    let tokens = SessionTokens {
        access_token: token.access_token,
        user_id: Some(token.user_id),
        username: Some(profile.username),
    };
    audit::record(
        Activity::TokenExchange,
        Outcome::Success,
        tokens.username.as_deref(),
        "OAuth token exchange succeeded",
    );
    session.set_tokens(tokens).await;

    Ok(found("/media"))
}
