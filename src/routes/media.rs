//! GET /media

use askama::Template;
use axum::extract::State;
use axum::response::Html;
use std::sync::Arc;

use crate::error::AppError;
use crate::instagram::client;
use crate::session::middleware::SessionHandle;
use crate::types::MediaItem;

#[derive(Template)]
#[template(path = "media.html")]
pub struct MediaTemplate {
    pub media: Vec<MediaItem>,
    pub username: Option<String>,
}

/// List the user's own media (first page). Behind `require_auth`.
pub async fn list_media(
    State(state): State<Arc<crate::AppState>>,
    session: SessionHandle,
) -> Result<Html<String>, AppError> {
    let tokens = session
        .tokens()
        .await
        .ok_or_else(|| AppError::Internal("media route reached without a session".into()))?;

    let media = client::fetch_media(&state.http_client, &state.config, &tokens.access_token)
        .await
        .map_err(AppError::MediaFetchFailed)?;

    tracing::debug!(count = media.len(), "Fetched media");

    let template = MediaTemplate {
        media,
        username: tokens.username,
    };
    Ok(Html(template.render()?))
}
