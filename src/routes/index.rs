//! GET /

use askama::Template;
use axum::response::Html;

use crate::error::AppError;
use crate::session::middleware::SessionHandle;

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub logged_in: bool,
    pub username: Option<String>,
}

/// Entry page reflecting the session's login state.
pub async fn index(session: SessionHandle) -> Result<Html<String>, AppError> {
    let tokens = session.tokens().await;
    let template = IndexTemplate {
        logged_in: tokens.is_some(),
        username: tokens.and_then(|t| t.username),
    };
    Ok(Html(template.render()?))
}
