//! `require_auth`: soft guard for protected routes.
//!
//! A request without a logged-in session is sent back to the entry page
//! with a 302 instead of an error status. The handler (and therefore the
//! upstream API) is never reached.

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;

use crate::routes::found;
use crate::session::middleware::SessionHandle;

/// Axum middleware that requires a session holding an access token.
pub async fn require_auth(session: SessionHandle, req: Request, next: Next) -> Response {
    if session.tokens().await.is_none() {
        tracing::debug!("Unauthenticated request to {}, redirecting", req.uri().path());
        return found("/");
    }
    next.run(req).await
}
