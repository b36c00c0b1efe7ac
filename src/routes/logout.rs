//! GET /logout

use axum::response::Response;

use crate::audit::{self, Activity, Outcome};
use crate::routes::found;
use crate::session::middleware::SessionHandle;

/// Destroy the session and return to the entry page.
pub async fn logout(session: SessionHandle) -> Response {
    let username = session.tokens().await.and_then(|t| t.username);

    session.destroy().await;

    audit::record(
        Activity::Logoff,
        Outcome::Success,
        username.as_deref(),
        "User logged out",
    );

    found("/")
}
