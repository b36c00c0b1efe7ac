//! HTTP route handlers.

pub mod auth;
pub mod callback;
pub mod health;
pub mod index;
pub mod logout;
pub mod media;
pub mod refresh;

use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};

/// 302 Found to `location`.
///
/// axum's `Redirect` only offers 303/307/308; browsers and the OAuth flow
/// here expect a plain 302.
pub fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}
