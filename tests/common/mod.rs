//! Test utilities: app builder wired to a wiremock provider, session seeding.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::Request;
use ig_media_viewer::config::Config;
use ig_media_viewer::session::SessionStore;
use ig_media_viewer::types::SessionTokens;
use ig_media_viewer::{AppState, create_app};
use std::sync::Arc;
use wiremock::MockServer;

/// Build a test app whose Instagram endpoints all point at `server`.
pub fn build_test_app(server: &MockServer) -> (axum::Router, Arc<AppState>) {
    build_test_app_with_config(Config::test_default().with_provider_base(&server.uri()))
}

pub fn build_test_app_with_config(config: Config) -> (axum::Router, Arc<AppState>) {
    let state = Arc::new(AppState::new(config, reqwest::Client::new()));
    let app = create_app(state.clone());
    (app, state)
}

/// Tokens for a logged-in test user.
pub fn alice_tokens(access_token: &str) -> SessionTokens {
    SessionTokens {
        access_token: access_token.into(),
        user_id: Some("U1".into()),
        username: Some("alice".into()),
    }
}

/// Store tokens directly in the session store.
pub async fn seed_session(state: &AppState, session_id: &str, tokens: &SessionTokens) {
    state.sessions.store.save(session_id, tokens).await;
}

/// The logged-in record currently stored for `session_id`.
pub async fn stored_tokens(state: &AppState, session_id: &str) -> Option<SessionTokens> {
    let tokens = state.sessions.store.load(session_id).await?;
    tokens.is_logged_in().then_some(tokens)
}

/// Cookie header value carrying a signed session id.
pub fn session_cookie(state: &AppState, session_id: &str) -> String {
    format!("ig_session={}", state.sessions.signer.sign(session_id))
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn get_with_session(state: &AppState, uri: &str, session_id: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header("Cookie", session_cookie(state, session_id))
        .body(Body::empty())
        .unwrap()
}

/// Session id from the response's `Set-Cookie`, verified with the app's signer.
pub fn session_id_from_response(state: &AppState, resp: &axum::response::Response) -> Option<String> {
    resp.headers()
        .get_all("set-cookie")
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter_map(|s| s.split(';').next())
        .filter_map(|c| c.strip_prefix("ig_session="))
        .find(|v| !v.is_empty())
        .and_then(|v| state.sessions.signer.verify(v))
}

pub async fn body_string(resp: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub fn location(resp: &axum::response::Response) -> &str {
    resp.headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
}
