//! Per-request session handling.
//!
//! [`session_middleware`] resolves the signed cookie to a stored record,
//! hands handlers a [`SessionHandle`], and afterwards writes back whatever
//! the handler changed. A missing, tampered or expired cookie just yields
//! an anonymous session.

use axum::extract::{FromRequestParts, Request};
use axum::http::request::Parts;
use axum::http::{HeaderMap, HeaderValue, header};
use axum::middleware::Next;
use axum::response::Response;
use base64::Engine;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::SessionStore;
use super::cookie::CookieSigner;
use super::memory::DEFAULT_MAX_AGE;
use crate::error::AppError;
use crate::types::SessionTokens;

pub const COOKIE_NAME: &str = "ig_session";

#[derive(Debug, Clone, PartialEq)]
enum SessionState {
    Anonymous,
    Active(SessionTokens),
    Destroyed,
}

/// The current request's session, shared with the middleware.
#[derive(Clone)]
pub struct SessionHandle {
    state: Arc<Mutex<SessionState>>,
}

impl<S> FromRequestParts<S> for SessionHandle
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<SessionHandle>()
            .cloned()
            .ok_or_else(|| AppError::Internal("session middleware not installed".into()))
    }
}

impl SessionHandle {
    fn with_state(state: SessionState) -> Self {
        Self {
            state: Arc::new(Mutex::new(state)),
        }
    }

    /// Tokens of a logged-in session, `None` when anonymous.
    pub async fn tokens(&self) -> Option<SessionTokens> {
        match &*self.state.lock().await {
            SessionState::Active(tokens) if tokens.is_logged_in() => Some(tokens.clone()),
            _ => None,
        }
    }

    pub async fn set_tokens(&self, tokens: SessionTokens) {
        *self.state.lock().await = SessionState::Active(tokens);
    }

    /// Forget the session: the record is deleted and the cookie expired
    /// once the handler returns.
    pub async fn destroy(&self) {
        *self.state.lock().await = SessionState::Destroyed;
    }

    async fn snapshot(&self) -> SessionState {
        self.state.lock().await.clone()
    }
}

/// Session store plus the cookie settings used to address it.
pub struct SessionManager<S: SessionStore> {
    pub store: S,
    pub signer: CookieSigner,
    pub https_only: bool,
}

impl<S: SessionStore> SessionManager<S> {
    pub fn new(store: S, secret: &str, https_only: bool) -> Self {
        Self {
            store,
            signer: CookieSigner::new(secret),
            https_only,
        }
    }

    /// Verified session id from the request's `Cookie` headers.
    fn session_id(&self, headers: &HeaderMap) -> Option<String> {
        headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .find_map(|h| parse_cookie(h, COOKIE_NAME))
            .and_then(|value| self.signer.verify(value))
    }

    fn issue_cookie(&self, session_id: &str) -> String {
        let value = self.signer.sign(session_id);
        self.cookie(&value, DEFAULT_MAX_AGE.as_secs())
    }

    fn expire_cookie(&self) -> String {
        self.cookie("", 0)
    }

    fn cookie(&self, value: &str, max_age: u64) -> String {
        let secure = if self.https_only { "; Secure" } else { "" };
        format!("{COOKIE_NAME}={value}; Max-Age={max_age}; Path=/; HttpOnly; SameSite=Lax{secure}")
    }
}

/// Resolve the session, run the handler, then persist the outcome.
///
/// Nothing is stored and no cookie is sent unless the handler changed the
/// session, so anonymous page views leave the store untouched.
pub async fn session_middleware<S: SessionStore + 'static>(
    manager: Arc<SessionManager<S>>,
    mut req: Request,
    next: Next,
) -> Response {
    let existing = match manager.session_id(req.headers()) {
        Some(id) => manager.store.load(&id).await.map(|tokens| (id, tokens)),
        None => None,
    };
    let (session_id, initial) = match existing {
        Some((id, tokens)) => (id, SessionState::Active(tokens)),
        None => (generate_session_id(), SessionState::Anonymous),
    };

    let handle = SessionHandle::with_state(initial.clone());
    req.extensions_mut().insert(handle.clone());

    let mut response = next.run(req).await;

    let outcome = handle.snapshot().await;
    if outcome == initial {
        return response;
    }
    let cookie = match outcome {
        SessionState::Active(tokens) => {
            manager.store.save(&session_id, &tokens).await;
            manager.issue_cookie(&session_id)
        }
        SessionState::Destroyed => {
            manager.store.delete(&session_id).await;
            manager.expire_cookie()
        }
        SessionState::Anonymous => return response,
    };

    match HeaderValue::from_str(&cookie) {
        Ok(value) => {
            response.headers_mut().append(header::SET_COOKIE, value);
        }
        Err(e) => tracing::error!(error = %e, "Session cookie is not a valid header value"),
    }
    response
}

fn generate_session_id() -> String {
    use rand::RngCore;
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}

fn parse_cookie<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find_map(|(key, value)| (key == name).then_some(value))
}
