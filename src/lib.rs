//! Instagram media viewer: OAuth2 code exchange against Instagram, then a
//! server-rendered listing of the user's media, with the access token kept
//! in a server-side session.

pub mod audit;
pub mod config;
pub mod error;
pub mod instagram;
pub mod middleware;
pub mod routes;
pub mod session;
pub mod types;

use axum::Router;
use axum::middleware::from_fn;
use axum::routing::get;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::session::memory::MemoryStore;
use crate::session::middleware::{SessionManager, session_middleware};

/// Shared application state available to all route handlers.
pub struct AppState {
    pub config: Config,
    pub http_client: reqwest::Client,
    pub sessions: Arc<SessionManager<MemoryStore>>,
}

impl AppState {
    /// State with an empty in-memory session store.
    pub fn new(config: Config, http_client: reqwest::Client) -> Self {
        let sessions = Arc::new(SessionManager::new(
            MemoryStore::new(),
            &config.session_secret,
            config.session_https_only,
        ));
        Self {
            config,
            http_client,
            sessions,
        }
    }
}

/// Build the Axum router with all middleware and routes.
pub fn create_app(state: Arc<AppState>) -> Router {
    let sessions = state.sessions.clone();

    // Routes that need a logged-in session
    let protected_routes = Router::new()
        .route("/media", get(routes::media::list_media))
        .route("/refresh-token", get(routes::refresh::refresh_token))
        .layer(from_fn(crate::middleware::auth::require_auth));

    Router::new()
        .route("/", get(routes::index::index))
        .route("/auth", get(routes::auth::start_auth))
        .route("/callback", get(routes::callback::oauth_callback))
        .route("/logout", get(routes::logout::logout))
        .route("/health", get(routes::health::health))
        .merge(protected_routes)
        .layer(from_fn(move |req, next| {
            session_middleware(sessions.clone(), req, next)
        }))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
