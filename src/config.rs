//! Application configuration via environment variables.
//!
//! Missing Instagram credentials are not fatal: the server still starts and
//! `main` logs a warning listing what is absent.

use std::env;
use std::time::Duration;

pub const DEFAULT_AUTH_URL: &str = "https://api.instagram.com/oauth/authorize";
pub const DEFAULT_TOKEN_URL: &str = "https://api.instagram.com/oauth/access_token";
pub const DEFAULT_GRAPH_URL: &str = "https://graph.instagram.com";
pub const DEFAULT_SCOPE: &str = "user_profile,user_media";
pub const DEFAULT_SESSION_SECRET: &str = "dev-secret-change-me";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub ig_app_id: String,
    pub ig_app_secret: String,
    pub ig_redirect_uri: String,
    pub ig_scope: String,
    pub ig_auth_url: String,
    pub ig_token_url: String,
    pub ig_graph_url: String,
    pub session_secret: String,
    pub session_https_only: bool,
    pub port: u16,
    pub upstream_timeout: Option<Duration>,
    pub log_json: bool,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Only malformed numeric values are errors. Everything else falls back
    /// to a default.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            ig_app_id: env::var("IG_APP_ID").unwrap_or_default(),
            ig_app_secret: env::var("IG_APP_SECRET").unwrap_or_default(),
            ig_redirect_uri: env::var("IG_REDIRECT_URI").unwrap_or_default(),
            ig_scope: env::var("IG_SCOPE").unwrap_or_else(|_| DEFAULT_SCOPE.into()),
            ig_auth_url: env::var("IG_AUTH_URL").unwrap_or_else(|_| DEFAULT_AUTH_URL.into()),
            ig_token_url: env::var("IG_TOKEN_URL").unwrap_or_else(|_| DEFAULT_TOKEN_URL.into()),
            ig_graph_url: env::var("IG_GRAPH_URL").unwrap_or_else(|_| DEFAULT_GRAPH_URL.into()),
            session_secret: env::var("SESSION_SECRET")
                .unwrap_or_else(|_| DEFAULT_SESSION_SECRET.into()),
            session_https_only: env::var("SESSION_HTTPS_ONLY")
                .map(|v| v == "true" || v == "1" || v == "True")
                .unwrap_or(false),
            port: parse_env("PORT")?.unwrap_or(3000),
            upstream_timeout: parse_env::<u64>("UPSTREAM_TIMEOUT_SECS")?.map(Duration::from_secs),
            log_json: env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json")),
        })
    }

    /// Names of auth-related settings that are unset or still on their
    /// development default.
    pub fn missing_auth_settings(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.ig_app_id.is_empty() {
            missing.push("IG_APP_ID");
        }
        if self.ig_app_secret.is_empty() {
            missing.push("IG_APP_SECRET");
        }
        if self.ig_redirect_uri.is_empty() {
            missing.push("IG_REDIRECT_URI");
        }
        if self.session_secret == DEFAULT_SESSION_SECRET {
            missing.push("SESSION_SECRET");
        }
        missing
    }

    /// Build the shared upstream HTTP client.
    pub fn http_client(&self) -> reqwest::Result<reqwest::Client> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.upstream_timeout {
            builder = builder.timeout(timeout);
        }
        builder.build()
    }
}

/// Configuration for testing — all fields settable directly.
impl Config {
    pub fn test_default() -> Self {
        Self {
            ig_app_id: "test-app-id".into(),
            ig_app_secret: "test-app-secret".into(),
            ig_redirect_uri: "http://localhost:3000/callback".into(),
            ig_scope: DEFAULT_SCOPE.into(),
            ig_auth_url: DEFAULT_AUTH_URL.into(),
            ig_token_url: DEFAULT_TOKEN_URL.into(),
            ig_graph_url: DEFAULT_GRAPH_URL.into(),
            session_secret: "test-secret-key".into(),
            session_https_only: false,
            port: 3000,
            upstream_timeout: None,
            log_json: false,
        }
    }

    /// Point every Instagram endpoint at `base` (a mock server in tests).
    pub fn with_provider_base(mut self, base: &str) -> Self {
        let base = base.trim_end_matches('/');
        self.ig_auth_url = format!("{base}/oauth/authorize");
        self.ig_token_url = format!("{base}/oauth/access_token");
        self.ig_graph_url = base.to_string();
        self
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for environment variable {key}: {value:?}")]
    InvalidValue { key: String, value: String },
}

fn parse_env<T: std::str::FromStr>(key: &str) -> Result<Option<T>, ConfigError> {
    match env::var(key) {
        Ok(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue {
                key: key.into(),
                value,
            }),
        Err(_) => Ok(None),
    }
}
