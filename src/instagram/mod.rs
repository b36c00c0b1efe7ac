//! Instagram HTTP client: OAuth code exchange and Graph API reads.

pub mod client;
pub mod oauth;

use serde_json::Value;

use crate::types::ProviderErrorBody;

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("HTTP request failed: {0}")]
    Request(String),

    #[error("upstream returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Instagram API error: {}", .0.message)]
    Api(ProviderErrorBody),

    #[error("unexpected response body: {0}")]
    Malformed(String),
}

// Graph calls carry the access token in the query string, so the URL is
// stripped before the error text can reach a log line.
impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        ProviderError::Request(e.without_url().to_string())
    }
}

/// Upstream response reduced to what callers inspect.
pub(crate) struct RawResponse {
    pub status: reqwest::StatusCode,
    pub body: String,
}

impl RawResponse {
    pub(crate) async fn read(resp: reqwest::Response) -> Result<Self, ProviderError> {
        // Capture status before consuming the body
        let status = resp.status();
        let body = resp.text().await?;
        Ok(Self { status, body })
    }

    pub(crate) fn json(&self) -> Result<Value, ProviderError> {
        serde_json::from_str(&self.body).map_err(|e| ProviderError::Malformed(e.to_string()))
    }

    /// The provider's `error` object, if the body carries one.
    pub(crate) fn provider_error(&self) -> Option<ProviderErrorBody> {
        let value: Value = serde_json::from_str(&self.body).ok()?;
        serde_json::from_value(value.get("error")?.clone()).ok()
    }

    /// Fail on an error object or non-2xx status, in that order.
    pub(crate) fn ensure_success(&self) -> Result<(), ProviderError> {
        if let Some(err) = self.provider_error() {
            return Err(ProviderError::Api(err));
        }
        if !self.status.is_success() {
            return Err(ProviderError::Status {
                status: self.status.as_u16(),
                body: self.body.clone(),
            });
        }
        Ok(())
    }
}
