//! Authorization URL construction and code-for-token exchange.

use url::Url;

use super::{ProviderError, RawResponse};
use crate::config::Config;
use crate::types::TokenResponse;

/// Build the provider authorization URL the browser is sent to.
///
/// Pure: same inputs, same string. `response_type` is always `code`.
pub fn build_authorization_url(
    auth_url: &str,
    client_id: &str,
    redirect_uri: &str,
    scope: &str,
) -> Result<Url, url::ParseError> {
    Url::parse_with_params(
        auth_url,
        &[
            ("client_id", client_id),
            ("redirect_uri", redirect_uri),
            ("scope", scope),
            ("response_type", "code"),
        ],
    )
}

/// Exchange an OAuth authorization code for an access token.
///
/// POST to the token endpoint with grant_type=authorization_code. The code
/// is single-use upstream; it is not cached or deduplicated here.
pub async fn exchange_code_for_token(
    http_client: &reqwest::Client,
    config: &Config,
    code: &str,
) -> Result<TokenResponse, ProviderError> {
    let params = [
        ("client_id", config.ig_app_id.as_str()),
        ("client_secret", config.ig_app_secret.as_str()),
        ("grant_type", "authorization_code"),
        ("redirect_uri", config.ig_redirect_uri.as_str()),
        ("code", code),
    ];

    let resp = http_client
        .post(&config.ig_token_url)
        .form(&params)
        .send()
        .await?;
    let raw = RawResponse::read(resp).await?;

    if !raw.status.is_success() {
        return Err(ProviderError::Status {
            status: raw.status.as_u16(),
            body: raw.body,
        });
    }

    serde_json::from_str(&raw.body).map_err(|e| ProviderError::Malformed(e.to_string()))
}
