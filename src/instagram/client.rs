//! Graph API reads: profile, media listing, long-lived token refresh.

use super::{ProviderError, RawResponse};
use crate::config::Config;
use crate::types::{MediaItem, MediaPage, Profile, RefreshResponse};

const PROFILE_FIELDS: &str = "id,username";
const MEDIA_FIELDS: &str = "id,caption,media_type,media_url,thumbnail_url,permalink,timestamp";

async fn graph_get(
    http_client: &reqwest::Client,
    config: &Config,
    endpoint: &str,
    query: &[(&str, &str)],
) -> Result<RawResponse, ProviderError> {
    let url = format!("{}/{}", config.ig_graph_url.trim_end_matches('/'), endpoint);
    let resp = http_client.get(url).query(query).send().await?;
    RawResponse::read(resp).await
}

/// GET `/me?fields=id,username`.
pub async fn fetch_profile(
    http_client: &reqwest::Client,
    config: &Config,
    access_token: &str,
) -> Result<Profile, ProviderError> {
    let raw = graph_get(
        http_client,
        config,
        "me",
        &[("fields", PROFILE_FIELDS), ("access_token", access_token)],
    )
    .await?;
    raw.ensure_success()?;

    serde_json::from_value(raw.json()?).map_err(|e| ProviderError::Malformed(e.to_string()))
}

/// GET `/me/media`, first page only.
pub async fn fetch_media(
    http_client: &reqwest::Client,
    config: &Config,
    access_token: &str,
) -> Result<Vec<MediaItem>, ProviderError> {
    let raw = graph_get(
        http_client,
        config,
        "me/media",
        &[("fields", MEDIA_FIELDS), ("access_token", access_token)],
    )
    .await?;
    raw.ensure_success()?;

    let page: MediaPage =
        serde_json::from_value(raw.json()?).map_err(|e| ProviderError::Malformed(e.to_string()))?;
    if let Some(err) = page.error {
        return Err(ProviderError::Api(err));
    }
    Ok(page.data.unwrap_or_default())
}

/// GET `/refresh_access_token?grant_type=ig_refresh_token`.
///
/// Any JSON body is returned, error objects included, so the route can pass
/// it through verbatim. Only transport failures and non-JSON bodies fail.
pub async fn refresh_token(
    http_client: &reqwest::Client,
    config: &Config,
    access_token: &str,
) -> Result<RefreshResponse, ProviderError> {
    let raw = graph_get(
        http_client,
        config,
        "refresh_access_token",
        &[("grant_type", "ig_refresh_token"), ("access_token", access_token)],
    )
    .await?;

    if !raw.status.is_success() {
        tracing::warn!(status = raw.status.as_u16(), "Token refresh rejected upstream");
    }

    Ok(RefreshResponse { raw: raw.json()? })
}
