//! Shared request/response DTOs and the typed session record.
//!
//! Provider payloads are parsed here on the boundary; handlers never poke
//! at raw `serde_json::Value` except for the refresh passthrough.

use serde::{Deserialize, Deserializer, Serialize};

/// What a logged-in session holds. Stored as-is by the session store.
///
/// A record with an empty access token counts as logged out.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionTokens {
    pub access_token: String,
    pub user_id: Option<String>,
    pub username: Option<String>,
}

impl SessionTokens {
    pub fn is_logged_in(&self) -> bool {
        !self.access_token.is_empty()
    }
}

/// Successful response of the authorization-code exchange.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(deserialize_with = "string_or_number")]
    pub user_id: String,
}

/// `GET /me?fields=id,username`
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Profile {
    pub id: String,
    pub username: String,
}

/// One entry of `GET /me/media`.
///
/// The Graph API omits `media_url` on copyright-flagged items and
/// `permalink` on some album children, so both are optional.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct MediaItem {
    pub id: String,
    #[serde(default)]
    pub caption: Option<String>,
    pub media_type: String,
    #[serde(default)]
    pub media_url: Option<String>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub permalink: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl MediaItem {
    pub fn is_video(&self) -> bool {
        self.media_type == "VIDEO"
    }

    /// URL to show as the preview image: the thumbnail for videos, falling
    /// back to the media itself.
    pub fn preview_url(&self) -> Option<&str> {
        let thumb = self.thumbnail_url.as_deref().filter(|_| self.is_video());
        thumb.or(self.media_url.as_deref())
    }
}

/// Envelope of `GET /me/media`. Either `data` or `error` is present; a
/// missing or `null` `data` is an empty listing.
#[derive(Debug, Deserialize)]
pub struct MediaPage {
    #[serde(default)]
    pub data: Option<Vec<MediaItem>>,
    #[serde(default)]
    pub error: Option<ProviderErrorBody>,
}

/// The provider's `{"error": {...}}` object.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ProviderErrorBody {
    #[serde(default)]
    pub message: String,
    #[serde(rename = "type", default)]
    pub error_type: Option<String>,
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub fbtrace_id: Option<String>,
}

/// Raw refresh response, kept verbatim for passthrough.
#[derive(Debug, Clone, PartialEq)]
pub struct RefreshResponse {
    pub raw: serde_json::Value,
}

impl RefreshResponse {
    /// The new long-lived token, when the provider issued one.
    pub fn access_token(&self) -> Option<&str> {
        self.raw
            .get("access_token")
            .and_then(|v| v.as_str())
            .filter(|t| !t.is_empty())
    }
}

/// GET /health response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Str(String),
        Num(u64),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Str(s) => s,
        Id::Num(n) => n.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_token_response_numeric_user_id() {
        let json = r#"{"access_token": "IGQV123", "user_id": 17841405793187218}"#;
        let tok: TokenResponse = serde_json::from_str(json).unwrap();
        assert_eq!(tok.access_token, "IGQV123");
        assert_eq!(tok.user_id, "17841405793187218");
    }

    #[test]
    fn test_token_response_string_user_id() {
        let tok: TokenResponse =
            serde_json::from_value(json!({"access_token": "T1", "user_id": "U1"})).unwrap();
        assert_eq!(tok.user_id, "U1");
    }

    #[test]
    fn test_token_response_requires_access_token() {
        let res: Result<TokenResponse, _> = serde_json::from_value(json!({"user_id": "U1"}));
        assert!(res.is_err());
    }

    #[test]
    fn test_media_item_minimal() {
        let item: MediaItem = serde_json::from_value(json!({
            "id": "1",
            "media_type": "IMAGE",
            "media_url": "http://x/1.jpg",
            "permalink": "http://x/p/1"
        }))
        .unwrap();
        assert_eq!(item.id, "1");
        assert!(item.caption.is_none());
        assert!(item.timestamp.is_none());
        assert_eq!(item.preview_url(), Some("http://x/1.jpg"));
    }

    #[test]
    fn test_video_preview_uses_thumbnail() {
        let item: MediaItem = serde_json::from_value(json!({
            "id": "2",
            "media_type": "VIDEO",
            "media_url": "http://x/2.mp4",
            "thumbnail_url": "http://x/2.jpg",
            "permalink": "http://x/p/2"
        }))
        .unwrap();
        assert!(item.is_video());
        assert_eq!(item.preview_url(), Some("http://x/2.jpg"));
    }

    #[test]
    fn test_media_item_without_media_url() {
        // Copyright-flagged media comes back without `media_url`
        let item: MediaItem = serde_json::from_value(json!({
            "id": "3",
            "media_type": "VIDEO",
            "permalink": "http://x/p/3"
        }))
        .unwrap();
        assert!(item.media_url.is_none());
        assert_eq!(item.preview_url(), None);
        assert_eq!(item.permalink.as_deref(), Some("http://x/p/3"));
    }

    #[test]
    fn test_media_page_null_data() {
        let page: MediaPage = serde_json::from_value(json!({"data": null})).unwrap();
        assert!(page.data.is_none());
        assert!(page.error.is_none());
    }

    #[test]
    fn test_media_page_error_object() {
        let page: MediaPage =
            serde_json::from_value(json!({"error": {"message": "token expired", "code": 190}}))
                .unwrap();
        assert!(page.data.is_none());
        let err = page.error.unwrap();
        assert_eq!(err.message, "token expired");
        assert_eq!(err.code, Some(190));
    }

    #[test]
    fn test_session_tokens_logged_in_iff_token_non_empty() {
        assert!(!SessionTokens::default().is_logged_in());
        let tokens = SessionTokens {
            access_token: "T1".into(),
            ..Default::default()
        };
        assert!(tokens.is_logged_in());
    }

    #[test]
    fn test_refresh_response_access_token() {
        let ok = RefreshResponse {
            raw: json!({"access_token": "T2", "token_type": "bearer", "expires_in": 5183944}),
        };
        assert_eq!(ok.access_token(), Some("T2"));

        let err = RefreshResponse {
            raw: json!({"error": {"message": "Invalid OAuth access token"}}),
        };
        assert_eq!(err.access_token(), None);
    }
}
