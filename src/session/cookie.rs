//! HMAC-SHA256 session cookie signing and verification.
//!
//! Cookie value: `base64url(session_id).base64url(hmac_signature)`. The HMAC
//! covers only the session id; the session data lives server-side.

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Signs and verifies session ids with a fixed secret.
#[derive(Clone)]
pub struct CookieSigner {
    secret: Vec<u8>,
}

impl CookieSigner {
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        Self {
            secret: secret.as_ref().to_vec(),
        }
    }

    fn mac(&self, session_id: &str) -> HmacSha256 {
        // HMAC accepts keys of any length
        let mut mac =
            HmacSha256::new_from_slice(&self.secret).expect("HMAC key length is always valid");
        mac.update(session_id.as_bytes());
        mac
    }

    /// Sign a session id, returning the cookie value.
    pub fn sign(&self, session_id: &str) -> String {
        let signature = self.mac(session_id).finalize().into_bytes();
        format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(session_id.as_bytes()),
            URL_SAFE_NO_PAD.encode(signature)
        )
    }

    /// Verify a cookie value and extract the session id.
    ///
    /// Returns `None` on a bad signature or malformed value; callers treat
    /// that as an anonymous request.
    pub fn verify(&self, cookie_value: &str) -> Option<String> {
        let (id_part, sig_part) = cookie_value.split_once('.')?;
        let session_id = String::from_utf8(URL_SAFE_NO_PAD.decode(id_part).ok()?).ok()?;
        let signature = URL_SAFE_NO_PAD.decode(sig_part).ok()?;

        self.mac(&session_id).verify_slice(&signature).ok()?;
        Some(session_id)
    }
}
