//! Server-side sessions.
//!
//! The browser carries only an HMAC-signed session id; the token record
//! itself stays in a [`SessionStore`]. [`memory::MemoryStore`] is the only
//! store shipped, so sessions do not survive a restart.

pub mod cookie;
pub mod memory;
pub mod middleware;

use std::future::Future;

use crate::types::SessionTokens;

/// Storage for session records, keyed by session id.
pub trait SessionStore: Send + Sync {
    /// The record for `session_id`, or `None` if unknown or expired.
    fn load(&self, session_id: &str) -> impl Future<Output = Option<SessionTokens>> + Send;

    /// Insert or replace the record. Replacing keeps the original expiry.
    fn save(&self, session_id: &str, tokens: &SessionTokens) -> impl Future<Output = ()> + Send;

    fn delete(&self, session_id: &str) -> impl Future<Output = ()> + Send;
}
