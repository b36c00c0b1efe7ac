//! `DashMap`-backed session store.
//!
//! Each record expires a fixed `max_age` after it was first saved (30 days
//! unless overridden). Expired records are dropped when next looked up.

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::time::{Duration, Instant};

use super::SessionStore;
use crate::types::SessionTokens;

pub const DEFAULT_MAX_AGE: Duration = Duration::from_secs(30 * 24 * 3600);

struct Record {
    tokens: SessionTokens,
    expires_at: Instant,
}

pub struct MemoryStore {
    records: DashMap<String, Record>,
    max_age: Duration,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_max_age(DEFAULT_MAX_AGE)
    }

    pub fn with_max_age(max_age: Duration) -> Self {
        Self {
            records: DashMap::new(),
            max_age,
        }
    }

    /// Records held, expired ones not yet looked up included.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore for MemoryStore {
    async fn load(&self, session_id: &str) -> Option<SessionTokens> {
        let now = Instant::now();
        self.records
            .remove_if(session_id, |_, record| record.expires_at <= now);
        self.records
            .get(session_id)
            .map(|record| record.tokens.clone())
    }

    async fn save(&self, session_id: &str, tokens: &SessionTokens) {
        match self.records.entry(session_id.to_owned()) {
            Entry::Occupied(mut existing) => existing.get_mut().tokens = tokens.clone(),
            Entry::Vacant(slot) => {
                slot.insert(Record {
                    tokens: tokens.clone(),
                    expires_at: Instant::now() + self.max_age,
                });
            }
        }
    }

    async fn delete(&self, session_id: &str) {
        self.records.remove(session_id);
    }
}
