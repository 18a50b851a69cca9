//! In-memory ephemeral store with a manually advanced clock.
//!
//! TTL expiry is driven by a logical clock so tests can simulate the
//! 24-hour window elapsing without sleeping.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::ports::{EphemeralStore, FLAG_TTL_SECS};

struct Entry {
    value: String,
    expires_at: u64,
}

struct Inner {
    entries: HashMap<String, Entry>,
    now_secs: u64,
}

/// In-memory `EphemeralStore` implementation.
pub struct InMemoryEphemeralStore {
    inner: Mutex<Inner>,
    flag_ttl: u64,
}

impl InMemoryEphemeralStore {
    pub fn new() -> Self {
        Self::with_flag_ttl(FLAG_TTL_SECS)
    }

    /// Builds a store whose flag writes use the given TTL window.
    pub fn with_flag_ttl(flag_ttl: u64) -> Self {
        Self {
            inner: Mutex::new(Inner {
                entries: HashMap::new(),
                now_secs: 0,
            }),
            flag_ttl,
        }
    }

    /// Advances the logical clock, expiring any entries whose TTL has
    /// elapsed. Test support.
    pub fn advance_clock(&self, secs: u64) {
        let mut inner = self.inner.lock().unwrap();
        inner.now_secs += secs;
        let now = inner.now_secs;
        inner.entries.retain(|_, entry| entry.expires_at > now);
    }
}

impl Default for InMemoryEphemeralStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EphemeralStore for InMemoryEphemeralStore {
    async fn set(&self, key: &str, value: &str, ttl_secs: u64) -> Result<(), DomainError> {
        let mut inner = self.inner.lock().unwrap();
        let expires_at = inner.now_secs + ttl_secs;
        inner.entries.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at,
            },
        );
        Ok(())
    }

    async fn set_if_absent(
        &self,
        key: &str,
        value: &str,
        ttl_secs: u64,
    ) -> Result<bool, DomainError> {
        // One lock acquisition covers the check and the insert.
        let mut inner = self.inner.lock().unwrap();
        let now = inner.now_secs;
        let live = inner
            .entries
            .get(key)
            .is_some_and(|entry| entry.expires_at > now);
        if live {
            return Ok(false);
        }
        inner.entries.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at: now + ttl_secs,
            },
        );
        Ok(true)
    }

    async fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .entries
            .get(key)
            .filter(|entry| entry.expires_at > inner.now_secs)
            .map(|entry| entry.value.clone()))
    }

    async fn delete(&self, key: &str) -> Result<(), DomainError> {
        self.inner.lock().unwrap().entries.remove(key);
        Ok(())
    }

    fn flag_ttl_secs(&self) -> u64 {
        self.flag_ttl
    }
}
