//! Ephemeral store port - TTL'd key/value storage for session flags.
//!
//! Keys are namespaced `session:<sessionId>:<flagName>`. Every write
//! refreshes the key's TTL to the full window; a missing or expired key
//! reads as unset. Each flag is its own key, so concurrent updates are
//! last-writer-wins per flag. Mutual exclusion (the distress check-in
//! token) goes through `set_if_absent`, which must be atomic in the
//! backing store.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;

/// Default TTL applied to session flag writes, in seconds.
pub const FLAG_TTL_SECS: u64 = 86_400;

/// Key/value store with per-key time-to-live.
#[async_trait]
pub trait EphemeralStore: Send + Sync {
    /// Writes a value under `key`, (re)setting its TTL to `ttl_secs`.
    async fn set(&self, key: &str, value: &str, ttl_secs: u64) -> Result<(), DomainError>;

    /// Writes a value only if the key is absent (or expired). Returns
    /// whether the write happened. Must be a single atomic operation
    /// against the backing store.
    async fn set_if_absent(
        &self,
        key: &str,
        value: &str,
        ttl_secs: u64,
    ) -> Result<bool, DomainError>;

    /// Reads a value; `None` if absent or expired.
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError>;

    /// Deletes a key. Deleting an absent key is a no-op.
    async fn delete(&self, key: &str) -> Result<(), DomainError>;

    /// TTL window applied to flag writes. Adapters wired from
    /// configuration override this.
    fn flag_ttl_secs(&self) -> u64 {
        FLAG_TTL_SECS
    }

    /// Writes a boolean flag with the store's TTL window.
    async fn set_flag(&self, key: &str, value: bool) -> Result<(), DomainError> {
        self.set(
            key,
            if value { "true" } else { "false" },
            self.flag_ttl_secs(),
        )
        .await
    }

    /// Reads a boolean flag; absent or expired means `false`.
    async fn get_flag(&self, key: &str) -> Result<bool, DomainError> {
        Ok(self.get(key).await?.as_deref() == Some("true"))
    }
}
