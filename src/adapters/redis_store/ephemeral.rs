//! Redis-backed ephemeral store for production deployments.
//!
//! Every write uses SET with EX, so Redis owns the TTL clock: a rewrite
//! restarts the window and a crash between related writes self-heals when
//! the stale key expires.

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::EphemeralStore;

#[derive(Clone)]
pub struct RedisEphemeralStore {
    conn: MultiplexedConnection,
    flag_ttl_secs: u64,
}

impl RedisEphemeralStore {
    pub fn new(conn: MultiplexedConnection, flag_ttl_secs: u64) -> Self {
        Self {
            conn,
            flag_ttl_secs,
        }
    }

    fn cache_error(err: redis::RedisError) -> DomainError {
        DomainError::new(ErrorCode::CacheError, err.to_string())
    }
}

#[async_trait]
impl EphemeralStore for RedisEphemeralStore {
    async fn set(&self, key: &str, value: &str, ttl_secs: u64) -> Result<(), DomainError> {
        let mut conn = self.conn.clone();
        conn.set_ex::<_, _, ()>(key, value, ttl_secs)
            .await
            .map_err(Self::cache_error)
    }

    async fn set_if_absent(
        &self,
        key: &str,
        value: &str,
        ttl_secs: u64,
    ) -> Result<bool, DomainError> {
        // SET NX EX is one atomic command; nil reply means the key held.
        let mut conn = self.conn.clone();
        let reply: Option<String> = redis::cmd("SET")
            .arg(key)
            .arg(value)
            .arg("NX")
            .arg("EX")
            .arg(ttl_secs)
            .query_async(&mut conn)
            .await
            .map_err(Self::cache_error)?;
        Ok(reply.is_some())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        let mut conn = self.conn.clone();
        conn.get(key).await.map_err(Self::cache_error)
    }

    async fn delete(&self, key: &str) -> Result<(), DomainError> {
        let mut conn = self.conn.clone();
        conn.del::<_, ()>(key).await.map_err(Self::cache_error)
    }

    fn flag_ttl_secs(&self) -> u64 {
        self.flag_ttl_secs
    }
}

impl std::fmt::Debug for RedisEphemeralStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisEphemeralStore").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    // Redis integration tests require a running Redis instance and are
    // typically run separately from unit tests. The TTL and flag contract
    // is covered against the in-memory store.
}
