//! Session conversation mode - an ephemeral per-session string with the
//! same TTL window as the safety flags.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, SessionId, ValidationError};
use crate::domain::safety::session_key;
use crate::ports::EphemeralStore;

const MODE_FIELD: &str = "mode";

/// Mode reported when the session never set one (or it expired).
pub const DEFAULT_SESSION_MODE: &str = "standard";

const MAX_MODE_LEN: usize = 64;

/// Reads the session's conversation mode.
pub struct GetSessionModeHandler {
    ephemeral: Arc<dyn EphemeralStore>,
}

impl GetSessionModeHandler {
    pub fn new(ephemeral: Arc<dyn EphemeralStore>) -> Self {
        Self { ephemeral }
    }

    pub async fn handle(&self, session_id: &SessionId) -> Result<String, DomainError> {
        Ok(self
            .ephemeral
            .get(&session_key(session_id, MODE_FIELD))
            .await?
            .unwrap_or_else(|| DEFAULT_SESSION_MODE.to_string()))
    }
}

/// Writes the session's conversation mode.
pub struct SetSessionModeHandler {
    ephemeral: Arc<dyn EphemeralStore>,
}

impl SetSessionModeHandler {
    pub fn new(ephemeral: Arc<dyn EphemeralStore>) -> Self {
        Self { ephemeral }
    }

    pub async fn handle(&self, session_id: &SessionId, mode: &str) -> Result<(), DomainError> {
        if mode.trim().is_empty() {
            return Err(ValidationError::empty_field("mode").into());
        }
        if mode.len() > MAX_MODE_LEN {
            return Err(ValidationError::invalid_format(
                "mode",
                format!("exceeds {} characters", MAX_MODE_LEN),
            )
            .into());
        }
        self.ephemeral
            .set(
                &session_key(session_id, MODE_FIELD),
                mode,
                self.ephemeral.flag_ttl_secs(),
            )
            .await
    }
}
