//! Somatic awaiting-state probes: pure flag read, idempotent reset.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, SessionId};
use crate::domain::safety::{SessionFlag, SomaticState};
use crate::ports::EphemeralStore;

/// Reads whether the session is awaiting a somatic response.
pub struct IsAwaitingSomaticResponseHandler {
    ephemeral: Arc<dyn EphemeralStore>,
}

impl IsAwaitingSomaticResponseHandler {
    pub fn new(ephemeral: Arc<dyn EphemeralStore>) -> Self {
        Self { ephemeral }
    }

    pub async fn handle(&self, session_id: &SessionId) -> Result<bool, DomainError> {
        let awaiting = self
            .ephemeral
            .get_flag(&SessionFlag::SomaticAwaitingResponse.key(session_id))
            .await?;
        Ok(SomaticState::from_awaiting_flag(awaiting) == SomaticState::AwaitingResponse)
    }
}

/// Clears the awaiting flag, returning the machine to Idle.
///
/// Idempotent: resetting an already-idle session is a no-op, not an error.
pub struct ResetSomaticStateHandler {
    ephemeral: Arc<dyn EphemeralStore>,
}

impl ResetSomaticStateHandler {
    pub fn new(ephemeral: Arc<dyn EphemeralStore>) -> Self {
        Self { ephemeral }
    }

    pub async fn handle(&self, session_id: &SessionId) -> Result<(), DomainError> {
        self.ephemeral
            .set_flag(&SessionFlag::SomaticAwaitingResponse.key(session_id), false)
            .await
    }
}
