//! TriggerDistressCheckHandler - entry into the PendingCheckIn state.
//!
//! Called when the external distress classifier signals a distress-level
//! condition. The awaiting flag is the mutual-exclusion token: it is
//! claimed with an atomic set-if-absent, so concurrent triggers for the
//! same session enter PendingCheckIn exactly once and the rest back off.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, SessionId};
use crate::domain::safety::{DistressState, SessionFlag};
use crate::ports::EphemeralStore;

/// Whether the check-in was entered or an earlier one is still pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistressCheckOutcome {
    Entered,
    AlreadyPending,
}

/// Handler that opens a distress check-in for a session.
pub struct TriggerDistressCheckHandler {
    ephemeral: Arc<dyn EphemeralStore>,
}

impl TriggerDistressCheckHandler {
    pub fn new(ephemeral: Arc<dyn EphemeralStore>) -> Self {
        Self { ephemeral }
    }

    pub async fn handle(
        &self,
        session_id: &SessionId,
    ) -> Result<DistressCheckOutcome, DomainError> {
        let awaiting_key = SessionFlag::AwaitingDistressCheckResponse.key(session_id);
        let claimed = self
            .ephemeral
            .set_if_absent(&awaiting_key, "true", self.ephemeral.flag_ttl_secs())
            .await?;
        if !claimed {
            tracing::info!(
                session_id = %session_id,
                state = ?DistressState::PendingCheckIn,
                "distress check already pending; backing off"
            );
            return Ok(DistressCheckOutcome::AlreadyPending);
        }

        self.ephemeral
            .set_flag(&SessionFlag::DistressCheckPerformed.key(session_id), true)
            .await?;

        tracing::info!(session_id = %session_id, "distress check-in opened");
        Ok(DistressCheckOutcome::Entered)
    }
}
