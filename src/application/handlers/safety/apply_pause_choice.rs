//! ApplyPauseChoiceHandler - resolves a distress check-in.
//!
//! Maps the user's choice onto the pause flags and unconditionally clears
//! the awaiting flag, returning the flow to Normal.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, SessionId};
use crate::domain::safety::{PauseChoice, PauseFlags, SessionFlag};
use crate::ports::EphemeralStore;

/// Command carrying the user's check-in answer.
#[derive(Debug, Clone)]
pub struct ApplyPauseChoiceCommand {
    pub session_id: SessionId,
    pub choice: PauseChoice,
}

/// Handler that fans a pause choice out to the session flags.
pub struct ApplyPauseChoiceHandler {
    ephemeral: Arc<dyn EphemeralStore>,
}

impl ApplyPauseChoiceHandler {
    pub fn new(ephemeral: Arc<dyn EphemeralStore>) -> Self {
        Self { ephemeral }
    }

    pub async fn handle(&self, cmd: ApplyPauseChoiceCommand) -> Result<PauseFlags, DomainError> {
        let flags = cmd.choice.pause_flags();

        self.ephemeral
            .set_flag(
                &SessionFlag::PauseAggregation.key(&cmd.session_id),
                flags.pause_aggregation,
            )
            .await?;
        self.ephemeral
            .set_flag(
                &SessionFlag::PauseTraining.key(&cmd.session_id),
                flags.pause_training,
            )
            .await?;
        self.ephemeral
            .set_flag(
                &SessionFlag::AwaitingDistressCheckResponse.key(&cmd.session_id),
                false,
            )
            .await?;

        tracing::info!(
            session_id = %cmd.session_id,
            choice = ?cmd.choice,
            "distress check-in resolved"
        );
        Ok(flags)
    }
}
