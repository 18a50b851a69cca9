//! UpdatePauseSettingsHandler - user-initiated pause flag changes.
//!
//! A settings write path separate from the distress flow: it updates
//! `pauseAggregation`/`pauseTraining` independently and never touches
//! `awaitingDistressCheckResponse`. A write where only some requested
//! flags persist is surfaced as a PartialFailure naming the failed flags,
//! never reported as plain success.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, SessionId};
use crate::domain::safety::SessionFlag;
use crate::ports::EphemeralStore;

/// Command with the optional per-flag updates.
#[derive(Debug, Clone)]
pub struct UpdatePauseSettingsCommand {
    pub session_id: SessionId,
    pub aggregation_paused: Option<bool>,
    pub training_paused: Option<bool>,
}

/// The resulting flag values after a successful update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdatePauseSettingsResult {
    pub aggregation_paused: bool,
    pub training_paused: bool,
}

/// Handler for the independent pause-settings write path.
pub struct UpdatePauseSettingsHandler {
    ephemeral: Arc<dyn EphemeralStore>,
}

impl UpdatePauseSettingsHandler {
    pub fn new(ephemeral: Arc<dyn EphemeralStore>) -> Self {
        Self { ephemeral }
    }

    pub async fn handle(
        &self,
        cmd: UpdatePauseSettingsCommand,
    ) -> Result<UpdatePauseSettingsResult, DomainError> {
        let mut failed: Vec<&str> = Vec::new();

        if let Some(value) = cmd.aggregation_paused {
            let key = SessionFlag::PauseAggregation.key(&cmd.session_id);
            if let Err(err) = self.ephemeral.set_flag(&key, value).await {
                tracing::warn!(session_id = %cmd.session_id, error = %err, "pauseAggregation write failed");
                failed.push(SessionFlag::PauseAggregation.name());
            }
        }
        if let Some(value) = cmd.training_paused {
            let key = SessionFlag::PauseTraining.key(&cmd.session_id);
            if let Err(err) = self.ephemeral.set_flag(&key, value).await {
                tracing::warn!(session_id = %cmd.session_id, error = %err, "pauseTraining write failed");
                failed.push(SessionFlag::PauseTraining.name());
            }
        }

        if !failed.is_empty() {
            return Err(DomainError::partial_failure(
                "Some pause flags did not persist",
                &failed,
            ));
        }

        let aggregation_paused = self
            .ephemeral
            .get_flag(&SessionFlag::PauseAggregation.key(&cmd.session_id))
            .await?;
        let training_paused = self
            .ephemeral
            .get_flag(&SessionFlag::PauseTraining.key(&cmd.session_id))
            .await?;

        Ok(UpdatePauseSettingsResult {
            aggregation_paused,
            training_paused,
        })
    }
}
