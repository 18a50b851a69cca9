//! GetSessionSettingsHandler - snapshot of a session's safety flags.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, SessionId};
use crate::domain::safety::{SessionFlag, SessionSettings};
use crate::ports::EphemeralStore;

/// Reads the four safety flags; missing or expired keys read as false.
pub struct GetSessionSettingsHandler {
    ephemeral: Arc<dyn EphemeralStore>,
}

impl GetSessionSettingsHandler {
    pub fn new(ephemeral: Arc<dyn EphemeralStore>) -> Self {
        Self { ephemeral }
    }

    pub async fn handle(&self, session_id: &SessionId) -> Result<SessionSettings, DomainError> {
        Ok(SessionSettings {
            session_pause_aggregation: self
                .ephemeral
                .get_flag(&SessionFlag::PauseAggregation.key(session_id))
                .await?,
            session_pause_training: self
                .ephemeral
                .get_flag(&SessionFlag::PauseTraining.key(session_id))
                .await?,
            distress_check_performed: self
                .ephemeral
                .get_flag(&SessionFlag::DistressCheckPerformed.key(session_id))
                .await?,
            awaiting_distress_check_response: self
                .ephemeral
                .get_flag(&SessionFlag::AwaitingDistressCheckResponse.key(session_id))
                .await?,
        })
    }
}
