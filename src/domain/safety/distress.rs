//! Distress check-in state machine.
//!
//! Entry is signalled by an external distress classifier; the awaiting
//! flag in the ephemeral store is the mutual-exclusion token that keeps
//! at most one check-in in flight.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;

/// Lifecycle of a distress check-in for one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DistressState {
    Normal,
    PendingCheckIn,
}

impl DistressState {
    /// Derives the state from the awaiting flag.
    pub fn from_awaiting_flag(awaiting: bool) -> Self {
        if awaiting {
            DistressState::PendingCheckIn
        } else {
            DistressState::Normal
        }
    }
}

impl StateMachine for DistressState {
    fn can_transition_to(&self, target: &Self) -> bool {
        matches!(
            (self, target),
            (DistressState::Normal, DistressState::PendingCheckIn)
                | (DistressState::PendingCheckIn, DistressState::Normal)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        match self {
            DistressState::Normal => vec![DistressState::PendingCheckIn],
            DistressState::PendingCheckIn => vec![DistressState::Normal],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_follows_the_awaiting_flag() {
        assert_eq!(
            DistressState::from_awaiting_flag(true),
            DistressState::PendingCheckIn
        );
        assert_eq!(
            DistressState::from_awaiting_flag(false),
            DistressState::Normal
        );
    }

    #[test]
    fn pending_cannot_reenter_pending() {
        assert!(!DistressState::PendingCheckIn.can_transition_to(&DistressState::PendingCheckIn));
    }
}
