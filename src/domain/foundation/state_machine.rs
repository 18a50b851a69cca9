//! State machine trait for status enums.
//!
//! The somatic trigger and distress flow statuses both implement this trait
//! so transitions are validated in one place.

use super::ValidationError;

/// Trait for status enums that represent state machines.
///
/// Implementors define valid state transitions and get a validated
/// `transition_to` for free.
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    /// Returns true if transition from self to target is valid.
    fn can_transition_to(&self, target: &Self) -> bool;

    /// Returns all valid target states from the current state.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Performs the transition with validation, returning an error if invalid.
    fn transition_to(&self, target: Self) -> Result<Self, ValidationError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(ValidationError::invalid_format(
                "state_transition",
                format!("Cannot transition from {:?} to {:?}", self, target),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Flow {
        Quiet,
        Pending,
    }

    impl StateMachine for Flow {
        fn can_transition_to(&self, target: &Self) -> bool {
            matches!(
                (self, target),
                (Flow::Quiet, Flow::Pending) | (Flow::Pending, Flow::Quiet)
            )
        }

        fn valid_transitions(&self) -> Vec<Self> {
            match self {
                Flow::Quiet => vec![Flow::Pending],
                Flow::Pending => vec![Flow::Quiet],
            }
        }
    }

    #[test]
    fn valid_transition_succeeds() {
        assert_eq!(
            Flow::Quiet.transition_to(Flow::Pending),
            Ok(Flow::Pending)
        );
    }

    #[test]
    fn self_transition_is_rejected() {
        assert!(Flow::Quiet.transition_to(Flow::Quiet).is_err());
    }
}
