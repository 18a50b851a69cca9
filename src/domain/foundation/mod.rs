//! Foundation types shared across the domain.
//!
//! Identifiers, bounded value objects, timestamps, error taxonomy, and the
//! state machine trait used by the safety flows.

mod auth;
mod bounded;
mod errors;
mod ids;
mod state_machine;
mod timestamp;

pub use auth::{AuthError, AuthenticatedUser};
pub use bounded::{SignedUnit, UnitInterval};
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{SessionId, UserId};
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
