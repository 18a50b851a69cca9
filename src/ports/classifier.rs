//! Perception classification strategy ports.
//!
//! Two tiers behind one capability contract: a heuristic lexical
//! classifier, and a model-assisted fallback consulted when heuristic
//! confidence drops below a configured threshold. The trigger and
//! appraisal logic never know which backend produced the result.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::domain::perception::{MhhVariables, PerceptionInput};

/// Maps an utterance plus precomputed features to MHH variables.
///
/// # Contract
///
/// - Deterministic for the same input and escalation decision
/// - All confidences in [0, 1]
/// - Ambiguity degrades to uncertain/both/present at low confidence;
///   classification never fails the turn
#[async_trait]
pub trait PerceptionClassifier: Send + Sync {
    async fn classify(&self, input: &PerceptionInput) -> MhhVariables;
}

/// External model-assisted classifier (prompt template + model call).
///
/// Invoked with a caller-supplied timeout by the escalating adapter; a
/// timeout or failure here degrades to the heuristic result rather than
/// aborting the turn.
#[async_trait]
pub trait ModelAssistedClassifier: Send + Sync {
    async fn classify(&self, input: &PerceptionInput) -> Result<MhhVariables, DomainError>;
}
