//! Two-tier classifier: heuristic first, model-assisted fallback when
//! heuristic confidence drops below the configured threshold.
//!
//! Escalation runs under a timeout; a slow or failing model call degrades
//! back to the heuristic result instead of failing the turn.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::perception::{MhhVariables, PerceptionInput};
use crate::ports::{ModelAssistedClassifier, PerceptionClassifier};

pub struct EscalatingClassifier {
    heuristic: Arc<dyn PerceptionClassifier>,
    model: Arc<dyn ModelAssistedClassifier>,
    escalation_threshold: f64,
    escalation_timeout: Duration,
}

impl EscalatingClassifier {
    pub fn new(
        heuristic: Arc<dyn PerceptionClassifier>,
        model: Arc<dyn ModelAssistedClassifier>,
        escalation_threshold: f64,
        escalation_timeout: Duration,
    ) -> Self {
        Self {
            heuristic,
            model,
            escalation_threshold,
            escalation_timeout,
        }
    }
}

#[async_trait]
impl PerceptionClassifier for EscalatingClassifier {
    async fn classify(&self, input: &PerceptionInput) -> MhhVariables {
        let heuristic = self.heuristic.classify(input).await;
        if heuristic.overall_confidence().value() >= self.escalation_threshold {
            return heuristic;
        }

        match tokio::time::timeout(self.escalation_timeout, self.model.classify(input)).await {
            Ok(Ok(escalated)) => escalated,
            Ok(Err(err)) => {
                tracing::warn!(error = %err, "model-assisted classification failed, using heuristic result");
                heuristic
            }
            Err(_) => {
                tracing::warn!(
                    timeout_ms = self.escalation_timeout.as_millis() as u64,
                    "model-assisted classification timed out, using heuristic result"
                );
                heuristic
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::classifier::HeuristicClassifier;
    use crate::domain::foundation::{DomainError, ErrorCode, UnitInterval};
    use crate::domain::perception::{AcceptanceState, Scored};

    struct FixedModel {
        result: MhhVariables,
    }

    #[async_trait]
    impl ModelAssistedClassifier for FixedModel {
        async fn classify(&self, _input: &PerceptionInput) -> Result<MhhVariables, DomainError> {
            Ok(self.result)
        }
    }

    struct FailingModel;

    #[async_trait]
    impl ModelAssistedClassifier for FailingModel {
        async fn classify(&self, _input: &PerceptionInput) -> Result<MhhVariables, DomainError> {
            Err(DomainError::new(ErrorCode::InternalError, "model unavailable"))
        }
    }

    struct SlowModel;

    #[async_trait]
    impl ModelAssistedClassifier for SlowModel {
        async fn classify(&self, _input: &PerceptionInput) -> Result<MhhVariables, DomainError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(MhhVariables::low_confidence_default())
        }
    }

    fn confident_result() -> MhhVariables {
        let mut mhh = MhhVariables::low_confidence_default();
        mhh.acceptance_state = Scored::new(AcceptanceState::Resisted, UnitInterval::clamped(0.9));
        mhh.source.confidence = UnitInterval::clamped(0.9);
        mhh.perspective.confidence = UnitInterval::clamped(0.9);
        mhh.timeframe.confidence = UnitInterval::clamped(0.9);
        mhh
    }

    fn classifier(model: Arc<dyn ModelAssistedClassifier>) -> EscalatingClassifier {
        EscalatingClassifier::new(
            Arc::new(HeuristicClassifier::new()),
            model,
            0.5,
            Duration::from_millis(50),
        )
    }

    #[tokio::test]
    async fn low_confidence_input_escalates_to_model() {
        let escalating = classifier(Arc::new(FixedModel {
            result: confident_result(),
        }));
        let mhh = escalating.classify(&PerceptionInput::new("ok")).await;
        assert_eq!(mhh.acceptance_state.value, AcceptanceState::Resisted);
        assert!(mhh.overall_confidence().value() >= 0.9);
    }

    #[tokio::test]
    async fn confident_heuristic_result_skips_the_model() {
        let escalating = EscalatingClassifier::new(
            Arc::new(HeuristicClassifier::new()),
            Arc::new(FailingModel),
            0.1,
            Duration::from_millis(50),
        );
        // Threshold 0.1 means even defaults pass; the failing model must
        // never be consulted.
        let mhh = escalating.classify(&PerceptionInput::new("ok")).await;
        assert_eq!(mhh.acceptance_state.value, AcceptanceState::Uncertain);
    }

    #[tokio::test]
    async fn model_failure_degrades_to_heuristic_result() {
        let escalating = classifier(Arc::new(FailingModel));
        let heuristic = HeuristicClassifier::new()
            .classify(&PerceptionInput::new("ok"))
            .await;
        let mhh = escalating.classify(&PerceptionInput::new("ok")).await;
        assert_eq!(mhh, heuristic);
    }

    #[tokio::test(start_paused = true)]
    async fn model_timeout_degrades_to_heuristic_result() {
        let escalating = classifier(Arc::new(SlowModel));
        let mhh = escalating.classify(&PerceptionInput::new("ok")).await;
        assert_eq!(mhh.acceptance_state.value, AcceptanceState::Uncertain);
    }
}
