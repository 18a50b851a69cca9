//! EvaluateSomaticTriggerHandler - per-turn somatic prompt decision.
//!
//! Classifies the turn, appraises it against the VAD estimate, then runs
//! the trigger policy: consent, no intervention already in flight,
//! threshold crossing, cooldown. On fire it renders the prompt and marks
//! the session awaiting a response. A turn arriving while awaiting counts
//! as that response and returns the machine to Idle.

use std::sync::Arc;

use crate::application::ConsentGate;
use crate::domain::appraisal::{Appraisal, AppraisalEngine, VadEstimate};
use crate::domain::consent::ALLOW_SOMATIC_PROMPTS;
use crate::domain::foundation::{DomainError, SessionId, UserId};
use crate::domain::perception::PerceptionInput;
use crate::domain::safety::{
    fallback_prompt, session_key, SessionFlag, SomaticTriggerPolicy, TriggerContext,
    TriggerDecision,
};
use crate::ports::{EphemeralStore, PerceptionClassifier, SomaticPromptRenderer};

/// Ephemeral field tracking the turn of the last fired prompt.
const LAST_PROMPT_TURN_FIELD: &str = "somaticLastPromptTurn";

/// Command to evaluate one conversational turn.
#[derive(Debug, Clone)]
pub struct EvaluateSomaticTriggerCommand {
    pub user_id: UserId,
    pub session_id: SessionId,
    pub input: PerceptionInput,
    pub vad: VadEstimate,
    pub current_turn: u64,
}

/// Outcome of one trigger evaluation.
#[derive(Debug, Clone)]
pub struct SomaticTriggerResult {
    pub decision: TriggerDecision,
    pub prompt: Option<String>,
    pub appraisal: Appraisal,
}

impl SomaticTriggerResult {
    pub fn should_trigger(&self) -> bool {
        self.decision.should_fire()
    }
}

/// Handler for per-turn somatic trigger evaluation.
pub struct EvaluateSomaticTriggerHandler {
    consent_gate: ConsentGate,
    ephemeral: Arc<dyn EphemeralStore>,
    classifier: Arc<dyn PerceptionClassifier>,
    engine: AppraisalEngine,
    policy: SomaticTriggerPolicy,
    renderer: Arc<dyn SomaticPromptRenderer>,
}

impl EvaluateSomaticTriggerHandler {
    pub fn new(
        consent_gate: ConsentGate,
        ephemeral: Arc<dyn EphemeralStore>,
        classifier: Arc<dyn PerceptionClassifier>,
        engine: AppraisalEngine,
        policy: SomaticTriggerPolicy,
        renderer: Arc<dyn SomaticPromptRenderer>,
    ) -> Self {
        Self {
            consent_gate,
            ephemeral,
            classifier,
            engine,
            policy,
            renderer,
        }
    }

    pub async fn handle(
        &self,
        cmd: EvaluateSomaticTriggerCommand,
    ) -> Result<SomaticTriggerResult, DomainError> {
        // Classification and appraisal never fail the turn.
        let mhh = self.classifier.classify(&cmd.input).await;
        let appraisal = self.engine.appraise(&mhh, &cmd.vad);

        let consent_granted = self
            .consent_gate
            .has_permission(&cmd.user_id, ALLOW_SOMATIC_PROMPTS)
            .await;

        // A turn arriving while the session awaits a somatic response IS
        // that response: clear the flag so the machine returns to Idle.
        // The responding turn itself never fires a new prompt.
        let awaiting_key = SessionFlag::SomaticAwaitingResponse.key(&cmd.session_id);
        let already_awaiting = self.ephemeral.get_flag(&awaiting_key).await?;
        if already_awaiting {
            self.ephemeral.set_flag(&awaiting_key, false).await?;
            tracing::info!(
                session_id = %cmd.session_id,
                turn = cmd.current_turn,
                "somatic response received; returning to idle"
            );
        }
        let distress_check_pending = self
            .ephemeral
            .get_flag(&SessionFlag::AwaitingDistressCheckResponse.key(&cmd.session_id))
            .await?;
        let last_prompt_turn = self
            .ephemeral
            .get(&session_key(&cmd.session_id, LAST_PROMPT_TURN_FIELD))
            .await?
            .and_then(|v| v.parse::<u64>().ok());

        let decision = self.policy.evaluate(&TriggerContext {
            consent_granted,
            already_awaiting,
            distress_check_pending,
            appraisal,
            arousal: cmd.vad.arousal,
            current_turn: cmd.current_turn,
            last_prompt_turn,
        });

        if !decision.should_fire() {
            return Ok(SomaticTriggerResult {
                decision,
                prompt: None,
                appraisal,
            });
        }

        let prompt = match self.renderer.render(&cmd.input.utterance, &appraisal).await {
            Ok(text) => text,
            Err(err) => {
                tracing::warn!(
                    session_id = %cmd.session_id,
                    error = %err,
                    "prompt rendering failed; using fallback template"
                );
                fallback_prompt(cmd.vad.arousal).to_string()
            }
        };

        self.ephemeral.set_flag(&awaiting_key, true).await?;
        self.ephemeral
            .set(
                &session_key(&cmd.session_id, LAST_PROMPT_TURN_FIELD),
                &cmd.current_turn.to_string(),
                self.ephemeral.flag_ttl_secs(),
            )
            .await?;

        tracing::info!(
            session_id = %cmd.session_id,
            turn = cmd.current_turn,
            "somatic prompt fired"
        );

        Ok(SomaticTriggerResult {
            decision,
            prompt: Some(prompt),
            appraisal,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::classifier::HeuristicClassifier;
    use crate::adapters::memory::{InMemoryConsentStore, InMemoryEphemeralStore};
    use crate::domain::appraisal::AppraisalParams;
    use crate::domain::consent::{ConsentProfile, Permission};
    use crate::domain::foundation::{SignedUnit, UnitInterval};
    use crate::domain::safety::HoldReason;
    use async_trait::async_trait;

    struct StaticRenderer;

    #[async_trait]
    impl SomaticPromptRenderer for StaticRenderer {
        async fn render(
            &self,
            _user_message: &str,
            _appraisal: &Appraisal,
        ) -> Result<String, DomainError> {
            Ok("rendered prompt".to_string())
        }
    }

    struct FailingRenderer;

    #[async_trait]
    impl SomaticPromptRenderer for FailingRenderer {
        async fn render(
            &self,
            _user_message: &str,
            _appraisal: &Appraisal,
        ) -> Result<String, DomainError> {
            Err(DomainError::cache("renderer timed out"))
        }
    }

    fn vad(valence: f64, arousal: f64, dominance: f64) -> VadEstimate {
        VadEstimate {
            valence: SignedUnit::clamped(valence),
            arousal: UnitInterval::clamped(arousal),
            dominance: UnitInterval::clamped(dominance),
            confidence: UnitInterval::clamped(0.3),
        }
    }

    fn handler(
        consent: Arc<InMemoryConsentStore>,
        ephemeral: Arc<InMemoryEphemeralStore>,
        renderer: Arc<dyn SomaticPromptRenderer>,
    ) -> EvaluateSomaticTriggerHandler {
        EvaluateSomaticTriggerHandler::new(
            ConsentGate::new(consent),
            ephemeral,
            Arc::new(HeuristicClassifier::new()),
            AppraisalEngine::new(AppraisalParams::default()),
            SomaticTriggerPolicy::default(),
            renderer,
        )
    }

    fn cmd(turn: u64) -> EvaluateSomaticTriggerCommand {
        EvaluateSomaticTriggerCommand {
            user_id: UserId::try_new("u1").unwrap(),
            session_id: SessionId::try_new("s1").unwrap(),
            input: PerceptionInput::new("I can't deal with this deadline"),
            vad: vad(-0.8, 0.9, 0.1),
            current_turn: turn,
        }
    }

    fn consenting_store() -> Arc<InMemoryConsentStore> {
        let store = InMemoryConsentStore::new();
        let mut profile = ConsentProfile::onboarding_default();
        profile.set_permission(&Permission::parse("allowSomaticPrompts"), true);
        store.put(UserId::try_new("u1").unwrap(), profile);
        Arc::new(store)
    }

    #[tokio::test]
    async fn fires_with_consent_and_no_awaiting_flag() {
        let ephemeral = Arc::new(InMemoryEphemeralStore::new());
        let h = handler(consenting_store(), ephemeral.clone(), Arc::new(StaticRenderer));

        let result = h.handle(cmd(10)).await.unwrap();
        assert!(result.should_trigger());
        assert_eq!(result.prompt.as_deref(), Some("rendered prompt"));
        assert!(ephemeral
            .get_flag("session:s1:somaticAwaitingResponse")
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn holds_without_consent() {
        let store = InMemoryConsentStore::new();
        store.put(
            UserId::try_new("u1").unwrap(),
            ConsentProfile::onboarding_default(),
        );
        let ephemeral = Arc::new(InMemoryEphemeralStore::new());
        let h = handler(Arc::new(store), ephemeral.clone(), Arc::new(StaticRenderer));

        let result = h.handle(cmd(10)).await.unwrap();
        assert!(!result.should_trigger());
        assert_eq!(
            result.decision,
            TriggerDecision::Hold(HoldReason::ConsentNotGranted)
        );
        assert!(!ephemeral
            .get_flag("session:s1:somaticAwaitingResponse")
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn turn_while_awaiting_consumes_the_response() {
        let ephemeral = Arc::new(InMemoryEphemeralStore::new());
        ephemeral
            .set_flag("session:s1:somaticAwaitingResponse", true)
            .await
            .unwrap();
        let h = handler(consenting_store(), ephemeral.clone(), Arc::new(StaticRenderer));

        let result = h.handle(cmd(10)).await.unwrap();
        assert_eq!(
            result.decision,
            TriggerDecision::Hold(HoldReason::AlreadyAwaiting)
        );
        // The turn answered the prompt; the machine is back at Idle.
        assert!(!ephemeral
            .get_flag("session:s1:somaticAwaitingResponse")
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn fire_then_respond_then_refire_after_cooldown() {
        let ephemeral = Arc::new(InMemoryEphemeralStore::new());
        let h = handler(consenting_store(), ephemeral.clone(), Arc::new(StaticRenderer));

        assert!(h.handle(cmd(10)).await.unwrap().should_trigger());

        // The next turn is the user's response: it holds but clears the flag.
        let response_turn = h.handle(cmd(11)).await.unwrap();
        assert!(!response_turn.should_trigger());
        assert!(!ephemeral
            .get_flag("session:s1:somaticAwaitingResponse")
            .await
            .unwrap());

        // Past the five-turn cooldown the trigger fires again.
        assert!(h.handle(cmd(16)).await.unwrap().should_trigger());
    }

    #[tokio::test]
    async fn second_call_within_cooldown_holds() {
        let ephemeral = Arc::new(InMemoryEphemeralStore::new());
        let h = handler(consenting_store(), ephemeral.clone(), Arc::new(StaticRenderer));

        assert!(h.handle(cmd(10)).await.unwrap().should_trigger());
        // Turn 11 consumes the response; turn 12 is gated by cooldown alone.
        h.handle(cmd(11)).await.unwrap();

        let result = h.handle(cmd(12)).await.unwrap();
        assert_eq!(
            result.decision,
            TriggerDecision::Hold(HoldReason::CoolingDown)
        );
    }

    #[tokio::test]
    async fn renderer_failure_degrades_to_fallback_prompt() {
        let ephemeral = Arc::new(InMemoryEphemeralStore::new());
        let h = handler(consenting_store(), ephemeral, Arc::new(FailingRenderer));

        let result = h.handle(cmd(10)).await.unwrap();
        assert!(result.should_trigger());
        let prompt = result.prompt.unwrap();
        assert!(!prompt.is_empty());
        assert_ne!(prompt, "rendered prompt");
    }
}
