//! Somatic trigger state machine.
//!
//! Decides per turn whether to surface a body-awareness prompt. The
//! decision itself is pure; the awaiting flag lives in the ephemeral store
//! so the machine stays stateless between requests.

use serde::{Deserialize, Serialize};

use crate::domain::appraisal::Appraisal;
use crate::domain::foundation::{StateMachine, UnitInterval};

/// Lifecycle of the somatic prompt for one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SomaticState {
    Idle,
    AwaitingResponse,
}

impl SomaticState {
    /// Derives the state from the awaiting flag.
    pub fn from_awaiting_flag(awaiting: bool) -> Self {
        if awaiting {
            SomaticState::AwaitingResponse
        } else {
            SomaticState::Idle
        }
    }
}

impl StateMachine for SomaticState {
    fn can_transition_to(&self, target: &Self) -> bool {
        matches!(
            (self, target),
            (SomaticState::Idle, SomaticState::AwaitingResponse)
                | (SomaticState::AwaitingResponse, SomaticState::Idle)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        match self {
            SomaticState::Idle => vec![SomaticState::AwaitingResponse],
            SomaticState::AwaitingResponse => vec![SomaticState::Idle],
        }
    }
}

/// Why a trigger evaluation held back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HoldReason {
    ConsentNotGranted,
    AlreadyAwaiting,
    DistressCheckPending,
    BelowThreshold,
    CoolingDown,
}

/// Outcome of one trigger evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TriggerDecision {
    Fire,
    Hold(HoldReason),
}

impl TriggerDecision {
    pub fn should_fire(&self) -> bool {
        matches!(self, TriggerDecision::Fire)
    }
}

/// Everything the policy needs to decide one turn.
#[derive(Debug, Clone, Copy)]
pub struct TriggerContext {
    pub consent_granted: bool,
    pub already_awaiting: bool,
    pub distress_check_pending: bool,
    pub appraisal: Appraisal,
    pub arousal: UnitInterval,
    pub current_turn: u64,
    pub last_prompt_turn: Option<u64>,
}

/// Configured thresholds for the somatic trigger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SomaticTriggerPolicy {
    /// Minimum arousal for a prompt to be worth surfacing.
    #[serde(default = "default_arousal_threshold")]
    pub arousal_threshold: f64,
    /// Minimum appraised power level.
    #[serde(default = "default_power_threshold")]
    pub power_threshold: f64,
    /// Minimum turns between prompts in one session.
    #[serde(default = "default_cooldown_turns")]
    pub cooldown_turns: u64,
}

fn default_arousal_threshold() -> f64 {
    0.65
}

fn default_power_threshold() -> f64 {
    0.5
}

fn default_cooldown_turns() -> u64 {
    5
}

impl Default for SomaticTriggerPolicy {
    fn default() -> Self {
        Self {
            arousal_threshold: default_arousal_threshold(),
            power_threshold: default_power_threshold(),
            cooldown_turns: default_cooldown_turns(),
        }
    }
}

impl SomaticTriggerPolicy {
    /// Evaluates one turn. Gate order: consent, in-flight interventions,
    /// threshold, cooldown. Confidence does not gate the trigger; a
    /// low-confidence but high-arousal turn still fires.
    pub fn evaluate(&self, ctx: &TriggerContext) -> TriggerDecision {
        if !ctx.consent_granted {
            return TriggerDecision::Hold(HoldReason::ConsentNotGranted);
        }
        if ctx.distress_check_pending {
            return TriggerDecision::Hold(HoldReason::DistressCheckPending);
        }
        if ctx.already_awaiting {
            return TriggerDecision::Hold(HoldReason::AlreadyAwaiting);
        }
        let crosses = ctx.arousal.value() >= self.arousal_threshold
            && ctx.appraisal.power_level.value() >= self.power_threshold;
        if !crosses {
            return TriggerDecision::Hold(HoldReason::BelowThreshold);
        }
        if let Some(last) = ctx.last_prompt_turn {
            if ctx.current_turn.saturating_sub(last) < self.cooldown_turns {
                return TriggerDecision::Hold(HoldReason::CoolingDown);
            }
        }
        TriggerDecision::Fire
    }
}

/// Static fallback prompts, used when the external renderer is
/// unavailable or times out.
pub fn fallback_prompt(arousal: UnitInterval) -> &'static str {
    if arousal.value() >= 0.85 {
        "Let's pause for a moment. Where in your body do you feel this most strongly right now?"
    } else {
        "Taking a breath - is there anywhere in your body that's holding what you just described?"
    }
}
