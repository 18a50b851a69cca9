//! Appraisal engine - turns a classified perception plus a VAD estimate
//! into a valuation-shift/power/confidence summary.
//!
//! The acceptance scaling curve and the arousal/dominance weights are
//! configuration (`AppraisalParams`), not hard-coded business logic.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{SignedUnit, UnitInterval};
use crate::domain::perception::{AcceptanceState, MhhVariables};

/// Valence/arousal/dominance estimate from the upstream affect model.
///
/// Valence is normalized to [-1, 1]; arousal and dominance to [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VadEstimate {
    pub valence: SignedUnit,
    pub arousal: UnitInterval,
    pub dominance: UnitInterval,
    pub confidence: UnitInterval,
}

/// Derived per-turn summary of a perception's impact.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Appraisal {
    pub valuation_shift_estimate: SignedUnit,
    pub power_level: UnitInterval,
    pub appraisal_confidence: UnitInterval,
}

/// How classifier and VAD confidences combine into the appraisal confidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceCombiner {
    Product,
    Min,
}

/// Tunable parameter table for the appraisal curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppraisalParams {
    /// Multiplier applied to valence when the perception is accepted.
    #[serde(default = "default_accepted_factor")]
    pub accepted_factor: f64,
    /// Multiplier when resisted; negative values invert the shift.
    #[serde(default = "default_resisted_factor")]
    pub resisted_factor: f64,
    /// Multiplier when the acceptance state is uncertain.
    #[serde(default = "default_uncertain_factor")]
    pub uncertain_factor: f64,
    /// Weight of arousal in the power derivation.
    #[serde(default = "default_arousal_weight")]
    pub arousal_weight: f64,
    /// Weight of dominance in the power derivation.
    #[serde(default = "default_dominance_weight")]
    pub dominance_weight: f64,
    #[serde(default = "default_combiner")]
    pub confidence_combiner: ConfidenceCombiner,
}

fn default_accepted_factor() -> f64 {
    1.0
}

fn default_resisted_factor() -> f64 {
    -0.6
}

fn default_uncertain_factor() -> f64 {
    0.4
}

fn default_arousal_weight() -> f64 {
    0.7
}

fn default_dominance_weight() -> f64 {
    0.3
}

fn default_combiner() -> ConfidenceCombiner {
    ConfidenceCombiner::Product
}

impl Default for AppraisalParams {
    fn default() -> Self {
        Self {
            accepted_factor: default_accepted_factor(),
            resisted_factor: default_resisted_factor(),
            uncertain_factor: default_uncertain_factor(),
            arousal_weight: default_arousal_weight(),
            dominance_weight: default_dominance_weight(),
            confidence_combiner: default_combiner(),
        }
    }
}

impl AppraisalParams {
    fn acceptance_factor(&self, state: AcceptanceState) -> f64 {
        match state {
            AcceptanceState::Accepted => self.accepted_factor,
            AcceptanceState::Resisted => self.resisted_factor,
            AcceptanceState::Uncertain => self.uncertain_factor,
        }
    }
}

/// Stateless appraisal computation over a parameter table.
#[derive(Debug, Clone)]
pub struct AppraisalEngine {
    params: AppraisalParams,
}

impl AppraisalEngine {
    pub fn new(params: AppraisalParams) -> Self {
        Self { params }
    }

    /// Appraises one classified perception against its VAD estimate.
    ///
    /// All outputs are clipped into their documented ranges; the appraisal
    /// confidence never exceeds either input confidence.
    pub fn appraise(&self, mhh: &MhhVariables, vad: &VadEstimate) -> Appraisal {
        let factor = self.params.acceptance_factor(mhh.acceptance_state.value);
        let shift = SignedUnit::clamped(vad.valence.value() * factor);

        let power = UnitInterval::clamped(
            self.params.arousal_weight * vad.arousal.value()
                + self.params.dominance_weight * vad.dominance.value(),
        );

        let classifier_confidence = mhh.overall_confidence();
        let confidence = match self.params.confidence_combiner {
            ConfidenceCombiner::Product => classifier_confidence.product(vad.confidence),
            ConfidenceCombiner::Min => classifier_confidence.min(vad.confidence),
        };

        Appraisal {
            valuation_shift_estimate: shift,
            power_level: power,
            appraisal_confidence: confidence,
        }
    }
}
