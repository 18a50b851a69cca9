//! Perception types - the MHH variables extracted per conversational turn.
//!
//! A perception is transient: classified, appraised, consumed by the
//! somatic trigger, and dropped unless explicitly logged upstream.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::UnitInterval;

/// Where the perceived event originates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PerceptionSource {
    Internal,
    External,
    ValueSelf,
}

/// Whose experience the perception concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Perspective {
    #[serde(rename = "self")]
    SelfOnly,
    Other,
    Both,
}

/// When the perceived event sits in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Timeframe {
    Past,
    Present,
    Future,
}

/// How the user relates to the perceived event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AcceptanceState {
    Accepted,
    Resisted,
    Uncertain,
}

/// A classified value paired with the classifier's confidence in it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scored<T> {
    pub value: T,
    pub confidence: UnitInterval,
}

impl<T> Scored<T> {
    pub fn new(value: T, confidence: UnitInterval) -> Self {
        Self { value, confidence }
    }
}

/// The four MHH variables for one perception, each with a confidence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MhhVariables {
    pub source: Scored<PerceptionSource>,
    pub perspective: Scored<Perspective>,
    pub timeframe: Scored<Timeframe>,
    pub acceptance_state: Scored<AcceptanceState>,
}

impl MhhVariables {
    /// The fallback classification when cues are ambiguous or the
    /// classifier degrades: uncertain/both/present at low confidence.
    pub fn low_confidence_default() -> Self {
        let low = UnitInterval::clamped(0.2);
        Self {
            source: Scored::new(PerceptionSource::Internal, low),
            perspective: Scored::new(Perspective::Both, low),
            timeframe: Scored::new(Timeframe::Present, low),
            acceptance_state: Scored::new(AcceptanceState::Uncertain, low),
        }
    }

    /// The weakest confidence across the four variables.
    ///
    /// Downstream appraisal must never report more certainty than the
    /// least certain classification.
    pub fn overall_confidence(&self) -> UnitInterval {
        self.source
            .confidence
            .min(self.perspective.confidence)
            .min(self.timeframe.confidence)
            .min(self.acceptance_state.confidence)
    }
}

/// Precomputed lexical features supplied by the upstream NLP layer.
///
/// This core never tokenizes or tags text itself; it consumes counts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LexicalFeatures {
    pub hedge_count: u32,
    pub negation_count: u32,
    pub first_person_count: u32,
    pub second_person_count: u32,
    pub past_tense_count: u32,
    pub future_marker_count: u32,
}

/// The classifier's input: raw utterance plus precomputed features.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerceptionInput {
    pub utterance: String,
    #[serde(default)]
    pub features: LexicalFeatures,
}

impl PerceptionInput {
    pub fn new(utterance: impl Into<String>) -> Self {
        Self {
            utterance: utterance.into(),
            features: LexicalFeatures::default(),
        }
    }

    pub fn with_features(mut self, features: LexicalFeatures) -> Self {
        self.features = features;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_classification_is_uncertain_both_present() {
        let mhh = MhhVariables::low_confidence_default();
        assert_eq!(mhh.acceptance_state.value, AcceptanceState::Uncertain);
        assert_eq!(mhh.perspective.value, Perspective::Both);
        assert_eq!(mhh.timeframe.value, Timeframe::Present);
        assert!(mhh.overall_confidence().value() <= 0.2);
    }

    #[test]
    fn overall_confidence_is_the_minimum() {
        let mut mhh = MhhVariables::low_confidence_default();
        mhh.source.confidence = UnitInterval::clamped(0.9);
        mhh.timeframe.confidence = UnitInterval::clamped(0.05);
        assert_eq!(mhh.overall_confidence().value(), 0.05);
    }

    #[test]
    fn enums_serialize_camel_case() {
        assert_eq!(
            serde_json::to_string(&PerceptionSource::ValueSelf).unwrap(),
            "\"valueSelf\""
        );
        assert_eq!(
            serde_json::to_string(&AcceptanceState::Resisted).unwrap(),
            "\"resisted\""
        );
    }
}
