//! Rule-based lexical classifier.
//!
//! Matches lowercase cue phrases and the precomputed feature counts
//! against each MHH variable independently. Deterministic: the same
//! input always yields the same classification. Ambiguity lands on the
//! uncertain/both/present defaults at low confidence instead of erroring.

use async_trait::async_trait;

use crate::domain::foundation::UnitInterval;
use crate::domain::perception::{
    AcceptanceState, MhhVariables, PerceptionInput, PerceptionSource, Perspective, Scored,
    Timeframe,
};
use crate::ports::PerceptionClassifier;

const HEDGE_CUES: &[&str] = &[
    "maybe",
    "perhaps",
    "i guess",
    "i suppose",
    "not sure",
    "sort of",
    "kind of",
    "i don't know",
];

const RESIST_CUES: &[&str] = &[
    "can't stand",
    "hate",
    "refuse",
    "won't accept",
    "shouldn't have",
    "it's not fair",
    "don't want",
    "wish it",
];

const ACCEPT_CUES: &[&str] = &[
    "i accept",
    "i've accepted",
    "at peace",
    "made peace",
    "it is what it is",
    "i'm okay with",
    "fine with it",
];

const PAST_CUES: &[&str] = &["yesterday", "last week", "last year", "used to", "back then", " ago"];

const FUTURE_CUES: &[&str] = &["tomorrow", "next week", "going to", "will be", "worried about", "soon"];

const EXTERNAL_CUES: &[&str] = &[
    "my boss",
    "my partner",
    "my job",
    "at work",
    "the news",
    "traffic",
    "they keep",
    "people keep",
];

const VALUE_SELF_CUES: &[&str] = &[
    "i'm a failure",
    "i am a failure",
    "i'm worthless",
    "i'm not good enough",
    "who i am",
    "the kind of person i am",
];

const OTHER_CUES: &[&str] = &["he ", "she ", "they ", "my boss", "my partner", "my friend"];

const SELF_CUES: &[&str] = &["i ", "i'm", "i've", "me ", "my ", "myself"];

fn count_cues(text: &str, cues: &[&str]) -> u32 {
    cues.iter().filter(|cue| text.contains(*cue)).count() as u32
}

/// Confidence grows with the number of independent cues agreeing, and
/// never reaches certainty from lexical evidence alone.
fn cue_confidence(hits: u32) -> UnitInterval {
    UnitInterval::clamped(0.4 + 0.15 * f64::from(hits.min(3)))
}

/// Deterministic lexical-cue classifier. The first escalation tier.
pub struct HeuristicClassifier;

impl HeuristicClassifier {
    pub fn new() -> Self {
        Self
    }

    fn classify_acceptance(text: &str, input: &PerceptionInput) -> Scored<AcceptanceState> {
        let hedges = count_cues(text, HEDGE_CUES) + input.features.hedge_count;
        let resists = count_cues(text, RESIST_CUES)
            + if input.features.negation_count >= 2 { 1 } else { 0 };
        let accepts = count_cues(text, ACCEPT_CUES);

        // Hedging dominates: a hedged resistance is still uncertain.
        if hedges > 0 && hedges >= resists && hedges >= accepts {
            return Scored::new(AcceptanceState::Uncertain, cue_confidence(hedges));
        }
        if resists > accepts {
            return Scored::new(AcceptanceState::Resisted, cue_confidence(resists));
        }
        if accepts > 0 {
            return Scored::new(AcceptanceState::Accepted, cue_confidence(accepts));
        }
        Scored::new(AcceptanceState::Uncertain, UnitInterval::clamped(0.2))
    }

    fn classify_timeframe(text: &str, input: &PerceptionInput) -> Scored<Timeframe> {
        let past = count_cues(text, PAST_CUES) + input.features.past_tense_count;
        let future = count_cues(text, FUTURE_CUES) + input.features.future_marker_count;
        if past > future && past > 0 {
            return Scored::new(Timeframe::Past, cue_confidence(past));
        }
        if future > past && future > 0 {
            return Scored::new(Timeframe::Future, cue_confidence(future));
        }
        Scored::new(Timeframe::Present, UnitInterval::clamped(0.3))
    }

    fn classify_perspective(text: &str, input: &PerceptionInput) -> Scored<Perspective> {
        let first = count_cues(text, SELF_CUES) + input.features.first_person_count;
        let second = count_cues(text, OTHER_CUES) + input.features.second_person_count;
        match (first > 0, second > 0) {
            (true, true) => Scored::new(Perspective::Both, cue_confidence(first.min(second))),
            (true, false) => Scored::new(Perspective::SelfOnly, cue_confidence(first)),
            (false, true) => Scored::new(Perspective::Other, cue_confidence(second)),
            (false, false) => Scored::new(Perspective::Both, UnitInterval::clamped(0.2)),
        }
    }

    fn classify_source(text: &str) -> Scored<PerceptionSource> {
        let value_self = count_cues(text, VALUE_SELF_CUES);
        if value_self > 0 {
            return Scored::new(PerceptionSource::ValueSelf, cue_confidence(value_self));
        }
        let external = count_cues(text, EXTERNAL_CUES);
        if external > 0 {
            return Scored::new(PerceptionSource::External, cue_confidence(external));
        }
        Scored::new(PerceptionSource::Internal, UnitInterval::clamped(0.3))
    }
}

impl Default for HeuristicClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PerceptionClassifier for HeuristicClassifier {
    async fn classify(&self, input: &PerceptionInput) -> MhhVariables {
        let text = input.utterance.to_lowercase();
        MhhVariables {
            source: Self::classify_source(&text),
            perspective: Self::classify_perspective(&text, input),
            timeframe: Self::classify_timeframe(&text, input),
            acceptance_state: Self::classify_acceptance(&text, input),
        }
    }
}
