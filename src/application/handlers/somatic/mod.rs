//! Somatic trigger handlers.

mod evaluate_trigger;
mod somatic_state;

pub use evaluate_trigger::{
    EvaluateSomaticTriggerCommand, EvaluateSomaticTriggerHandler, SomaticTriggerResult,
};
pub use somatic_state::{IsAwaitingSomaticResponseHandler, ResetSomaticStateHandler};
