//! Safety domain - session flags, the distress pause table, and the
//! somatic/distress state machines.

mod distress;
mod flags;
mod somatic;

pub use distress::DistressState;
pub use flags::{session_key, PauseChoice, PauseFlags, SessionFlag, SessionSettings};
pub use somatic::{
    fallback_prompt, HoldReason, SomaticState, SomaticTriggerPolicy, TriggerContext,
    TriggerDecision,
};
