//! Distress flow and pause-flag handlers.

mod apply_pause_choice;
mod get_session_settings;
mod trigger_distress_check;
mod update_pause_settings;

pub use apply_pause_choice::{ApplyPauseChoiceCommand, ApplyPauseChoiceHandler};
pub use get_session_settings::GetSessionSettingsHandler;
pub use trigger_distress_check::{DistressCheckOutcome, TriggerDistressCheckHandler};
pub use update_pause_settings::{
    UpdatePauseSettingsCommand, UpdatePauseSettingsHandler, UpdatePauseSettingsResult,
};
