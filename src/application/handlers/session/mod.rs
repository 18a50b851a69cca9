//! Session mode handlers.

mod session_mode;

pub use session_mode::{GetSessionModeHandler, SetSessionModeHandler, DEFAULT_SESSION_MODE};
