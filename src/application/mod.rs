//! Application layer - command/query handlers and the consent gate.

mod consent_gate;
pub mod handlers;

pub use consent_gate::ConsentGate;
