//! In-memory adapters - used by tests and single-process development runs.

mod auth;
mod consent;
mod ephemeral;
mod graph_store;

pub use auth::MockSessionValidator;
pub use consent::InMemoryConsentStore;
pub use ephemeral::InMemoryEphemeralStore;
pub use graph_store::InMemoryGraphStore;
