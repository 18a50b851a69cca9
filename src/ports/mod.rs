//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `GraphStateStore` - user/attachment/event persistence with
//!   per-call transactional semantics
//! - `EphemeralStore` - TTL'd key/value store for session safety flags
//! - `ConsentReader` - consent profile lookup for the consent gate
//! - `PerceptionClassifier` / `ModelAssistedClassifier` - the two-tier
//!   classification strategy
//! - `SomaticPromptRenderer` - external prompt rendering with fallback
//! - `SessionValidator` - bearer token validation for HTTP auth

mod classifier;
mod consent_reader;
mod ephemeral_store;
mod graph_store;
mod prompt_renderer;
mod session_validator;

pub use classifier::{ModelAssistedClassifier, PerceptionClassifier};
pub use consent_reader::ConsentReader;
pub use ephemeral_store::{EphemeralStore, FLAG_TTL_SECS};
pub use graph_store::GraphStateStore;
pub use prompt_renderer::SomaticPromptRenderer;
pub use session_validator::SessionValidator;
