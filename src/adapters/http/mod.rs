//! HTTP adapters - REST API implementations.
//!
//! Each resource has its own dto/handlers/routes module; `router` wires
//! them into one application router behind the auth middleware.

pub mod bootstrap;
pub mod error;
pub mod json;
pub mod middleware;
pub mod router;
pub mod session;
pub mod somatic;

pub use bootstrap::BootstrapAppState;
pub use router::app_router;
pub use session::SessionAppState;
pub use somatic::SomaticAppState;
