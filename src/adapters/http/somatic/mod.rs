//! Somatic trigger HTTP adapter - direct probes of the trigger state.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::SomaticAppState;
pub use routes::somatic_router;
