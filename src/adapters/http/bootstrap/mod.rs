//! Bootstrap HTTP adapter.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::BootstrapAppState;
pub use routes::bootstrap_router;
