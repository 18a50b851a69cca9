//! Session HTTP adapter - mode, pause settings, distress resolution.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::SessionAppState;
pub use routes::session_router;
