//! Adapters - implementations of the ports for real backends, plus
//! in-memory fakes for tests and local development.

pub mod classifier;
pub mod http;
pub mod memory;
pub mod postgres;
pub mod redis_store;
pub mod renderer;
