//! Redis-backed ephemeral store.

mod ephemeral;

pub use ephemeral::RedisEphemeralStore;
