//! PostgreSQL adapters for the graph state store and consent profiles.

mod consent_reader;
mod graph_store;

pub use consent_reader::PostgresConsentReader;
pub use graph_store::PostgresGraphStore;
