//! Command/query handlers, one per operation.

pub mod bootstrap;
pub mod safety;
pub mod session;
pub mod somatic;
