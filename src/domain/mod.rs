//! Domain layer - pure types and rules, no I/O.

pub mod appraisal;
pub mod attachment;
pub mod consent;
pub mod foundation;
pub mod information;
pub mod perception;
pub mod safety;
