//! Perception classifier adapters.

mod escalating;
mod heuristic;

pub use escalating::EscalatingClassifier;
pub use heuristic::HeuristicClassifier;
