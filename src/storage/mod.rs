//! Local persistence

pub mod evaluation;

pub use evaluation::{EvaluationEntry, EvaluationStore};
