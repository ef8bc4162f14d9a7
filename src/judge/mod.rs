//! The judge: the single place a field's state changes.
//!
//! # Key Concepts
//!
//! - **Evaluation**: one turn consults exactly one condition rule, the one
//!   keyed by the current state
//! - **Transition path**: condition-driven and employer-directed
//!   transitions share one routine, so the destination's initializer runs
//!   exactly once per change
//! - **Invariant check**: a state that changed without the judge's
//!   involvement fails the next evaluation

mod error;
mod machine;

pub use error::JudgeError;
pub use machine::{Judge, Step};
