//! Core data model of a judged state machine.
//!
//! - States via the `State` trait
//! - Fields via the `Field` trait, with `StateField` as a ready-made shape
//! - Ordered history of applied transitions

mod field;
mod history;
mod state;

pub use field::{Field, Seal, StateField};
pub use history::{StateHistory, StateTransition, TransitionCause};
pub use state::State;
