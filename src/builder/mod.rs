//! Builder API for ergonomic judge construction.
//!
//! This module provides a fluent builder and a macro for declaring state
//! enumerations with minimal boilerplate.

pub mod error;
pub mod judge;
pub mod macros;

pub use error::BuildError;
pub use judge::JudgeBuilder;
