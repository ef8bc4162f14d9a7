//! Gaps found by the completeness audit.

use crate::core::State;
use thiserror::Error;

/// A state with no registered rule
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AuditError<S: State> {
    #[error("No condition rule registered for state '{}'", .state.name())]
    MissingCondition { state: S },

    #[error("No action rule registered for state '{}'", .state.name())]
    MissingAction { state: S },
}

impl<S: State> AuditError<S> {
    /// The uncovered state.
    pub fn state(&self) -> &S {
        match self {
            Self::MissingCondition { state } | Self::MissingAction { state } => state,
        }
    }
}
