//! Errors raised while a judge evaluates or transitions.

use crate::core::State;
use thiserror::Error;

/// Errors that can occur during `evaluate()` and `change_state()`
#[derive(Debug, Clone, Error, PartialEq)]
pub enum JudgeError<S: State> {
    /// The field's state no longer matches what the judge last recorded,
    /// and the judge did not make the change itself.
    #[error(
        "State changed outside the judge: expected '{}', found '{}'",
        .previous.name(),
        .current.name()
    )]
    IllegitimateMutation { previous: S, current: S },

    #[error("No condition rule registered for state '{}'", .state.name())]
    MissingConditionRule { state: S },

    #[error("No action rule registered for state '{}'", .state.name())]
    MissingActionRule { state: S },
}

impl<S: State> JudgeError<S> {
    /// Whether this error comes from an incomplete rule table rather than
    /// from a broken state invariant.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::MissingConditionRule { .. } | Self::MissingActionRule { .. }
        )
    }
}
