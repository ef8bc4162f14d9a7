//! Transition history tracking.
//!
//! Every transition the judge applies, whether chosen by a condition rule
//! or ordered directly by the employer, is recorded here in order.

use super::state::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Who initiated a transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransitionCause {
    /// A condition rule returned a next state during `evaluate()`.
    Evaluated,
    /// The employer called `change_state()` directly.
    Directed,
}

/// Record of a single applied transition.
///
/// # Example
///
/// ```rust
/// use verdict::core::{StateTransition, TransitionCause};
/// use verdict::state_enum;
/// use chrono::Utc;
///
/// state_enum! {
///     enum Step {
///         A,
///         B,
///     }
/// }
///
/// let transition = StateTransition {
///     from: Step::A,
///     to: Step::B,
///     cause: TransitionCause::Evaluated,
///     turn: 1,
///     timestamp: Utc::now(),
/// };
/// assert!(!transition.is_self_transition());
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateTransition<S: State> {
    /// The state being transitioned from
    pub from: S,
    /// The state being transitioned to
    pub to: S,
    /// Whether a condition rule or the employer asked for it
    pub cause: TransitionCause,
    /// Number of `evaluate()` calls completed or in progress when applied
    pub turn: u64,
    /// When the transition was applied
    pub timestamp: DateTime<Utc>,
}

impl<S: State> StateTransition<S> {
    /// A transition back into the state it left.
    pub fn is_self_transition(&self) -> bool {
        self.from == self.to
    }
}

/// Ordered history of applied transitions.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateHistory<S: State> {
    transitions: Vec<StateTransition<S>>,
}

impl<S: State> Default for StateHistory<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> StateHistory<S> {
    /// Create a new empty history.
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
        }
    }

    /// Append a transition.
    pub fn record(&mut self, transition: StateTransition<S>) {
        self.transitions.push(transition);
    }

    /// Get the path of states traversed.
    ///
    /// Returns the `from` state of the first transition followed by the
    /// `to` state of each transition. Empty when nothing was recorded.
    ///
    /// ```rust
    /// use verdict::core::{StateHistory, StateTransition, TransitionCause};
    /// use verdict::state_enum;
    /// use chrono::Utc;
    ///
    /// state_enum! {
    ///     enum Phase {
    ///         One,
    ///         Two,
    ///         Three,
    ///     }
    /// }
    ///
    /// let mut history = StateHistory::new();
    /// for (turn, (from, to)) in [(Phase::One, Phase::Two), (Phase::Two, Phase::Three)]
    ///     .into_iter()
    ///     .enumerate()
    /// {
    ///     history.record(StateTransition {
    ///         from,
    ///         to,
    ///         cause: TransitionCause::Evaluated,
    ///         turn: turn as u64 + 1,
    ///         timestamp: Utc::now(),
    ///     });
    /// }
    ///
    /// assert_eq!(history.get_path(), vec![&Phase::One, &Phase::Two, &Phase::Three]);
    /// ```
    pub fn get_path(&self) -> Vec<&S> {
        let mut path = Vec::new();
        if let Some(first) = self.transitions.first() {
            path.push(&first.from);
        }
        for transition in &self.transitions {
            path.push(&transition.to);
        }
        path
    }

    /// Time between the first and last recorded transition.
    ///
    /// Returns `None` if there are no transitions.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.transitions.first(), self.transitions.last()) {
            let duration = last.timestamp.signed_duration_since(first.timestamp);
            duration.to_std().ok()
        } else {
            None
        }
    }

    /// Get all transitions.
    pub fn transitions(&self) -> &[StateTransition<S>] {
        &self.transitions
    }

    /// Most recent transition.
    pub fn last(&self) -> Option<&StateTransition<S>> {
        self.transitions.last()
    }

    /// Transitions that arrived at `state`.
    pub fn entries_into<'a>(&'a self, state: &'a S) -> impl Iterator<Item = &'a StateTransition<S>> {
        self.transitions.iter().filter(move |t| &t.to == state)
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    pub fn clear(&mut self) {
        self.transitions.clear();
    }
}
