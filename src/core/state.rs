//! Core State trait for judged state machines.
//!
//! A state is a plain tag drawn from a closed enumeration. It carries no
//! behavior of its own; the rules keyed by it do.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::hash::Hash;

/// Trait for state machine states.
///
/// All methods are pure. States are compared by equality and used as keys
/// in rule tables, hence the `Eq + Hash` requirement.
///
/// # Required Traits
///
/// - `Clone`: states are copied into bookkeeping and history
/// - `Eq` + `Hash`: states key the rule tables
/// - `Debug`: states are reported in errors and logs
/// - `Serialize` + `Deserialize`: transition history is serializable
///
/// # Example
///
/// ```rust
/// use verdict::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
/// enum Door {
///     Open,
///     Closed,
///     Locked,
/// }
///
/// impl State for Door {
///     fn name(&self) -> &str {
///         match self {
///             Self::Open => "Open",
///             Self::Closed => "Closed",
///             Self::Locked => "Locked",
///         }
///     }
///
///     fn variants() -> Vec<Self> {
///         vec![Self::Open, Self::Closed, Self::Locked]
///     }
/// }
///
/// assert_eq!(Door::variants().len(), 3);
/// assert_eq!(Door::Locked.name(), "Locked");
/// ```
pub trait State: Clone + Eq + Hash + Debug + Serialize + for<'de> Deserialize<'de> {
    /// Get the state's name for display/logging.
    fn name(&self) -> &str;

    /// Every value of the enumeration, in declaration order.
    ///
    /// Used by the completeness audit and by [`RuleTable::from_fn`] to
    /// build a table covering the whole enumeration.
    ///
    /// [`RuleTable::from_fn`]: crate::rules::RuleTable::from_fn
    fn variants() -> Vec<Self>;

    /// Check if this is a final (terminal) state.
    ///
    /// Purely informational: the judge keeps evaluating final states like
    /// any other. Default implementation returns `false`.
    fn is_final(&self) -> bool {
        false
    }

    /// Check if this is an error state.
    ///
    /// Default implementation returns `false`.
    fn is_error(&self) -> bool {
        false
    }
}
