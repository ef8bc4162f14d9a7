//! Completeness audit for rule tables.
//!
//! The judge never validates its tables on its own; a missing rule is
//! reported the first time it is needed. Employers that prefer to catch
//! gaps at setup time run the audit instead.
//!
//! [`audit`] uses Stillwater's `Validation` to report every gap in one
//! pass instead of stopping at the first.
//!
//! # Example
//!
//! ```rust
//! use verdict::audit::{audit, is_all};
//! use verdict::core::{State, StateField};
//! use verdict::rules::{stay_put, ActionTable, ConditionTable, NoAction};
//! use verdict::state_enum;
//!
//! state_enum! {
//!     enum Light {
//!         Red,
//!         Green,
//!     }
//! }
//!
//! type Crossing = StateField<Light, ()>;
//!
//! let conditions = ConditionTable::<Crossing>::new().condition(Light::Red, stay_put::<Crossing>());
//! let actions = ActionTable::<Crossing>::new()
//!     .action(Light::Red, NoAction)
//!     .action(Light::Green, NoAction);
//!
//! assert!(!is_all(&conditions, &Light::variants()));
//! assert!(is_all(&actions, &Light::variants()));
//! assert!(audit(&conditions, &actions).is_failure());
//! ```

pub mod violations;

pub use violations::AuditError;

use crate::core::{Field, State};
use crate::rules::{ActionTable, ConditionTable, RuleTable};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Whether every state in `states` has a rule in `table`.
///
/// An empty enumeration is trivially covered; an empty table never covers a
/// non-empty enumeration.
pub fn is_all<S: State, R>(table: &RuleTable<S, R>, states: &[S]) -> bool {
    states.iter().all(|state| table.contains(state))
}

/// Check both tables against the full enumeration, accumulating every
/// missing condition and action rule.
pub fn audit<F: Field>(
    conditions: &ConditionTable<F>,
    actions: &ActionTable<F>,
) -> Validation<(), NonEmptyVec<AuditError<F::State>>> {
    let mut checks: Vec<Validation<(), NonEmptyVec<AuditError<F::State>>>> = Vec::new();

    for state in conditions.missing() {
        checks.push(Validation::fail(AuditError::MissingCondition { state }));
    }

    for state in actions.missing() {
        checks.push(Validation::fail(AuditError::MissingAction { state }));
    }

    if checks.is_empty() {
        return Validation::success(());
    }

    Validation::all_vec(checks).map(|_| ())
}
