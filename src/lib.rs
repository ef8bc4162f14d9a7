//! Verdict: a field/rule/judge state machine container
//!
//! Verdict separates what a machine *is* from how it *moves*:
//!
//! - **Field**: the current state plus the owner's data
//! - **Condition rule**: per state, decides whether to transition
//! - **Action rule**: per state, acts on a stay or on arrival
//! - **Judge**: the only writer of the field's state; evaluates one turn at
//!   a time and detects state writes it did not make
//!
//! The code that owns a judge (the *employer*) builds the field and the rule
//! tables, calls [`Judge::evaluate`] once per turn and may force a
//! transition with [`Judge::change_state`]. Both routes run the same
//! transition path, so a state's initializer runs exactly once per entry.
//!
//! Fields and rules may own judges of their own, giving hierarchical
//! machines; each parent drives its children from its own hooks.
//!
//! Everything is synchronous and single threaded. There is no scheduling,
//! persistence or I/O.
//!
//! # Example
//!
//! ```rust
//! use verdict::core::StateField;
//! use verdict::rules::{ActionFn, ActionTable, ConditionTable, NoAction, stay_put};
//! use verdict::{state_enum, Judge};
//!
//! state_enum! {
//!     enum Task {
//!         Idle,
//!         Running,
//!         Done,
//!     }
//!     final: [Done]
//! }
//!
//! type Worker = StateField<Task, u32>;
//!
//! let conditions = ConditionTable::<Worker>::new()
//!     .condition(Task::Idle, |f: &Worker| (*f.data() >= 3).then_some(Task::Running))
//!     .condition(Task::Running, stay_put::<Worker>())
//!     .condition(Task::Done, stay_put::<Worker>());
//!
//! let actions = ActionTable::<Worker>::new()
//!     .action(Task::Idle, ActionFn::<Worker>::new().with_on_stay(|f| *f.data_mut() += 1))
//!     .action(Task::Running, ActionFn::<Worker>::new().with_on_transition(|f, _, _| *f.data_mut() = 0))
//!     .action(Task::Done, NoAction);
//!
//! let mut judge = Judge::new(Worker::new(Task::Idle, 1), conditions, actions);
//! for _ in 0..3 {
//!     judge.evaluate()?;
//! }
//!
//! assert_eq!(judge.state(), &Task::Running);
//! assert_eq!(*judge.field().data(), 0);
//! # Ok::<(), verdict::JudgeError<Task>>(())
//! ```

pub mod audit;
pub mod builder;
pub mod core;
pub mod judge;
pub mod rules;

// Re-export commonly used types
pub use crate::audit::{audit, is_all, AuditError};
pub use crate::builder::{BuildError, JudgeBuilder};
pub use crate::core::{Field, State, StateField, StateHistory, StateTransition, TransitionCause};
pub use crate::judge::{Judge, JudgeError, Step};
pub use crate::rules::{ActionFn, ActionRule, ActionTable, ConditionRule, ConditionTable, RuleTable};
