//! Condition and action rules, and the tables that key them by state.
//!
//! A judged machine registers one condition rule and one action rule per
//! state. Condition rules decide; action rules act.

mod action;
mod condition;
mod table;

pub use action::{ActionFn, ActionRule, NoAction};
pub use condition::{always, stay_put, ConditionRule, Guard, Guarded};
pub use table::{ActionTable, ConditionTable, RuleTable};
