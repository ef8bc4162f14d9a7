//! Builder for configuring judges.

use crate::audit::audit;
use crate::builder::error::BuildError;
use crate::core::Field;
use crate::judge::Judge;
use crate::rules::{ActionRule, ActionTable, ConditionRule, ConditionTable};
use stillwater::validation::Validation;

/// Builder for configuring a judge with a fluent API.
///
/// Unlike [`Judge::new`], the builder can audit the rule tables before
/// handing out a judge: with `strict(true)`, any state lacking a condition
/// or action rule fails the build with every gap listed.
pub struct JudgeBuilder<F: Field> {
    field: Option<F>,
    conditions: ConditionTable<F>,
    actions: ActionTable<F>,
    strict: bool,
    record_history: bool,
}

impl<F: Field> JudgeBuilder<F> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            field: None,
            conditions: ConditionTable::<F>::new(),
            actions: ActionTable::<F>::new(),
            strict: false,
            record_history: true,
        }
    }

    /// Set the field to judge (required).
    pub fn field(mut self, field: F) -> Self {
        self.field = Some(field);
        self
    }

    /// Register the condition rule for `state`.
    pub fn condition<C>(mut self, state: F::State, rule: C) -> Self
    where
        C: ConditionRule<F> + 'static,
    {
        self.conditions.insert(state, Box::new(rule));
        self
    }

    /// Register the action rule for `state`.
    pub fn action<A>(mut self, state: F::State, rule: A) -> Self
    where
        A: ActionRule<F> + 'static,
    {
        self.actions.insert(state, Box::new(rule));
        self
    }

    /// Replace all condition rules with a prebuilt table.
    pub fn conditions(mut self, table: ConditionTable<F>) -> Self {
        self.conditions = table;
        self
    }

    /// Replace all action rules with a prebuilt table.
    pub fn actions(mut self, table: ActionTable<F>) -> Self {
        self.actions = table;
        self
    }

    /// Require both tables to cover every state at build time.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Record applied transitions in the judge's history (default: on).
    pub fn record_history(mut self, record: bool) -> Self {
        self.record_history = record;
        self
    }

    /// Build the judge.
    /// Returns an error if the field is missing, or if `strict` is set and
    /// a rule is missing.
    pub fn build(self) -> Result<Judge<F>, BuildError<F::State>> {
        let field = self.field.ok_or(BuildError::MissingField)?;

        if self.strict {
            if let Validation::Failure(errors) = audit(&self.conditions, &self.actions) {
                tracing::warn!(missing = errors.len(), "refusing to build incomplete judge");
                return Err(BuildError::Incomplete(errors.iter().cloned().collect()));
            }
        }

        Ok(Judge::new(field, self.conditions, self.actions).with_history(self.record_history))
    }
}

impl<F: Field> Default for JudgeBuilder<F> {
    fn default() -> Self {
        Self::new()
    }
}
