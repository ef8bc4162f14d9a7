//! The judge: drives one field through its condition and action rules.

use crate::audit::{audit, AuditError};
use crate::core::{Field, Seal, State, StateHistory, StateTransition, TransitionCause};
use crate::judge::error::JudgeError;
use crate::rules::{ActionTable, ConditionTable};
use chrono::Utc;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Outcome of a single `evaluate()` call
#[derive(Clone, Debug, PartialEq)]
pub enum Step<S: State> {
    /// The condition rule returned no next state; `on_stay` ran
    Stayed(S),

    /// The condition rule requested a transition; `on_transition` ran
    Transitioned { from: S, to: S },
}

impl<S: State> Step<S> {
    pub fn is_transition(&self) -> bool {
        matches!(self, Self::Transitioned { .. })
    }

    /// State the machine is in after the step.
    pub fn state(&self) -> &S {
        match self {
            Self::Stayed(state) => state,
            Self::Transitioned { to, .. } => to,
        }
    }
}

/// Orchestrates a field, its condition rules and its action rules.
///
/// The employer (whoever owns the judge) calls [`evaluate`](Self::evaluate)
/// once per turn and may force a transition with
/// [`change_state`](Self::change_state). Both reach the same transition
/// path, so the destination's `on_transition` runs exactly once per state
/// change no matter who asked for it.
///
/// Before every evaluation the judge checks that the field's state still
/// equals the state it last recorded, unless it changed that state itself
/// since the previous evaluation. A mismatch means something outside the
/// judge wrote the state slot and fails the call with
/// [`JudgeError::IllegitimateMutation`]. Only equality against the last
/// recorded state is checked; writes that put back the recorded value, or
/// that happen inside an action hook, go unnoticed.
///
/// # Reentrancy
///
/// `evaluate()` and `change_state()` run to completion. Rules must not call
/// back into the judge that is invoking them. A judge nested inside a field
/// or a rule is a separate machine: its parent drives it explicitly from its
/// own hooks.
///
/// # Example
///
/// ```rust
/// use verdict::core::StateField;
/// use verdict::judge::{Judge, Step};
/// use verdict::rules::{stay_put, ActionFn, ActionTable, ConditionTable, NoAction};
/// use verdict::state_enum;
///
/// state_enum! {
///     enum Kettle {
///         Heating,
///         Boiling,
///     }
/// }
///
/// type Pot = StateField<Kettle, u32>;
///
/// let conditions = ConditionTable::<Pot>::new()
///     .condition(Kettle::Heating, |f: &Pot| (*f.data() >= 100).then_some(Kettle::Boiling))
///     .condition(Kettle::Boiling, stay_put::<Pot>());
/// let actions = ActionTable::<Pot>::new()
///     .action(Kettle::Heating, ActionFn::<Pot>::new().with_on_stay(|f: &mut Pot| *f.data_mut() += 40))
///     .action(Kettle::Boiling, NoAction);
///
/// let mut judge = Judge::new(Pot::new(Kettle::Heating, 20), conditions, actions);
///
/// assert_eq!(judge.evaluate().unwrap(), Step::Stayed(Kettle::Heating)); // 60
/// assert_eq!(judge.evaluate().unwrap(), Step::Stayed(Kettle::Heating)); // 100
/// assert!(judge.evaluate().unwrap().is_transition());
/// assert_eq!(judge.state(), &Kettle::Boiling);
/// ```
pub struct Judge<F: Field> {
    field: F,
    conditions: ConditionTable<F>,
    actions: ActionTable<F>,
    previous_state: F::State,
    changed_this_turn: bool,
    turn: u64,
    history: StateHistory<F::State>,
    record_history: bool,
}

impl<F: Field> Judge<F> {
    /// Create a judge over `field` with the given rule tables.
    ///
    /// The tables are not checked for completeness; a missing rule is
    /// reported when first needed. Use [`JudgeBuilder`] with
    /// `strict(true)` or [`audit`](Self::audit) to check up front.
    ///
    /// [`JudgeBuilder`]: crate::builder::JudgeBuilder
    pub fn new(field: F, conditions: ConditionTable<F>, actions: ActionTable<F>) -> Self {
        let previous_state = field.state().clone();
        Self {
            field,
            conditions,
            actions,
            previous_state,
            changed_this_turn: false,
            turn: 0,
            history: StateHistory::new(),
            record_history: true,
        }
    }

    pub(crate) fn with_history(mut self, record: bool) -> Self {
        self.record_history = record;
        self
    }

    /// Advance the machine by one turn.
    ///
    /// Consults the condition rule of the current state. If it names a next
    /// state, the transition is applied; otherwise the current state's
    /// `on_stay` runs.
    pub fn evaluate(&mut self) -> Result<Step<F::State>, JudgeError<F::State>> {
        let current = self.field.state().clone();

        if current != self.previous_state && !self.changed_this_turn {
            tracing::error!(
                previous = self.previous_state.name(),
                current = current.name(),
                "state changed outside the judge"
            );
            return Err(JudgeError::IllegitimateMutation {
                previous: self.previous_state.clone(),
                current,
            });
        }

        self.changed_this_turn = false;
        self.turn += 1;

        let Some(condition) = self.conditions.get_mut(&current) else {
            tracing::warn!(state = current.name(), "no condition rule registered");
            return Err(JudgeError::MissingConditionRule { state: current });
        };

        let next = condition.next_state(&self.field);
        tracing::trace!(
            turn = self.turn,
            state = current.name(),
            next = ?next,
            "condition evaluated"
        );

        match next {
            Some(next) => {
                self.apply(next.clone(), TransitionCause::Evaluated)?;
                Ok(Step::Transitioned { from: current, to: next })
            }
            None => {
                let Some(action) = self.actions.get_mut(&current) else {
                    tracing::warn!(state = current.name(), "no action rule registered");
                    return Err(JudgeError::MissingActionRule { state: current });
                };

                action.on_stay(&mut self.field);
                self.previous_state = self.field.state().clone();
                tracing::debug!(turn = self.turn, state = current.name(), "stayed");

                Ok(Step::Stayed(current))
            }
        }
    }

    /// Force a transition to `next`, bypassing the condition rule.
    ///
    /// Runs the same transition path as a condition-driven transition:
    /// the state is overwritten, the destination's `on_transition` runs
    /// once with `(current, next)`, and the next `evaluate()` accepts the
    /// new state. `next` may equal the current state.
    pub fn change_state(&mut self, next: F::State) -> Result<(), JudgeError<F::State>> {
        self.apply(next, TransitionCause::Directed)
    }

    // The only writer of the field's state. The write happens before the
    // destination lookup; on a missing rule the bookkeeping is left as it
    // was, so the next `evaluate()` reports the unconsumed write.
    fn apply(
        &mut self,
        next: F::State,
        cause: TransitionCause,
    ) -> Result<(), JudgeError<F::State>> {
        let current = self.field.state().clone();
        self.field.set_state(next.clone(), Seal::new());

        let Some(action) = self.actions.get_mut(&next) else {
            tracing::warn!(
                from = current.name(),
                to = next.name(),
                "no action rule registered for destination"
            );
            return Err(JudgeError::MissingActionRule { state: next });
        };

        action.on_transition(&mut self.field, &current, &next);

        tracing::debug!(
            turn = self.turn,
            from = current.name(),
            to = next.name(),
            cause = ?cause,
            "transitioned"
        );

        if self.record_history {
            self.history.record(StateTransition {
                from: current.clone(),
                to: next,
                cause,
                turn: self.turn,
                timestamp: Utc::now(),
            });
        }

        self.previous_state = current;
        self.changed_this_turn = true;
        Ok(())
    }

    /// Current state of the field.
    pub fn state(&self) -> &F::State {
        self.field.state()
    }

    pub fn field(&self) -> &F {
        &self.field
    }

    /// Mutable access to the field, for feeding owner data between turns.
    ///
    /// Fields that keep their state slot private (such as
    /// [`StateField`](crate::core::StateField)) cannot have their state
    /// written through this. Fields that expose it can, and the next
    /// `evaluate()` reports the write as an illegitimate mutation.
    pub fn field_mut(&mut self) -> &mut F {
        &mut self.field
    }

    /// State recorded before the most recent stay or transition.
    pub fn previous_state(&self) -> &F::State {
        &self.previous_state
    }

    /// Whether the judge applied a transition since the last evaluation
    /// began.
    pub fn changed_this_turn(&self) -> bool {
        self.changed_this_turn
    }

    /// Number of `evaluate()` calls that got past the invariant check.
    pub fn turn(&self) -> u64 {
        self.turn
    }

    pub fn history(&self) -> &StateHistory<F::State> {
        &self.history
    }

    pub fn conditions(&self) -> &ConditionTable<F> {
        &self.conditions
    }

    pub fn actions(&self) -> &ActionTable<F> {
        &self.actions
    }

    /// Whether both tables cover every state.
    pub fn is_complete(&self) -> bool {
        self.conditions.is_complete() && self.actions.is_complete()
    }

    /// Every missing condition and action rule.
    pub fn audit(&self) -> Validation<(), NonEmptyVec<AuditError<F::State>>> {
        audit(&self.conditions, &self.actions)
    }

    pub fn into_field(self) -> F {
        self.field
    }

    pub fn into_parts(self) -> (F, ConditionTable<F>, ActionTable<F>) {
        (self.field, self.conditions, self.actions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{always, stay_put, ActionFn, ActionRule, NoAction};
    use crate::state_enum;

    state_enum! {
        enum Light {
            Red,
            Green,
            Yellow,
        }
    }

    // State slot is public so tests can break the invariant on purpose.
    struct Crossing {
        state: Light,
        ticks: u32,
        log: Vec<String>,
    }

    impl Crossing {
        fn new(state: Light) -> Self {
            Self {
                state,
                ticks: 0,
                log: Vec::new(),
            }
        }
    }

    impl Field for Crossing {
        type State = Light;

        fn state(&self) -> &Light {
            &self.state
        }

        fn set_state(&mut self, next: Light, _seal: Seal) {
            self.state = next;
        }
    }

    struct Logged;

    impl ActionRule<Crossing> for Logged {
        fn on_stay(&mut self, field: &mut Crossing) {
            field.ticks += 1;
            field.log.push(format!("stay {:?}", field.state));
        }

        fn on_transition(&mut self, field: &mut Crossing, from: &Light, to: &Light) {
            field.ticks = 0;
            field.log.push(format!("enter {from:?}->{to:?}"));
        }
    }

    fn logged_actions() -> ActionTable<Crossing> {
        ActionTable::<Crossing>::new()
            .action(Light::Red, Logged)
            .action(Light::Green, Logged)
            .action(Light::Yellow, Logged)
    }

    fn cycling_conditions() -> ConditionTable<Crossing> {
        ConditionTable::<Crossing>::new()
            .condition(Light::Red, |f: &Crossing| (f.ticks >= 2).then_some(Light::Green))
            .condition(Light::Green, |f: &Crossing| (f.ticks >= 1).then_some(Light::Yellow))
            .condition(Light::Yellow, always::<Crossing>(Light::Red))
    }

    fn judge() -> Judge<Crossing> {
        Judge::new(Crossing::new(Light::Red), cycling_conditions(), logged_actions())
    }

    #[test]
    fn new_judge_is_settled_in_initial_state() {
        let judge = judge();
        assert_eq!(judge.state(), &Light::Red);
        assert_eq!(judge.previous_state(), &Light::Red);
        assert!(!judge.changed_this_turn());
        assert_eq!(judge.turn(), 0);
        assert!(judge.history().is_empty());
    }

    #[test]
    fn stay_runs_current_on_stay() {
        let mut judge = judge();

        assert_eq!(judge.evaluate().unwrap(), Step::Stayed(Light::Red));
        assert_eq!(judge.field().ticks, 1);
        assert_eq!(judge.field().log, vec!["stay Red"]);
        assert!(!judge.changed_this_turn());
    }

    #[test]
    fn condition_transition_runs_destination_initializer_once() {
        let mut judge = judge();
        judge.evaluate().unwrap();
        judge.evaluate().unwrap();

        let step = judge.evaluate().unwrap();

        assert_eq!(
            step,
            Step::Transitioned {
                from: Light::Red,
                to: Light::Green
            }
        );
        assert_eq!(judge.state(), &Light::Green);
        assert_eq!(judge.previous_state(), &Light::Red);
        assert!(judge.changed_this_turn());
        assert_eq!(judge.field().ticks, 0);
        assert_eq!(
            judge.field().log,
            vec!["stay Red", "stay Red", "enter Red->Green"]
        );
    }

    #[test]
    fn change_state_matches_condition_path_postconditions() {
        let mut judge = judge();

        judge.change_state(Light::Yellow).unwrap();

        assert_eq!(judge.state(), &Light::Yellow);
        assert_eq!(judge.previous_state(), &Light::Red);
        assert!(judge.changed_this_turn());
        assert_eq!(judge.field().log, vec!["enter Red->Yellow"]);

        let last = judge.history().last().unwrap();
        assert_eq!(last.cause, TransitionCause::Directed);
        assert_eq!((&last.from, &last.to), (&Light::Red, &Light::Yellow));
    }

    #[test]
    fn evaluate_after_change_state_is_legitimate() {
        let mut judge = judge();
        judge.change_state(Light::Green).unwrap();

        // Green with ticks reset to 0 stays once.
        assert_eq!(judge.evaluate().unwrap(), Step::Stayed(Light::Green));
        assert_eq!(judge.previous_state(), &Light::Green);
    }

    #[test]
    fn self_transition_is_a_real_transition() {
        let conditions =
            ConditionTable::<Crossing>::new().condition(Light::Red, always::<Crossing>(Light::Red));
        let mut judge = Judge::new(Crossing::new(Light::Red), conditions, logged_actions());

        let step = judge.evaluate().unwrap();

        assert_eq!(
            step,
            Step::Transitioned {
                from: Light::Red,
                to: Light::Red
            }
        );
        assert_eq!(judge.field().log, vec!["enter Red->Red"]);
        assert!(judge.history().transitions()[0].is_self_transition());
    }

    #[test]
    fn external_write_between_turns_is_detected() {
        let mut judge = judge();
        judge.evaluate().unwrap();

        judge.field_mut().state = Light::Yellow;

        let err = judge.evaluate().unwrap_err();
        assert_eq!(
            err,
            JudgeError::IllegitimateMutation {
                previous: Light::Red,
                current: Light::Yellow
            }
        );
        assert!(!err.is_configuration());
        // The failed call consumed nothing.
        assert_eq!(judge.turn(), 1);
        assert_eq!(judge.field().log, vec!["stay Red"]);
    }

    #[test]
    fn external_write_after_transition_is_detected_next_turn() {
        let mut judge = judge();
        judge.change_state(Light::Green).unwrap();
        judge.evaluate().unwrap();

        judge.field_mut().state = Light::Red;

        assert_eq!(
            judge.evaluate().unwrap_err(),
            JudgeError::IllegitimateMutation {
                previous: Light::Green,
                current: Light::Red
            }
        );
    }

    #[test]
    fn detection_does_not_resynchronize() {
        let mut judge = judge();
        judge.field_mut().state = Light::Green;

        assert!(judge.evaluate().is_err());
        assert!(judge.evaluate().is_err());
    }

    #[test]
    fn write_restoring_recorded_state_goes_unnoticed() {
        let mut judge = judge();
        judge.field_mut().state = Light::Green;
        judge.field_mut().state = Light::Red;

        assert!(judge.evaluate().is_ok());
    }

    #[test]
    fn missing_condition_rule_is_a_lookup_error() {
        let conditions =
            ConditionTable::<Crossing>::new().condition(Light::Red, always::<Crossing>(Light::Green));
        let mut judge = Judge::new(Crossing::new(Light::Red), conditions, logged_actions());
        judge.evaluate().unwrap();

        let err = judge.evaluate().unwrap_err();
        assert_eq!(
            err,
            JudgeError::MissingConditionRule {
                state: Light::Green
            }
        );
        assert!(err.is_configuration());
    }

    #[test]
    fn missing_stay_action_is_a_lookup_error() {
        let conditions = ConditionTable::<Crossing>::new().condition(Light::Red, stay_put::<Crossing>());
        let mut judge = Judge::new(Crossing::new(Light::Red), conditions, ActionTable::<Crossing>::new());

        assert_eq!(
            judge.evaluate().unwrap_err(),
            JudgeError::MissingActionRule { state: Light::Red }
        );
    }

    #[test]
    fn missing_destination_action_writes_state_without_bookkeeping() {
        let actions = ActionTable::<Crossing>::new().action(Light::Red, NoAction);
        let mut judge = Judge::new(Crossing::new(Light::Red), cycling_conditions(), actions);

        assert_eq!(
            judge.change_state(Light::Green).unwrap_err(),
            JudgeError::MissingActionRule {
                state: Light::Green
            }
        );
        assert_eq!(judge.state(), &Light::Green);
        assert_eq!(judge.previous_state(), &Light::Red);
        assert!(!judge.changed_this_turn());
        assert!(judge.history().is_empty());

        assert_eq!(
            judge.evaluate().unwrap_err(),
            JudgeError::IllegitimateMutation {
                previous: Light::Red,
                current: Light::Green
            }
        );
    }

    #[test]
    fn missing_condition_after_transition_is_reported_once() {
        let conditions =
            ConditionTable::<Crossing>::new().condition(Light::Red, always::<Crossing>(Light::Green));
        let mut judge = Judge::new(Crossing::new(Light::Red), conditions, logged_actions());
        judge.evaluate().unwrap();

        assert_eq!(
            judge.evaluate().unwrap_err(),
            JudgeError::MissingConditionRule {
                state: Light::Green
            }
        );
        // The failed turn consumed the transition flag without moving the
        // baseline, so the unacknowledged state now reads as a mutation.
        assert_eq!(judge.previous_state(), &Light::Red);
        assert!(!judge.changed_this_turn());
        assert_eq!(
            judge.evaluate().unwrap_err(),
            JudgeError::IllegitimateMutation {
                previous: Light::Red,
                current: Light::Green
            }
        );
    }

    #[test]
    fn history_tracks_cause_and_turn() {
        let mut judge = judge();
        for _ in 0..3 {
            judge.evaluate().unwrap();
        }
        judge.change_state(Light::Red).unwrap();

        let causes: Vec<_> = judge
            .history()
            .transitions()
            .iter()
            .map(|t| (t.cause, t.turn))
            .collect();
        assert_eq!(
            causes,
            vec![
                (TransitionCause::Evaluated, 3),
                (TransitionCause::Directed, 3)
            ]
        );
        assert_eq!(
            judge.history().get_path(),
            vec![&Light::Red, &Light::Green, &Light::Red]
        );
    }

    #[test]
    fn history_can_be_disabled() {
        let mut judge = judge().with_history(false);
        judge.change_state(Light::Green).unwrap();
        assert!(judge.history().is_empty());
    }

    #[test]
    fn full_cycle_returns_to_red() {
        let mut judge = judge();
        let states: Vec<Light> = (0..6)
            .map(|_| judge.evaluate().unwrap().state().clone())
            .collect();

        assert_eq!(
            states,
            vec![
                Light::Red,
                Light::Red,
                Light::Green,
                Light::Green,
                Light::Yellow,
                Light::Red
            ]
        );
    }

    #[test]
    fn audit_reports_incomplete_tables() {
        let judge = Judge::new(
            Crossing::new(Light::Red),
            ConditionTable::<Crossing>::new(),
            ActionTable::<Crossing>::new().action(
                Light::Red,
                ActionFn::<Crossing>::new().with_on_stay(|f| f.ticks += 1),
            ),
        );

        assert!(!judge.is_complete());
        match judge.audit() {
            Validation::Failure(errors) => assert_eq!(errors.len(), 5),
            Validation::Success(_) => panic!("Expected failures, got success"),
        }
    }

    #[test]
    fn into_field_returns_owner_data() {
        let mut judge = judge();
        judge.evaluate().unwrap();

        let field = judge.into_field();
        assert_eq!(field.ticks, 1);
    }
}
