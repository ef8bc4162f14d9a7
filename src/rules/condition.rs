//! Condition rules: per-state decisions about the next state.

use crate::core::Field;

/// Decides whether the machine should leave its current state.
///
/// One condition rule is registered per state; the judge consults exactly
/// the rule keyed by the field's current state on each `evaluate()`.
/// Returning `None` means "stay this turn". Returning `Some(s)` requests a
/// transition to `s`, which may equal the current state: a self-transition
/// still runs the destination's `on_transition` hook.
///
/// The field is borrowed immutably, so a condition cannot write the state.
/// `&mut self` lets a rule own and drive a nested judge of its own.
///
/// Any `FnMut(&F) -> Option<F::State>` closure is a condition rule.
///
/// # Example
///
/// ```rust
/// use verdict::core::{Field, StateField};
/// use verdict::rules::ConditionRule;
/// use verdict::state_enum;
///
/// state_enum! {
///     enum Tank {
///         Filling,
///         Full,
///     }
/// }
///
/// let mut rule = |field: &StateField<Tank, u32>| (*field.data() >= 100).then_some(Tank::Full);
///
/// assert_eq!(rule.next_state(&StateField::new(Tank::Filling, 40)), None);
/// assert_eq!(rule.next_state(&StateField::new(Tank::Filling, 100)), Some(Tank::Full));
/// ```
pub trait ConditionRule<F: Field> {
    /// Inspect the field and return the requested next state, if any.
    fn next_state(&mut self, field: &F) -> Option<F::State>;
}

impl<F, C> ConditionRule<F> for C
where
    F: Field,
    C: FnMut(&F) -> Option<F::State>,
{
    fn next_state(&mut self, field: &F) -> Option<F::State> {
        self(field)
    }
}

/// Pure predicate over a field.
pub struct Guard<F: Field> {
    predicate: Box<dyn Fn(&F) -> bool>,
}

impl<F: Field> Guard<F> {
    pub fn new<P>(predicate: P) -> Self
    where
        P: Fn(&F) -> bool + 'static,
    {
        Guard {
            predicate: Box::new(predicate),
        }
    }

    pub fn check(&self, field: &F) -> bool {
        (self.predicate)(field)
    }
}

/// Condition rule made of guarded arms, checked in insertion order.
///
/// The first arm whose guard passes selects the next state; when none
/// pass, the machine stays.
///
/// ```rust
/// use verdict::core::StateField;
/// use verdict::rules::{ConditionRule, Guarded};
/// use verdict::state_enum;
///
/// state_enum! {
///     enum Temp {
///         Cold,
///         Mild,
///         Hot,
///     }
/// }
///
/// type Thermo = StateField<Temp, i32>;
///
/// let mut rule = Guarded::<Thermo>::new()
///     .when(|f: &Thermo| *f.data() > 30, Temp::Hot)
///     .when(|f: &Thermo| *f.data() > 15, Temp::Mild);
///
/// assert_eq!(rule.next_state(&Thermo::new(Temp::Cold, 35)), Some(Temp::Hot));
/// assert_eq!(rule.next_state(&Thermo::new(Temp::Cold, 20)), Some(Temp::Mild));
/// assert_eq!(rule.next_state(&Thermo::new(Temp::Cold, 5)), None);
/// ```
pub struct Guarded<F: Field> {
    arms: Vec<(Guard<F>, F::State)>,
}

impl<F: Field> Guarded<F> {
    pub fn new() -> Self {
        Self { arms: Vec::new() }
    }

    /// Add an arm transitioning to `target` when `predicate` holds.
    pub fn when<P>(mut self, predicate: P, target: F::State) -> Self
    where
        P: Fn(&F) -> bool + 'static,
    {
        self.arms.push((Guard::new(predicate), target));
        self
    }

    /// Add an arm from a prebuilt guard.
    pub fn guard(mut self, guard: Guard<F>, target: F::State) -> Self {
        self.arms.push((guard, target));
        self
    }
}

impl<F: Field> Default for Guarded<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Field> ConditionRule<F> for Guarded<F> {
    fn next_state(&mut self, field: &F) -> Option<F::State> {
        self.arms
            .iter()
            .find(|(guard, _)| guard.check(field))
            .map(|(_, target)| target.clone())
    }
}

/// Condition rule that never leaves its state.
pub fn stay_put<F: Field>() -> impl ConditionRule<F> {
    |_: &F| -> Option<F::State> { None }
}

/// Condition rule that always requests `target`.
pub fn always<F: Field>(target: F::State) -> impl ConditionRule<F> {
    move |_: &F| Some(target.clone())
}
