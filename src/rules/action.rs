//! Action rules: per-state behavior on stay and on arrival.

use crate::core::Field;

/// Side effects tied to one state.
///
/// - `on_stay` runs on a turn where the current state's condition rule
///   returned no next state. It is keyed by the current state.
/// - `on_transition` runs exactly once right after the judge overwrote the
///   state. It is keyed by the destination state and receives both
///   endpoints, so an initializer can branch on where the machine came from.
///
/// Both hooks may change any owner data in the field. Neither must write the
/// state slot, and neither must call back into the judge that invoked it.
///
/// Both hooks default to doing nothing.
pub trait ActionRule<F: Field> {
    fn on_stay(&mut self, _field: &mut F) {}

    fn on_transition(&mut self, _field: &mut F, _from: &F::State, _to: &F::State) {}
}

/// Action rule with no behavior.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoAction;

impl<F: Field> ActionRule<F> for NoAction {}

type StayHook<F> = Box<dyn FnMut(&mut F)>;
type TransitionHook<F> =
    Box<dyn FnMut(&mut F, &<F as Field>::State, &<F as Field>::State)>;

/// Action rule assembled from closures.
///
/// Missing hooks do nothing.
///
/// # Example
///
/// ```rust
/// use verdict::core::StateField;
/// use verdict::rules::{ActionFn, ActionRule};
/// use verdict::state_enum;
///
/// state_enum! {
///     enum Door {
///         Open,
///         Closed,
///     }
/// }
///
/// type Doorway = StateField<Door, Vec<String>>;
///
/// let mut action = ActionFn::<Doorway>::new()
///     .with_on_stay(|f| f.data_mut().push("still open".into()))
///     .with_on_transition(|f, from, to| f.data_mut().push(format!("{from:?} -> {to:?}")));
///
/// let mut field = Doorway::new(Door::Open, Vec::new());
/// action.on_stay(&mut field);
/// action.on_transition(&mut field, &Door::Closed, &Door::Open);
///
/// assert_eq!(field.data(), &vec!["still open".to_string(), "Closed -> Open".to_string()]);
/// ```
pub struct ActionFn<F: Field> {
    stay: Option<StayHook<F>>,
    transition: Option<TransitionHook<F>>,
}

impl<F: Field> ActionFn<F> {
    pub fn new() -> Self {
        Self {
            stay: None,
            transition: None,
        }
    }

    /// Set the hook run on turns without a transition.
    pub fn with_on_stay<H>(mut self, hook: H) -> Self
    where
        H: FnMut(&mut F) + 'static,
    {
        self.stay = Some(Box::new(hook));
        self
    }

    /// Set the hook run when this state is entered.
    pub fn with_on_transition<H>(mut self, hook: H) -> Self
    where
        H: FnMut(&mut F, &F::State, &F::State) + 'static,
    {
        self.transition = Some(Box::new(hook));
        self
    }
}

impl<F: Field> Default for ActionFn<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Field> ActionRule<F> for ActionFn<F> {
    fn on_stay(&mut self, field: &mut F) {
        if let Some(hook) = self.stay.as_mut() {
            hook(field);
        }
    }

    fn on_transition(&mut self, field: &mut F, from: &F::State, to: &F::State) {
        if let Some(hook) = self.transition.as_mut() {
            hook(field, from, to);
        }
    }
}
