//! Fields: the data a state machine carries.
//!
//! A field holds exactly one current state plus whatever variables the
//! owner needs. Only the judge may write the state slot; the [`Seal`]
//! token enforces that at compile time for every caller of
//! [`Field::set_state`].

use super::state::State;

/// Proof that a state write comes from the judge's transition path.
///
/// `Seal` cannot be constructed outside this crate, so implementors of
/// [`Field`] receive one but can never produce one.
#[derive(Debug)]
pub struct Seal {
    _private: (),
}

impl Seal {
    pub(crate) fn new() -> Self {
        Seal { _private: () }
    }
}

/// A value holder owning one current state and arbitrary owner data.
///
/// Implement this for your own field types when the ready-made
/// [`StateField`] does not fit. Keep the state slot private: a field that
/// lets other code write its state bypasses the judge, and the judge will
/// report the mismatch on its next evaluation.
///
/// # Example
///
/// ```rust
/// use verdict::core::{Field, Seal};
/// use verdict::state_enum;
///
/// state_enum! {
///     enum Light {
///         Off,
///         On,
///     }
/// }
///
/// struct Lamp {
///     state: Light,
///     watts: u32,
/// }
///
/// impl Field for Lamp {
///     type State = Light;
///
///     fn state(&self) -> &Light {
///         &self.state
///     }
///
///     fn set_state(&mut self, next: Light, _seal: Seal) {
///         self.state = next;
///     }
/// }
/// ```
pub trait Field {
    /// The closed enumeration this field's state is drawn from.
    type State: State;

    /// Current state.
    fn state(&self) -> &Self::State;

    /// Overwrite the current state. Called only by the judge.
    fn set_state(&mut self, next: Self::State, seal: Seal);
}

/// Ready-made field with a private state slot and owner-defined data.
///
/// The state can be read but never written from outside the judge.
///
/// ```rust
/// use verdict::core::{Field, StateField};
/// use verdict::state_enum;
///
/// state_enum! {
///     enum Phase {
///         Warmup,
///         Live,
///     }
/// }
///
/// let field = StateField::new(Phase::Warmup, 0u32);
/// assert_eq!(field.state(), &Phase::Warmup);
/// assert_eq!(*field.data(), 0);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct StateField<S: State, D> {
    state: S,
    data: D,
}

impl<S: State, D> StateField<S, D> {
    /// Create a field in its initial state.
    pub fn new(initial: S, data: D) -> Self {
        Self {
            state: initial,
            data,
        }
    }

    /// Owner-defined variables.
    pub fn data(&self) -> &D {
        &self.data
    }

    /// Mutable access to owner-defined variables. The state slot stays
    /// out of reach.
    pub fn data_mut(&mut self) -> &mut D {
        &mut self.data
    }

    /// Consume the field, returning its data.
    pub fn into_data(self) -> D {
        self.data
    }
}

impl<S: State, D> Field for StateField<S, D> {
    type State = S;

    fn state(&self) -> &S {
        &self.state
    }

    fn set_state(&mut self, next: S, _seal: Seal) {
        self.state = next;
    }
}
