//! Centralized state management.
//!
//! State flows one way: views dispatch an [`Action`], every slice reducer
//! folds it into its own state, the view re-renders from the result.
//! Actions that need the network additionally map to a [`Command`], which
//! the [`EffectRunner`] executes off the UI thread; each command comes back
//! as exactly one follow-up action through the same dispatch path.

pub mod action;
pub mod effects;
pub mod forms;
pub mod log;
pub mod org_units;
pub mod roles;
pub mod status;
pub mod users;

pub use action::Action;
pub use effects::{ActionSink, Command, EffectRunner};
pub use log::{ActionLog, ActionRecord};
pub use status::OpStatus;

/// Requirements on a state slice.
///
/// `Default` exists so dispatch can temporarily take ownership of a slice;
/// `PartialEq` lets views skip work when nothing changed.
pub trait SliceState: Clone + PartialEq + Default + Send + 'static {}

/// A pure fold from (state, action) to state.
///
/// Every reducer sees every dispatched action. Actions from foreign
/// domains must pass the slice through unchanged, allocations included.
pub trait Reducer {
    type State: SliceState;

    fn reduce(state: Self::State, action: &Action) -> Self::State;
}
