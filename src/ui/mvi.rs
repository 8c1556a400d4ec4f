//! Dialog-local MVI plumbing.
//!
//! Dialogs carry their own intent vocabularies. Unlike store actions,
//! intents never leave the UI thread and never reach the effect runner;
//! they exist so dialog state changes stay pure and testable.

/// Marker for dialog intents.
pub trait Intent {}

/// Requirements on dialog state. `Default` lets the dispatcher take the
/// state out of its slot while reducing.
pub trait UiState: Clone + PartialEq + Default + Send + 'static {}

/// A pure fold from (state, intent) to state.
pub trait Reducer {
    type State: UiState;
    type Intent: Intent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State;
}
