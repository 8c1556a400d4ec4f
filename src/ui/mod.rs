//! Terminal user interface.
//!
//! The UI thread owns the store: it receives key events, dispatches
//! actions, and redraws from whatever the reducers produced. Dialog-local
//! state (the add-user form, pickers) lives beside the store slices and
//! follows the same take-reduce-store discipline via small intent enums.

pub mod app;
pub mod events;
pub mod form_draft;
pub mod input;
pub mod mvi;
pub mod notice;
pub mod periods;
pub mod render;
pub mod runtime;
pub mod terminal_guard;
pub mod theme;
pub mod user_form;

pub use app::App;
pub use runtime::run;
