//! Users domain: account list, creation, deletion.

mod actions;
mod reducer;
mod state;

pub use actions::UsersAction;
pub use reducer::UsersReducer;
pub use state::UsersState;

/// Dotted path the free-text filter matches against.
pub const USER_FILTER_PATH: &str = "person.display";
