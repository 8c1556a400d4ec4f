//! Reporting forms domain: the form catalogue plus the reporting context
//! (organisation unit, period, active form) that gates data entry.

mod actions;
mod reducer;
mod state;

pub use actions::FormsAction;
pub use reducer::FormsReducer;
pub use state::FormsState;
