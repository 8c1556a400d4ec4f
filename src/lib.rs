//! Terminal admin console for a field-reporting API.
//!
//! fieldbook manages user accounts, roles, reporting forms, and organisation
//! units against a remote JSON API. All shared state lives in one store:
//! views dispatch actions, pure reducers fold them into per-domain slices,
//! and an effect runner performs the network calls, feeding each outcome
//! back in as exactly one follow-up action.

pub mod api;
pub mod config;
pub mod paging;
pub mod store;
pub mod ui;
