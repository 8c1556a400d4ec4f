//! The add-user dialog.
//!
//! Collects the person fields, the account fields and the role ticks, then
//! maps them into a [`crate::api::types::UserDraft`] on submit. The dialog
//! stays open while the create request is in flight; the create outcome
//! closes it or surfaces the failure inline.

mod intent;
mod reducer;
mod state;

pub use intent::UserFormIntent;
pub use reducer::UserFormReducer;
pub use state::{
    group_role_rows, FormFocus, RoleItem, UserField, UserFormData, UserFormState, ROLE_ROW_WIDTH,
};
