use crate::api::types::Role;
use crate::ui::mvi::Intent;

#[derive(Debug, Clone)]
pub enum UserFormIntent {
    /// Open with a fresh draft; the role grid is built from `roles`.
    Open { roles: Vec<Role> },
    Close,
    /// User pressed Escape. Arms confirm_discard on a dirty draft; closes
    /// on a clean one or when already armed.
    RequestClose,
    FocusNext,
    FocusPrev,
    /// Type into the focused text field.
    Input { ch: char },
    Backspace,
    /// Flip the focused role checkbox.
    ToggleRole,
    /// Show a validation or create failure inline.
    SetError { message: String },
}

impl Intent for UserFormIntent {}
