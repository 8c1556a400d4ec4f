use crate::api::types::{User, UserDraft};

/// Events on the users domain.
///
/// `Load`, `Create` and `Delete` are requests; the effect runner answers
/// each with its success or fail counterpart and nothing else.
#[derive(Debug, Clone, PartialEq)]
pub enum UsersAction {
    Load,
    LoadSuccess { users: Vec<User> },
    LoadFail { message: String },

    /// Submit a new account. The effect creates the person record first,
    /// then the account referencing it.
    Create { draft: UserDraft },
    CreateSuccess { user: User },
    CreateFail { message: String },

    Delete { uuid: String },
    DeleteSuccess { uuid: String },
    DeleteFail { message: String },

    /// Mark one user as the active item, or clear the mark.
    SetActive { uuid: Option<String> },
    /// Arm (or disarm) the delete confirmation on one row.
    ConfirmDelete { uuid: Option<String> },
    /// Replace the free-text filter and jump back to page one.
    SetFilter { text: String },
    /// Move the pager. Out-of-range pages are ignored.
    SetPage { page: u64 },
    /// Return the slice to its initial state.
    Reset,
}

impl UsersAction {
    pub fn name(&self) -> &'static str {
        match self {
            UsersAction::Load => "[users] load",
            UsersAction::LoadSuccess { .. } => "[users] load success",
            UsersAction::LoadFail { .. } => "[users] load fail",
            UsersAction::Create { .. } => "[users] create",
            UsersAction::CreateSuccess { .. } => "[users] create success",
            UsersAction::CreateFail { .. } => "[users] create fail",
            UsersAction::Delete { .. } => "[users] delete",
            UsersAction::DeleteSuccess { .. } => "[users] delete success",
            UsersAction::DeleteFail { .. } => "[users] delete fail",
            UsersAction::SetActive { .. } => "[users] set active",
            UsersAction::ConfirmDelete { .. } => "[users] confirm delete",
            UsersAction::SetFilter { .. } => "[users] set filter",
            UsersAction::SetPage { .. } => "[users] set page",
            UsersAction::Reset => "[users] reset",
        }
    }
}
