//! Roles domain: the assignable-role catalogue.
//!
//! Read-only from this client's point of view; the add-user dialog needs
//! the list for its checkboxes.

use crate::api::types::Role;
use crate::store::{Action, OpStatus, Reducer, SliceState};

#[derive(Debug, Clone, PartialEq)]
pub enum RolesAction {
    Load,
    LoadSuccess { roles: Vec<Role> },
    LoadFail { message: String },
    Reset,
}

impl RolesAction {
    pub fn name(&self) -> &'static str {
        match self {
            RolesAction::Load => "[roles] load",
            RolesAction::LoadSuccess { .. } => "[roles] load success",
            RolesAction::LoadFail { .. } => "[roles] load fail",
            RolesAction::Reset => "[roles] reset",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RolesState {
    pub items: Vec<Role>,
    pub load: OpStatus,
}

impl SliceState for RolesState {}

pub struct RolesReducer;

impl Reducer for RolesReducer {
    type State = RolesState;

    fn reduce(state: RolesState, action: &Action) -> RolesState {
        let Action::Roles(action) = action else {
            return state;
        };

        match action {
            RolesAction::Load => RolesState {
                load: OpStatus::Pending,
                ..state
            },
            RolesAction::LoadSuccess { roles } => RolesState {
                items: roles.clone(),
                load: OpStatus::Succeeded,
            },
            RolesAction::LoadFail { message } => RolesState {
                load: OpStatus::Failed(message.clone()),
                ..state
            },
            RolesAction::Reset => RolesState::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::users::UsersAction;

    fn role(uuid: &str, name: &str) -> Role {
        Role {
            uuid: uuid.to_string(),
            name: name.to_string(),
        }
    }

    #[test]
    fn load_cycle_settles_on_the_payload() {
        let state = RolesReducer::reduce(RolesState::default(), &Action::Roles(RolesAction::Load));
        assert!(state.load.is_pending());

        let state = RolesReducer::reduce(
            state,
            &Action::Roles(RolesAction::LoadSuccess {
                roles: vec![role("r-1", "Clerk")],
            }),
        );
        assert_eq!(state.load, OpStatus::Succeeded);
        assert_eq!(state.items.len(), 1);
    }

    #[test]
    fn load_fail_keeps_the_old_items() {
        let seeded = RolesState {
            items: vec![role("r-1", "Clerk")],
            load: OpStatus::Succeeded,
        };
        let state = RolesReducer::reduce(
            seeded,
            &Action::Roles(RolesAction::LoadFail {
                message: "503".to_string(),
            }),
        );
        assert_eq!(state.items.len(), 1);
        assert_eq!(state.load.failure(), Some("503"));
    }

    #[test]
    fn foreign_actions_pass_through_untouched() {
        let seeded = RolesState {
            items: vec![role("r-1", "Clerk")],
            load: OpStatus::Succeeded,
        };
        let before = seeded.items.as_ptr();
        let state = RolesReducer::reduce(seeded, &Action::Users(UsersAction::Load));
        assert_eq!(state.items.as_ptr(), before);
    }
}
