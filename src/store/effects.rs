//! Side-effect execution.
//!
//! Reducers never touch the network. Actions that need it map to a
//! [`Command`]; the [`EffectRunner`] consumes commands on the tokio runtime
//! and publishes exactly one follow-up action per command, success or fail.
//!
//! Commands are read in dispatch order, but each API call runs on its own
//! task, so responses can land out of order. Slices apply whatever arrives
//! last; a stale response overwrites a newer one. Callers that care should
//! avoid firing overlapping loads for the same slice.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::api::types::{NewForm, NewUser, User, UserDraft};
use crate::api::{ApiClient, ApiError};
use crate::store::forms::FormsAction;
use crate::store::org_units::OrgUnitsAction;
use crate::store::roles::RolesAction;
use crate::store::users::UsersAction;
use crate::store::Action;

/// Destination for follow-up actions, usually the UI event channel.
pub type ActionSink = Arc<dyn Fn(Action) + Send + Sync>;

/// Network work derived from dispatched actions.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    LoadUsers,
    LoadRoles,
    LoadForms,
    LoadOrgUnits,
    CreateUser { draft: UserDraft },
    CreateForm { draft: NewForm },
    DeleteUser { uuid: String },
    DeleteForm { uuid: String },
}

impl Command {
    /// The effect registration table: which actions trigger network work.
    /// Success/fail actions deliberately map to nothing, so a follow-up can
    /// never spawn another request.
    pub fn for_action(action: &Action) -> Option<Command> {
        match action {
            Action::Users(UsersAction::Load) => Some(Command::LoadUsers),
            Action::Users(UsersAction::Create { draft }) => Some(Command::CreateUser {
                draft: draft.clone(),
            }),
            Action::Users(UsersAction::Delete { uuid }) => Some(Command::DeleteUser {
                uuid: uuid.clone(),
            }),
            Action::Roles(RolesAction::Load) => Some(Command::LoadRoles),
            Action::Forms(FormsAction::Load) => Some(Command::LoadForms),
            Action::Forms(FormsAction::Create { draft }) => Some(Command::CreateForm {
                draft: draft.clone(),
            }),
            Action::Forms(FormsAction::Delete { uuid }) => Some(Command::DeleteForm {
                uuid: uuid.clone(),
            }),
            Action::OrgUnits(OrgUnitsAction::Load) => Some(Command::LoadOrgUnits),
            _ => None,
        }
    }

    fn describe(&self) -> &'static str {
        match self {
            Command::LoadUsers => "load users",
            Command::LoadRoles => "load roles",
            Command::LoadForms => "load forms",
            Command::LoadOrgUnits => "load org units",
            Command::CreateUser { .. } => "create user",
            Command::CreateForm { .. } => "create form",
            Command::DeleteUser { .. } => "delete user",
            Command::DeleteForm { .. } => "delete form",
        }
    }
}

/// Consumes commands and publishes follow-up actions.
pub struct EffectRunner {
    api: ApiClient,
    commands: mpsc::Receiver<Command>,
    publish: ActionSink,
}

impl EffectRunner {
    pub fn new(api: ApiClient, commands: mpsc::Receiver<Command>, publish: ActionSink) -> Self {
        Self {
            api,
            commands,
            publish,
        }
    }

    /// Run until the command channel closes. Each command gets its own
    /// task so one slow endpoint cannot stall the rest.
    pub async fn run(mut self) {
        while let Some(command) = self.commands.recv().await {
            tracing::debug!(command = command.describe(), "effect started");
            let api = self.api.clone();
            let publish = Arc::clone(&self.publish);
            tokio::spawn(async move {
                let action = run_command(&api, command).await;
                tracing::debug!(action = action.name(), "effect finished");
                publish(action);
            });
        }
        tracing::debug!("effect runner stopped");
    }
}

/// Execute one command and fold the outcome into its follow-up action.
/// Infallible on purpose: an error becomes the fail action, nothing else.
async fn run_command(api: &ApiClient, command: Command) -> Action {
    match command {
        Command::LoadUsers => match api.list_users().await {
            Ok(users) => Action::Users(UsersAction::LoadSuccess { users }),
            Err(err) => Action::Users(UsersAction::LoadFail {
                message: err.to_string(),
            }),
        },
        Command::LoadRoles => match api.list_roles().await {
            Ok(roles) => Action::Roles(RolesAction::LoadSuccess { roles }),
            Err(err) => Action::Roles(RolesAction::LoadFail {
                message: err.to_string(),
            }),
        },
        Command::LoadForms => match api.list_forms().await {
            Ok(forms) => Action::Forms(FormsAction::LoadSuccess { forms }),
            Err(err) => Action::Forms(FormsAction::LoadFail {
                message: err.to_string(),
            }),
        },
        Command::LoadOrgUnits => match api.list_org_units().await {
            Ok(units) => Action::OrgUnits(OrgUnitsAction::LoadSuccess { units }),
            Err(err) => Action::OrgUnits(OrgUnitsAction::LoadFail {
                message: err.to_string(),
            }),
        },
        Command::CreateUser { draft } => match create_user_chain(api, draft).await {
            Ok(user) => Action::Users(UsersAction::CreateSuccess { user }),
            Err(err) => Action::Users(UsersAction::CreateFail {
                message: err.to_string(),
            }),
        },
        Command::CreateForm { draft } => match api.create_form(&draft).await {
            Ok(form) => Action::Forms(FormsAction::CreateSuccess { form }),
            Err(err) => Action::Forms(FormsAction::CreateFail {
                message: err.to_string(),
            }),
        },
        Command::DeleteUser { uuid } => match api.delete_user(&uuid).await {
            Ok(()) => Action::Users(UsersAction::DeleteSuccess { uuid }),
            Err(err) => Action::Users(UsersAction::DeleteFail {
                message: err.to_string(),
            }),
        },
        Command::DeleteForm { uuid } => match api.delete_form(&uuid).await {
            Ok(()) => Action::Forms(FormsAction::DeleteSuccess { uuid }),
            Err(err) => Action::Forms(FormsAction::DeleteFail {
                message: err.to_string(),
            }),
        },
    }
}

/// Two-step account creation: the person record first, then the account
/// referencing it. A failure in either step surfaces as one create-fail.
async fn create_user_chain(api: &ApiClient, draft: UserDraft) -> Result<User, ApiError> {
    let person = api.create_person(&draft.person).await?;
    let account = NewUser {
        username: draft.username,
        password: draft.password,
        person: person.uuid,
        roles: draft.roles,
    };
    api.create_user(&account).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::{NewPerson, PersonName};

    fn draft() -> UserDraft {
        UserDraft {
            person: NewPerson {
                names: vec![PersonName {
                    given_name: "Ada".to_string(),
                    family_name: "Lovelace".to_string(),
                }],
                gender: "F".to_string(),
                age: None,
                birthdate: None,
            },
            username: "ada".to_string(),
            password: "s3cret".to_string(),
            roles: vec!["r-1".to_string()],
        }
    }

    #[test]
    fn request_actions_map_to_commands() {
        assert_eq!(
            Command::for_action(&Action::Users(UsersAction::Load)),
            Some(Command::LoadUsers)
        );
        assert_eq!(
            Command::for_action(&Action::Users(UsersAction::Delete {
                uuid: "u-1".to_string()
            })),
            Some(Command::DeleteUser {
                uuid: "u-1".to_string()
            })
        );
        assert!(matches!(
            Command::for_action(&Action::Users(UsersAction::Create { draft: draft() })),
            Some(Command::CreateUser { .. })
        ));
    }

    #[test]
    fn follow_up_actions_map_to_no_command() {
        assert_eq!(
            Command::for_action(&Action::Users(UsersAction::LoadSuccess { users: vec![] })),
            None
        );
        assert_eq!(
            Command::for_action(&Action::Users(UsersAction::LoadFail {
                message: "x".to_string()
            })),
            None
        );
        assert_eq!(
            Command::for_action(&Action::Forms(FormsAction::SetReady { ready: true })),
            None
        );
    }
}
