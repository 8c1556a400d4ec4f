use crate::api::types::User;
use crate::paging::Pager;
use crate::store::users::state::count_filtered;
use crate::store::users::{UsersAction, UsersState};
use crate::store::{Action, OpStatus, Reducer};

pub struct UsersReducer;

impl Reducer for UsersReducer {
    type State = UsersState;

    fn reduce(state: UsersState, action: &Action) -> UsersState {
        let Action::Users(action) = action else {
            return state;
        };

        match action {
            UsersAction::Load => UsersState {
                load: OpStatus::Pending,
                ..state
            },
            UsersAction::LoadSuccess { users } => {
                let pager = repage(users, &state.filter, 1, state.pager.page_size);
                UsersState {
                    items: users.clone(),
                    pager,
                    load: OpStatus::Succeeded,
                    ..state
                }
            }
            UsersAction::LoadFail { message } => UsersState {
                load: OpStatus::Failed(message.clone()),
                ..state
            },

            UsersAction::Create { .. } => UsersState {
                create: OpStatus::Pending,
                ..state
            },
            UsersAction::CreateSuccess { user } => {
                let mut items = state.items;
                items.push(user.clone());
                let page = state.pager.current_page.max(1);
                let pager = repage(&items, &state.filter, page, state.pager.page_size);
                UsersState {
                    items,
                    pager,
                    create: OpStatus::Succeeded,
                    ..state
                }
            }
            UsersAction::CreateFail { message } => UsersState {
                create: OpStatus::Failed(message.clone()),
                ..state
            },

            UsersAction::Delete { .. } => UsersState {
                delete: OpStatus::Pending,
                pending_delete: None,
                ..state
            },
            UsersAction::DeleteSuccess { uuid } => {
                let mut items = state.items;
                items.retain(|user| &user.uuid != uuid);
                let pager = repage(
                    &items,
                    &state.filter,
                    state.pager.current_page,
                    state.pager.page_size,
                );
                let active = state.active.filter(|active| active != uuid);
                UsersState {
                    items,
                    pager,
                    active,
                    delete: OpStatus::Succeeded,
                    ..state
                }
            }
            UsersAction::DeleteFail { message } => UsersState {
                delete: OpStatus::Failed(message.clone()),
                ..state
            },

            UsersAction::SetActive { uuid } => UsersState {
                active: uuid.clone(),
                ..state
            },
            UsersAction::ConfirmDelete { uuid } => UsersState {
                pending_delete: uuid.clone(),
                ..state
            },
            UsersAction::SetFilter { text } => {
                let pager = repage(&state.items, text, 1, state.pager.page_size);
                UsersState {
                    filter: text.clone(),
                    pager,
                    ..state
                }
            }
            UsersAction::SetPage { page } => match state.pager.try_page(*page) {
                Some(pager) => UsersState { pager, ..state },
                None => state,
            },
            UsersAction::Reset => UsersState::with_page_size(state.pager.page_size),
        }
    }
}

/// Pager over the filtered collection, clamped by `Pager::build`.
fn repage(items: &[User], filter: &str, page: u64, page_size: usize) -> Pager {
    Pager::build(count_filtered(items, filter), page, page_size)
}
