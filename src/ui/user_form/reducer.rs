use crate::ui::mvi::Reducer;
use crate::ui::user_form::intent::UserFormIntent;
use crate::ui::user_form::state::{FormFocus, UserFormData, UserFormState};

pub struct UserFormReducer;

impl Reducer for UserFormReducer {
    type State = UserFormState;
    type Intent = UserFormIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            UserFormIntent::Open { roles } => {
                UserFormState::Visible(UserFormData::new(&roles))
            }
            UserFormIntent::Close => UserFormState::Hidden,
            UserFormIntent::RequestClose => match state {
                UserFormState::Visible(data) if data.dirty && !data.confirm_discard => {
                    UserFormState::Visible(UserFormData {
                        confirm_discard: true,
                        ..data
                    })
                }
                _ => UserFormState::Hidden,
            },
            UserFormIntent::FocusNext => move_focus(state, 1),
            UserFormIntent::FocusPrev => move_focus(state, -1),
            UserFormIntent::Input { ch } => match state {
                UserFormState::Visible(mut data) => {
                    if let FormFocus::Field(field) = data.focus {
                        data.field_mut(field).push(ch);
                        data.dirty = true;
                        data.confirm_discard = false;
                        data.error = None;
                    }
                    UserFormState::Visible(data)
                }
                hidden => hidden,
            },
            UserFormIntent::Backspace => match state {
                UserFormState::Visible(mut data) => {
                    if let FormFocus::Field(field) = data.focus {
                        if data.field_mut(field).pop().is_some() {
                            data.dirty = true;
                        }
                        data.confirm_discard = false;
                        data.error = None;
                    }
                    UserFormState::Visible(data)
                }
                hidden => hidden,
            },
            UserFormIntent::ToggleRole => match state {
                UserFormState::Visible(mut data) => {
                    if let FormFocus::Role { row, col } = data.focus {
                        if let Some(item) =
                            data.role_rows.get_mut(row).and_then(|cells| cells.get_mut(col))
                        {
                            item.selected = !item.selected;
                            data.dirty = true;
                            data.confirm_discard = false;
                            data.error = None;
                        }
                    }
                    UserFormState::Visible(data)
                }
                hidden => hidden,
            },
            UserFormIntent::SetError { message } => match state {
                UserFormState::Visible(data) => UserFormState::Visible(UserFormData {
                    error: Some(message),
                    confirm_discard: false,
                    ..data
                }),
                hidden => hidden,
            },
        }
    }
}

fn move_focus(state: UserFormState, direction: i32) -> UserFormState {
    match state {
        UserFormState::Visible(mut data) => {
            let order = data.focus_order();
            if let Some(current) = order.iter().position(|focus| *focus == data.focus) {
                let len = order.len();
                let next = if direction.is_negative() {
                    (current + len - 1) % len
                } else {
                    (current + 1) % len
                };
                data.focus = order[next];
            }
            data.confirm_discard = false;
            UserFormState::Visible(data)
        }
        hidden => hidden,
    }
}
