use crate::paging::Pager;
use crate::store::forms::{FormsAction, FormsState};
use crate::store::{Action, OpStatus, Reducer};

pub struct FormsReducer;

impl Reducer for FormsReducer {
    type State = FormsState;

    fn reduce(state: FormsState, action: &Action) -> FormsState {
        let Action::Forms(action) = action else {
            return state;
        };

        match action {
            FormsAction::Load => FormsState {
                load: OpStatus::Pending,
                ..state
            },
            FormsAction::LoadSuccess { forms } => {
                let pager = Pager::build(forms.len(), 1, state.pager.page_size);
                FormsState {
                    items: forms.clone(),
                    pager,
                    load: OpStatus::Succeeded,
                    ..state
                }
            }
            FormsAction::LoadFail { message } => FormsState {
                load: OpStatus::Failed(message.clone()),
                ..state
            },

            FormsAction::Create { .. } => FormsState {
                create: OpStatus::Pending,
                ..state
            },
            FormsAction::CreateSuccess { form } => {
                let mut items = state.items;
                items.push(form.clone());
                let page = state.pager.current_page.max(1);
                let pager = Pager::build(items.len(), page, state.pager.page_size);
                FormsState {
                    items,
                    pager,
                    create: OpStatus::Succeeded,
                    ..state
                }
            }
            FormsAction::CreateFail { message } => FormsState {
                create: OpStatus::Failed(message.clone()),
                ..state
            },

            FormsAction::Delete { .. } => FormsState {
                delete: OpStatus::Pending,
                pending_delete: None,
                ..state
            },
            FormsAction::DeleteSuccess { uuid } => {
                let mut items = state.items;
                items.retain(|form| &form.uuid != uuid);
                let pager = Pager::build(
                    items.len(),
                    state.pager.current_page,
                    state.pager.page_size,
                );
                // Deleting the picked form tears down the reporting context.
                let was_active = state.active.as_deref() == Some(uuid);
                FormsState {
                    items,
                    pager,
                    active: if was_active { None } else { state.active },
                    ready: if was_active { false } else { state.ready },
                    delete: OpStatus::Succeeded,
                    ..state
                }
            }
            FormsAction::DeleteFail { message } => FormsState {
                delete: OpStatus::Failed(message.clone()),
                ..state
            },

            FormsAction::SetActive { uuid } => FormsState {
                active: uuid.clone(),
                ..state
            },
            FormsAction::SetOrgUnit { unit } => FormsState {
                org_unit: Some(unit.clone()),
                ..state
            },
            FormsAction::SetPeriod { period } => FormsState {
                period: Some(period.clone()),
                ..state
            },
            FormsAction::SetReady { ready } => FormsState {
                ready: *ready,
                ..state
            },
            FormsAction::ConfirmDelete { uuid } => FormsState {
                pending_delete: uuid.clone(),
                ..state
            },
            FormsAction::SetPage { page } => match state.pager.try_page(*page) {
                Some(pager) => FormsState { pager, ..state },
                None => state,
            },
            FormsAction::Reset => FormsState::with_page_size(state.pager.page_size),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::{OrgUnit, Period, ReportForm};

    fn form(uuid: &str, name: &str) -> ReportForm {
        ReportForm {
            uuid: uuid.to_string(),
            name: name.to_string(),
            period_type: Some("Monthly".to_string()),
        }
    }

    fn reduce(state: FormsState, action: FormsAction) -> FormsState {
        FormsReducer::reduce(state, &Action::Forms(action))
    }

    fn seeded() -> FormsState {
        let state = FormsState::with_page_size(10);
        reduce(
            state,
            FormsAction::LoadSuccess {
                forms: vec![form("f-1", "Immunization"), form("f-2", "Stock")],
            },
        )
    }

    #[test]
    fn context_setters_accumulate() {
        let state = reduce(
            seeded(),
            FormsAction::SetOrgUnit {
                unit: OrgUnit {
                    uuid: "ou-1".to_string(),
                    name: "North".to_string(),
                    level: None,
                },
            },
        );
        let state = reduce(
            state,
            FormsAction::SetPeriod {
                period: Period {
                    id: "202508".to_string(),
                    name: "August 2025".to_string(),
                },
            },
        );
        assert!(!state.context_complete());

        let state = reduce(
            state,
            FormsAction::SetActive {
                uuid: Some("f-1".to_string()),
            },
        );
        assert!(state.context_complete());
        // Ready stays down until explicitly raised.
        assert!(!state.ready);

        let state = reduce(state, FormsAction::SetReady { ready: true });
        assert!(state.ready);
    }

    #[test]
    fn deleting_the_active_form_clears_the_context_gate() {
        let state = reduce(
            seeded(),
            FormsAction::SetActive {
                uuid: Some("f-1".to_string()),
            },
        );
        let state = reduce(state, FormsAction::SetReady { ready: true });
        let state = reduce(
            state,
            FormsAction::DeleteSuccess {
                uuid: "f-1".to_string(),
            },
        );
        assert_eq!(state.active, None);
        assert!(!state.ready);
        assert_eq!(state.items.len(), 1);
    }

    #[test]
    fn deleting_another_form_keeps_the_context() {
        let state = reduce(
            seeded(),
            FormsAction::SetActive {
                uuid: Some("f-1".to_string()),
            },
        );
        let state = reduce(state, FormsAction::SetReady { ready: true });
        let state = reduce(
            state,
            FormsAction::DeleteSuccess {
                uuid: "f-2".to_string(),
            },
        );
        assert_eq!(state.active.as_deref(), Some("f-1"));
        assert!(state.ready);
    }

    #[test]
    fn out_of_range_page_is_ignored() {
        let state = seeded();
        let before = state.clone();
        let state = reduce(state, FormsAction::SetPage { page: 7 });
        assert_eq!(state, before);
    }

    #[test]
    fn reset_keeps_the_configured_page_size() {
        let state = reduce(seeded(), FormsAction::Reset);
        assert_eq!(state.pager.page_size, 10);
        assert!(state.items.is_empty());
    }
}
