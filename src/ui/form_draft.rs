//! The add-form dialog.
//!
//! Much smaller than the add-user dialog: one name field and a period-type
//! choice cycled in place.

use crate::api::types::NewForm;
use crate::ui::mvi::{Intent, Reducer, UiState};

pub const PERIOD_TYPES: [&str; 3] = ["Monthly", "Quarterly", "Yearly"];

#[derive(Debug, Clone)]
pub enum FormDraftIntent {
    Open,
    Close,
    /// Escape; arms confirm_discard on a dirty draft, closes otherwise.
    RequestClose,
    Input { ch: char },
    Backspace,
    /// Step to the next period type.
    CyclePeriodType,
    SetError { message: String },
}

impl Intent for FormDraftIntent {}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum FormDraftState {
    #[default]
    Hidden,
    Visible(FormDraftData),
}

impl UiState for FormDraftState {}

impl FormDraftState {
    pub fn is_visible(&self) -> bool {
        matches!(self, FormDraftState::Visible(_))
    }

    pub fn data(&self) -> Option<&FormDraftData> {
        match self {
            FormDraftState::Visible(data) => Some(data),
            FormDraftState::Hidden => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormDraftData {
    pub name: String,
    /// Index into [`PERIOD_TYPES`].
    pub period_type: usize,
    pub dirty: bool,
    pub confirm_discard: bool,
    pub error: Option<String>,
}

impl FormDraftData {
    fn new() -> Self {
        Self {
            name: String::new(),
            period_type: 0,
            dirty: false,
            confirm_discard: false,
            error: None,
        }
    }

    pub fn period_type_label(&self) -> &'static str {
        PERIOD_TYPES[self.period_type % PERIOD_TYPES.len()]
    }

    pub fn to_draft(&self) -> Result<NewForm, String> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err("form name is required".to_string());
        }
        Ok(NewForm {
            name: name.to_string(),
            period_type: Some(self.period_type_label().to_string()),
        })
    }
}

pub struct FormDraftReducer;

impl Reducer for FormDraftReducer {
    type State = FormDraftState;
    type Intent = FormDraftIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            FormDraftIntent::Open => FormDraftState::Visible(FormDraftData::new()),
            FormDraftIntent::Close => FormDraftState::Hidden,
            FormDraftIntent::RequestClose => match state {
                FormDraftState::Visible(data) if data.dirty && !data.confirm_discard => {
                    FormDraftState::Visible(FormDraftData {
                        confirm_discard: true,
                        ..data
                    })
                }
                _ => FormDraftState::Hidden,
            },
            FormDraftIntent::Input { ch } => match state {
                FormDraftState::Visible(mut data) => {
                    data.name.push(ch);
                    data.dirty = true;
                    data.confirm_discard = false;
                    data.error = None;
                    FormDraftState::Visible(data)
                }
                hidden => hidden,
            },
            FormDraftIntent::Backspace => match state {
                FormDraftState::Visible(mut data) => {
                    if data.name.pop().is_some() {
                        data.dirty = true;
                    }
                    data.confirm_discard = false;
                    data.error = None;
                    FormDraftState::Visible(data)
                }
                hidden => hidden,
            },
            FormDraftIntent::CyclePeriodType => match state {
                FormDraftState::Visible(mut data) => {
                    data.period_type = (data.period_type + 1) % PERIOD_TYPES.len();
                    data.dirty = true;
                    data.confirm_discard = false;
                    FormDraftState::Visible(data)
                }
                hidden => hidden,
            },
            FormDraftIntent::SetError { message } => match state {
                FormDraftState::Visible(data) => FormDraftState::Visible(FormDraftData {
                    error: Some(message),
                    confirm_discard: false,
                    ..data
                }),
                hidden => hidden,
            },
        }
    }
}
