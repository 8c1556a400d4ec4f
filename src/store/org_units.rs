//! Organisation units domain.
//!
//! Units come from the API as a flat list; the forms view picks one as the
//! reporting context.

use crate::api::types::OrgUnit;
use crate::store::{Action, OpStatus, Reducer, SliceState};

#[derive(Debug, Clone, PartialEq)]
pub enum OrgUnitsAction {
    Load,
    LoadSuccess { units: Vec<OrgUnit> },
    LoadFail { message: String },
    Reset,
}

impl OrgUnitsAction {
    pub fn name(&self) -> &'static str {
        match self {
            OrgUnitsAction::Load => "[org units] load",
            OrgUnitsAction::LoadSuccess { .. } => "[org units] load success",
            OrgUnitsAction::LoadFail { .. } => "[org units] load fail",
            OrgUnitsAction::Reset => "[org units] reset",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct OrgUnitsState {
    pub items: Vec<OrgUnit>,
    pub load: OpStatus,
}

impl SliceState for OrgUnitsState {}

pub struct OrgUnitsReducer;

impl Reducer for OrgUnitsReducer {
    type State = OrgUnitsState;

    fn reduce(state: OrgUnitsState, action: &Action) -> OrgUnitsState {
        let Action::OrgUnits(action) = action else {
            return state;
        };

        match action {
            OrgUnitsAction::Load => OrgUnitsState {
                load: OpStatus::Pending,
                ..state
            },
            OrgUnitsAction::LoadSuccess { units } => OrgUnitsState {
                items: units.clone(),
                load: OpStatus::Succeeded,
            },
            OrgUnitsAction::LoadFail { message } => OrgUnitsState {
                load: OpStatus::Failed(message.clone()),
                ..state
            },
            OrgUnitsAction::Reset => OrgUnitsState::default(),
        }
    }
}
