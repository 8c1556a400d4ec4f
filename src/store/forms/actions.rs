use crate::api::types::{NewForm, OrgUnit, Period, ReportForm};

/// Events on the forms domain.
#[derive(Debug, Clone, PartialEq)]
pub enum FormsAction {
    Load,
    LoadSuccess { forms: Vec<ReportForm> },
    LoadFail { message: String },

    Create { draft: NewForm },
    CreateSuccess { form: ReportForm },
    CreateFail { message: String },

    Delete { uuid: String },
    DeleteSuccess { uuid: String },
    DeleteFail { message: String },

    /// Pick the form to report on, or clear the pick.
    SetActive { uuid: Option<String> },
    /// Pick the organisation unit the report is for.
    SetOrgUnit { unit: OrgUnit },
    /// Pick the reporting period.
    SetPeriod { period: Period },
    /// Flip the report-ready flag. Dispatched by the view once unit,
    /// period and form are all picked, never derived in the reducer.
    SetReady { ready: bool },
    /// Arm (or disarm) the delete confirmation on one row.
    ConfirmDelete { uuid: Option<String> },
    /// Move the pager. Out-of-range pages are ignored.
    SetPage { page: u64 },
    Reset,
}

impl FormsAction {
    pub fn name(&self) -> &'static str {
        match self {
            FormsAction::Load => "[forms] load",
            FormsAction::LoadSuccess { .. } => "[forms] load success",
            FormsAction::LoadFail { .. } => "[forms] load fail",
            FormsAction::Create { .. } => "[forms] create",
            FormsAction::CreateSuccess { .. } => "[forms] create success",
            FormsAction::CreateFail { .. } => "[forms] create fail",
            FormsAction::Delete { .. } => "[forms] delete",
            FormsAction::DeleteSuccess { .. } => "[forms] delete success",
            FormsAction::DeleteFail { .. } => "[forms] delete fail",
            FormsAction::SetActive { .. } => "[forms] set active",
            FormsAction::SetOrgUnit { .. } => "[forms] set org unit",
            FormsAction::SetPeriod { .. } => "[forms] set period",
            FormsAction::SetReady { .. } => "[forms] set ready",
            FormsAction::ConfirmDelete { .. } => "[forms] confirm delete",
            FormsAction::SetPage { .. } => "[forms] set page",
            FormsAction::Reset => "[forms] reset",
        }
    }
}
