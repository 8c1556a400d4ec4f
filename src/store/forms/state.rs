use crate::api::types::{OrgUnit, Period, ReportForm};
use crate::paging::Pager;
use crate::store::{OpStatus, SliceState};

/// State slice for the forms domain.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FormsState {
    pub items: Vec<ReportForm>,
    pub pager: Pager,
    /// Uuid of the form picked for reporting.
    pub active: Option<String>,
    /// Organisation unit the report is scoped to.
    pub org_unit: Option<OrgUnit>,
    /// Reporting period the report is scoped to.
    pub period: Option<Period>,
    /// True once unit, period and form are all picked; gates the report
    /// panel. Set explicitly via `FormsAction::SetReady`.
    pub ready: bool,
    /// Row currently armed for delete confirmation.
    pub pending_delete: Option<String>,
    pub load: OpStatus,
    pub create: OpStatus,
    pub delete: OpStatus,
}

impl SliceState for FormsState {}

impl FormsState {
    /// Initial state with the configured rows-per-page.
    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            pager: Pager::build(0, 1, page_size),
            ..Self::default()
        }
    }

    /// The rows visible on the current page.
    pub fn page_items(&self) -> Vec<ReportForm> {
        self.items
            .get(self.pager.window())
            .map(<[ReportForm]>::to_vec)
            .unwrap_or_default()
    }

    /// Look up a form by uuid.
    pub fn by_uuid(&self, uuid: &str) -> Option<&ReportForm> {
        self.items.iter().find(|form| form.uuid == uuid)
    }

    /// The active form record, when one is picked and still present.
    pub fn active_form(&self) -> Option<&ReportForm> {
        self.active.as_deref().and_then(|uuid| self.by_uuid(uuid))
    }

    /// True when unit, period and form are all picked.
    pub fn context_complete(&self) -> bool {
        self.org_unit.is_some() && self.period.is_some() && self.active.is_some()
    }
}
