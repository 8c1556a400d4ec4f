//! The global action vocabulary.

use crate::store::forms::FormsAction;
use crate::store::org_units::OrgUnitsAction;
use crate::store::roles::RolesAction;
use crate::store::users::UsersAction;

/// Every event the store understands, grouped by domain.
///
/// Reducers receive the whole vocabulary; each one handles its own domain
/// and passes everything else through untouched.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Users(UsersAction),
    Roles(RolesAction),
    Forms(FormsAction),
    OrgUnits(OrgUnitsAction),
}

impl Action {
    /// Stable discriminant string, used by the action log and tracing.
    pub fn name(&self) -> &'static str {
        match self {
            Action::Users(action) => action.name(),
            Action::Roles(action) => action.name(),
            Action::Forms(action) => action.name(),
            Action::OrgUnits(action) => action.name(),
        }
    }
}
