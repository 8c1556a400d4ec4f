use std::time::{Duration, Instant};

use crossterm::event::KeyEvent;
use tokio::sync::mpsc;

use crate::api::types::Period;
use crate::config::ConfigStore;
use crate::store::forms::{FormsAction, FormsReducer, FormsState};
use crate::store::org_units::{OrgUnitsAction, OrgUnitsReducer, OrgUnitsState};
use crate::store::roles::{RolesAction, RolesReducer, RolesState};
use crate::store::users::{UsersAction, UsersReducer, UsersState};
use crate::store::{Action, ActionLog, Command, Reducer};
use crate::ui::form_draft::{FormDraftIntent, FormDraftReducer, FormDraftState};
use crate::ui::input;
use crate::ui::mvi::Reducer as DialogReducer;
use crate::ui::notice::Notice;
use crate::ui::periods::{recent_monthly_periods, PERIOD_CHOICES};
use crate::ui::user_form::{UserFormIntent, UserFormReducer, UserFormState};

/// The table screens, cycled with Tab.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum View {
    Users,
    Forms,
    OrgUnits,
}

impl View {
    pub const ALL: [View; 3] = [View::Users, View::Forms, View::OrgUnits];

    pub fn title(self) -> &'static str {
        match self {
            View::Users => "Users",
            View::Forms => "Forms",
            View::OrgUnits => "Org units",
        }
    }

    fn next(self) -> View {
        match self {
            View::Users => View::Forms,
            View::Forms => View::OrgUnits,
            View::OrgUnits => View::Users,
        }
    }

    fn prev(self) -> View {
        match self {
            View::Users => View::OrgUnits,
            View::Forms => View::Users,
            View::OrgUnits => View::Forms,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PopupKind {
    UserForm,
    FormDraft,
    OrgUnitPicker,
    PeriodPicker,
    ActionLog,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Focus {
    Table,
    /// Typing into the users filter line.
    Filter,
    Popup(PopupKind),
}

pub type CommandSender = mpsc::Sender<Command>;

/// Generic slice dispatch: take the slice, run the reducer, store the result.
macro_rules! reduce_slice {
    ($self:expr, $field:ident, $reducer:ty, $action:expr) => {
        $self.$field = <$reducer>::reduce(std::mem::take(&mut $self.$field), $action);
    };
}

/// Dialog dispatch over the intent-based reducers.
macro_rules! reduce_dialog {
    ($self:expr, $field:ident, $reducer:ty, $intent:expr) => {
        $self.$field = <$reducer as DialogReducer>::reduce(
            std::mem::take(&mut $self.$field),
            $intent,
        );
    };
}

pub struct App {
    should_quit: bool,
    view: View,
    focus: Focus,

    users: UsersState,
    roles: RolesState,
    forms: FormsState,
    org_units: OrgUnitsState,

    user_form: UserFormState,
    form_draft: FormDraftState,

    /// Cursor row within the visible page of the current view.
    table_row: usize,
    /// Cursor row within whichever picker popup is open.
    picker_row: usize,
    /// Period choices, generated once per session.
    periods: Vec<Period>,

    notice: Option<Notice>,
    notice_ttl: Duration,

    config: ConfigStore,
    action_log: ActionLog,
    command_tx: Option<CommandSender>,
    last_effect_error: Option<String>,
}

impl App {
    pub fn new(config: ConfigStore) -> Self {
        let ui = config.get().ui;
        Self {
            should_quit: false,
            view: View::Users,
            focus: Focus::Table,
            users: UsersState::with_page_size(ui.page_size),
            roles: RolesState::default(),
            forms: FormsState::with_page_size(ui.page_size),
            org_units: OrgUnitsState::default(),
            user_form: UserFormState::default(),
            form_draft: FormDraftState::default(),
            table_row: 0,
            picker_row: 0,
            periods: recent_monthly_periods(PERIOD_CHOICES),
            notice: None,
            notice_ttl: Duration::from_millis(ui.notice_ms),
            config,
            action_log: ActionLog::new(),
            command_tx: None,
            last_effect_error: None,
        }
    }

    // ------------------------------------------------------------------
    // Store dispatch
    // ------------------------------------------------------------------

    /// Run one action through every slice reducer, then derive the side
    /// effects: the command it maps to and any UI follow-up.
    pub fn dispatch(&mut self, action: Action) {
        self.action_log.record(action.name());
        tracing::debug!(action = action.name(), "dispatch");

        reduce_slice!(self, users, UsersReducer, &action);
        reduce_slice!(self, roles, RolesReducer, &action);
        reduce_slice!(self, forms, FormsReducer, &action);
        reduce_slice!(self, org_units, OrgUnitsReducer, &action);

        if let Some(command) = Command::for_action(&action) {
            self.send_command(command);
        }
        self.react(&action);
    }

    /// UI follow-ups to store changes: notices, dialog lifecycle, cursor
    /// clamping, the report-ready gate.
    fn react(&mut self, action: &Action) {
        match action {
            Action::Users(UsersAction::LoadSuccess { .. })
            | Action::Users(UsersAction::DeleteSuccess { .. })
            | Action::Users(UsersAction::SetFilter { .. })
            | Action::Users(UsersAction::SetPage { .. })
            | Action::Forms(FormsAction::LoadSuccess { .. })
            | Action::Forms(FormsAction::SetPage { .. })
            | Action::OrgUnits(OrgUnitsAction::LoadSuccess { .. }) => {
                self.clamp_table_row();
            }
            _ => {}
        }

        match action {
            Action::Users(UsersAction::LoadFail { message })
            | Action::Users(UsersAction::DeleteFail { message })
            | Action::Roles(RolesAction::LoadFail { message })
            | Action::Forms(FormsAction::LoadFail { message })
            | Action::Forms(FormsAction::DeleteFail { message })
            | Action::OrgUnits(OrgUnitsAction::LoadFail { message }) => {
                self.show_error(message.clone());
            }

            Action::Users(UsersAction::CreateSuccess { user }) => {
                self.dismiss_popup(PopupKind::UserForm);
                self.dispatch_user_form(UserFormIntent::Close);
                self.show_info(format!("created user '{}'", user.username));
            }
            Action::Users(UsersAction::CreateFail { message }) => {
                if self.user_form.is_visible() {
                    self.dispatch_user_form(UserFormIntent::SetError {
                        message: message.clone(),
                    });
                } else {
                    self.show_error(message.clone());
                }
            }
            Action::Users(UsersAction::DeleteSuccess { .. }) => {
                self.show_info("user deleted");
            }

            Action::Forms(FormsAction::CreateSuccess { form }) => {
                self.dismiss_popup(PopupKind::FormDraft);
                self.dispatch_form_draft(FormDraftIntent::Close);
                self.show_info(format!("created form '{}'", form.name));
            }
            Action::Forms(FormsAction::CreateFail { message }) => {
                if self.form_draft.is_visible() {
                    self.dispatch_form_draft(FormDraftIntent::SetError {
                        message: message.clone(),
                    });
                } else {
                    self.show_error(message.clone());
                }
            }
            Action::Forms(FormsAction::DeleteSuccess { .. }) => {
                self.show_info("form deleted");
                self.sync_ready();
            }
            Action::Forms(FormsAction::SetActive { .. })
            | Action::Forms(FormsAction::SetOrgUnit { .. })
            | Action::Forms(FormsAction::SetPeriod { .. }) => {
                self.sync_ready();
            }
            _ => {}
        }
    }

    /// Raise or lower the report-ready flag when the picked context
    /// changes. The flag only ever moves through an explicit action.
    fn sync_ready(&mut self) {
        let complete = self.forms.context_complete();
        if complete != self.forms.ready {
            self.dispatch(Action::Forms(FormsAction::SetReady { ready: complete }));
        }
    }

    fn send_command(&mut self, command: Command) -> bool {
        let Some(sender) = &self.command_tx else {
            return false;
        };
        match sender.try_send(command) {
            Ok(()) => {
                self.last_effect_error = None;
                true
            }
            Err(err) => {
                self.last_effect_error = Some(format!("effect queue full: {err}"));
                false
            }
        }
    }

    pub fn set_command_sender(&mut self, sender: CommandSender) {
        self.command_tx = Some(sender);
    }

    pub fn last_effect_error(&self) -> Option<&str> {
        self.last_effect_error.as_deref()
    }

    // ------------------------------------------------------------------
    // Loop plumbing
    // ------------------------------------------------------------------

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        input::handle_key(self, key);
    }

    pub fn on_tick(&mut self) {
        let now = Instant::now();
        if self.notice.as_ref().is_some_and(|n| n.is_expired(now)) {
            self.notice = None;
        }
    }

    /// Initial loads for the landing view.
    pub fn on_start(&mut self) {
        self.dispatch(Action::Users(UsersAction::Load));
        self.dispatch(Action::Roles(RolesAction::Load));
    }

    // ------------------------------------------------------------------
    // Views and cursor
    // ------------------------------------------------------------------

    pub fn view(&self) -> View {
        self.view
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn popup_kind(&self) -> Option<PopupKind> {
        match self.focus {
            Focus::Popup(kind) => Some(kind),
            _ => None,
        }
    }

    pub fn next_view(&mut self) {
        self.set_view(self.view.next());
    }

    pub fn prev_view(&mut self) {
        self.set_view(self.view.prev());
    }

    fn set_view(&mut self, view: View) {
        self.view = view;
        self.table_row = 0;
        // A pending notice does not outlive the view that raised it.
        self.notice = None;
        // Each catalogue loads the first time its view comes up.
        match view {
            View::Forms if self.forms.load.is_idle() => {
                self.dispatch(Action::Forms(FormsAction::Load));
            }
            View::OrgUnits if self.org_units.load.is_idle() => {
                self.dispatch(Action::OrgUnits(OrgUnitsAction::Load));
            }
            _ => {}
        }
    }

    pub fn table_row(&self) -> usize {
        self.table_row
    }

    /// Rows on the current page of the current view.
    pub fn page_len(&self) -> usize {
        match self.view {
            View::Users => self.users.page_items().len(),
            View::Forms => self.forms.page_items().len(),
            View::OrgUnits => self.org_units.items.len(),
        }
    }

    pub fn move_table_row(&mut self, direction: i32) {
        let len = self.page_len();
        if len == 0 {
            self.table_row = 0;
            return;
        }
        let current = self.table_row.min(len - 1);
        self.table_row = if direction.is_negative() {
            if current == 0 {
                len - 1
            } else {
                current - 1
            }
        } else if current + 1 >= len {
            0
        } else {
            current + 1
        };
    }

    fn clamp_table_row(&mut self) {
        let len = self.page_len();
        if len == 0 {
            self.table_row = 0;
        } else if self.table_row > len - 1 {
            self.table_row = len - 1;
        }
    }

    /// Uuid of the row under the cursor, for the views that have one.
    pub fn current_row_uuid(&self) -> Option<String> {
        match self.view {
            View::Users => self
                .users
                .page_items()
                .get(self.table_row)
                .map(|user| user.uuid.clone()),
            View::Forms => self
                .forms
                .page_items()
                .get(self.table_row)
                .map(|form| form.uuid.clone()),
            View::OrgUnits => self
                .org_units
                .items
                .get(self.table_row)
                .map(|unit| unit.uuid.clone()),
        }
    }

    /// Step the pager of the current view. The reducer drops requests that
    /// run off either end.
    pub fn page_step(&mut self, direction: i64) {
        match self.view {
            View::Users => {
                let page = stepped(self.users.pager.current_page, direction);
                self.dispatch(Action::Users(UsersAction::SetPage { page }));
            }
            View::Forms => {
                let page = stepped(self.forms.pager.current_page, direction);
                self.dispatch(Action::Forms(FormsAction::SetPage { page }));
            }
            View::OrgUnits => {}
        }
    }

    /// Enter on a table row: confirm an armed delete, otherwise toggle the
    /// active mark.
    pub fn activate_row(&mut self) {
        let Some(uuid) = self.current_row_uuid() else {
            return;
        };
        match self.view {
            View::Users => {
                if self.users.pending_delete.as_deref() == Some(uuid.as_str()) {
                    self.dispatch(Action::Users(UsersAction::Delete { uuid }));
                    return;
                }
                let next = (self.users.active.as_deref() != Some(uuid.as_str()))
                    .then_some(uuid);
                self.dispatch(Action::Users(UsersAction::SetActive { uuid: next }));
            }
            View::Forms => {
                if self.forms.pending_delete.as_deref() == Some(uuid.as_str()) {
                    self.dispatch(Action::Forms(FormsAction::Delete { uuid }));
                    return;
                }
                let next = (self.forms.active.as_deref() != Some(uuid.as_str()))
                    .then_some(uuid);
                self.dispatch(Action::Forms(FormsAction::SetActive { uuid: next }));
            }
            View::OrgUnits => {}
        }
    }

    /// Arm the delete confirmation for the row under the cursor.
    pub fn arm_delete(&mut self) {
        let Some(uuid) = self.current_row_uuid() else {
            return;
        };
        match self.view {
            View::Users => {
                self.dispatch(Action::Users(UsersAction::ConfirmDelete { uuid: Some(uuid) }));
            }
            View::Forms => {
                self.dispatch(Action::Forms(FormsAction::ConfirmDelete { uuid: Some(uuid) }));
            }
            View::OrgUnits => {}
        }
    }

    /// Escape in a table: disarm a pending delete.
    pub fn disarm_delete(&mut self) {
        match self.view {
            View::Users if self.users.pending_delete.is_some() => {
                self.dispatch(Action::Users(UsersAction::ConfirmDelete { uuid: None }));
            }
            View::Forms if self.forms.pending_delete.is_some() => {
                self.dispatch(Action::Forms(FormsAction::ConfirmDelete { uuid: None }));
            }
            _ => {}
        }
    }

    /// Reload the catalogue behind the current view.
    pub fn refresh(&mut self) {
        match self.view {
            View::Users => {
                self.dispatch(Action::Users(UsersAction::Load));
                self.dispatch(Action::Roles(RolesAction::Load));
            }
            View::Forms => self.dispatch(Action::Forms(FormsAction::Load)),
            View::OrgUnits => self.dispatch(Action::OrgUnits(OrgUnitsAction::Load)),
        }
    }

    // ------------------------------------------------------------------
    // Filter line (users view)
    // ------------------------------------------------------------------

    pub fn begin_filter(&mut self) {
        if self.view == View::Users {
            self.focus = Focus::Filter;
        }
    }

    pub fn filter_input(&mut self, ch: char) {
        let mut text = self.users.filter.clone();
        text.push(ch);
        self.dispatch(Action::Users(UsersAction::SetFilter { text }));
    }

    pub fn filter_backspace(&mut self) {
        let mut text = self.users.filter.clone();
        text.pop();
        self.dispatch(Action::Users(UsersAction::SetFilter { text }));
    }

    /// Leave filter entry. `keep` preserves the needle; otherwise the
    /// filter resets and the full collection comes back.
    pub fn end_filter(&mut self, keep: bool) {
        if !keep && !self.users.filter.is_empty() {
            self.dispatch(Action::Users(UsersAction::SetFilter {
                text: String::new(),
            }));
        }
        self.focus = Focus::Table;
    }

    // ------------------------------------------------------------------
    // Dialogs and pickers
    // ------------------------------------------------------------------

    pub fn user_form(&self) -> &UserFormState {
        &self.user_form
    }

    pub fn form_draft(&self) -> &FormDraftState {
        &self.form_draft
    }

    pub fn dispatch_user_form(&mut self, intent: UserFormIntent) {
        reduce_dialog!(self, user_form, UserFormReducer, intent);
    }

    pub fn dispatch_form_draft(&mut self, intent: FormDraftIntent) {
        reduce_dialog!(self, form_draft, FormDraftReducer, intent);
    }

    /// Open the add dialog for the current view.
    pub fn open_add_dialog(&mut self) {
        match self.view {
            View::Users => {
                self.dispatch_user_form(UserFormIntent::Open {
                    roles: self.roles.items.clone(),
                });
                self.focus = Focus::Popup(PopupKind::UserForm);
            }
            View::Forms => {
                self.dispatch_form_draft(FormDraftIntent::Open);
                self.focus = Focus::Popup(PopupKind::FormDraft);
            }
            View::OrgUnits => {}
        }
    }

    /// Escape inside a dialog; closes it once the reducer agrees.
    pub fn request_close_dialog(&mut self) {
        match self.popup_kind() {
            Some(PopupKind::UserForm) => {
                self.dispatch_user_form(UserFormIntent::RequestClose);
                if !self.user_form.is_visible() {
                    self.focus = Focus::Table;
                }
            }
            Some(PopupKind::FormDraft) => {
                self.dispatch_form_draft(FormDraftIntent::RequestClose);
                if !self.form_draft.is_visible() {
                    self.focus = Focus::Table;
                }
            }
            Some(_) => self.focus = Focus::Table,
            None => {}
        }
    }

    /// Submit whichever dialog is open. Validation failures stay inline;
    /// a valid draft dispatches the create action and leaves the dialog
    /// up until the outcome arrives.
    pub fn submit_dialog(&mut self) {
        match self.popup_kind() {
            Some(PopupKind::UserForm) => {
                let Some(data) = self.user_form.data() else {
                    return;
                };
                match data.to_draft() {
                    Ok(draft) => self.dispatch(Action::Users(UsersAction::Create { draft })),
                    Err(message) => {
                        self.dispatch_user_form(UserFormIntent::SetError { message });
                    }
                }
            }
            Some(PopupKind::FormDraft) => {
                let Some(data) = self.form_draft.data() else {
                    return;
                };
                match data.to_draft() {
                    Ok(draft) => self.dispatch(Action::Forms(FormsAction::Create { draft })),
                    Err(message) => {
                        self.dispatch_form_draft(FormDraftIntent::SetError { message });
                    }
                }
            }
            _ => {}
        }
    }

    pub fn open_org_unit_picker(&mut self) {
        if self.view != View::Forms {
            return;
        }
        if self.org_units.load.is_idle() {
            self.dispatch(Action::OrgUnits(OrgUnitsAction::Load));
        }
        self.picker_row = 0;
        self.focus = Focus::Popup(PopupKind::OrgUnitPicker);
    }

    pub fn open_period_picker(&mut self) {
        if self.view != View::Forms {
            return;
        }
        self.picker_row = 0;
        self.focus = Focus::Popup(PopupKind::PeriodPicker);
    }

    pub fn toggle_action_log(&mut self) {
        self.focus = match self.focus {
            Focus::Popup(PopupKind::ActionLog) => Focus::Table,
            _ => Focus::Popup(PopupKind::ActionLog),
        };
    }

    pub fn picker_row(&self) -> usize {
        self.picker_row
    }

    fn picker_len(&self) -> usize {
        match self.popup_kind() {
            Some(PopupKind::OrgUnitPicker) => self.org_units.items.len(),
            Some(PopupKind::PeriodPicker) => self.periods.len(),
            _ => 0,
        }
    }

    pub fn move_picker_row(&mut self, direction: i32) {
        let len = self.picker_len();
        if len == 0 {
            self.picker_row = 0;
            return;
        }
        let current = self.picker_row.min(len - 1);
        self.picker_row = if direction.is_negative() {
            if current == 0 {
                len - 1
            } else {
                current - 1
            }
        } else if current + 1 >= len {
            0
        } else {
            current + 1
        };
    }

    /// Enter inside a picker: dispatch the context choice and close.
    pub fn pick_current(&mut self) {
        match self.popup_kind() {
            Some(PopupKind::OrgUnitPicker) => {
                if let Some(unit) = self.org_units.items.get(self.picker_row).cloned() {
                    self.dispatch(Action::Forms(FormsAction::SetOrgUnit { unit }));
                }
                self.focus = Focus::Table;
            }
            Some(PopupKind::PeriodPicker) => {
                if let Some(period) = self.periods.get(self.picker_row).cloned() {
                    self.dispatch(Action::Forms(FormsAction::SetPeriod { period }));
                }
                self.focus = Focus::Table;
            }
            _ => {}
        }
    }

    /// Drop popup focus if `kind` is the one showing.
    fn dismiss_popup(&mut self, kind: PopupKind) {
        if self.focus == Focus::Popup(kind) {
            self.focus = Focus::Table;
        }
    }

    // ------------------------------------------------------------------
    // Read access for rendering
    // ------------------------------------------------------------------

    pub fn users(&self) -> &UsersState {
        &self.users
    }

    pub fn roles(&self) -> &RolesState {
        &self.roles
    }

    pub fn forms(&self) -> &FormsState {
        &self.forms
    }

    pub fn org_units(&self) -> &OrgUnitsState {
        &self.org_units
    }

    pub fn periods(&self) -> &[Period] {
        &self.periods
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn action_log(&self) -> &ActionLog {
        &self.action_log
    }

    pub fn config(&self) -> &ConfigStore {
        &self.config
    }

    fn show_info(&mut self, text: impl Into<String>) {
        self.notice = Some(Notice::info(text, self.notice_ttl));
    }

    fn show_error(&mut self, text: impl Into<String>) {
        self.notice = Some(Notice::error(text, self.notice_ttl));
    }
}

fn stepped(current: u64, direction: i64) -> u64 {
    if direction.is_negative() {
        current.saturating_sub(direction.unsigned_abs())
    } else {
        current.saturating_add(direction as u64)
    }
}
