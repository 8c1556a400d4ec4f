use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::ui::app::{App, Focus, PopupKind};
use crate::ui::form_draft::FormDraftIntent;
use crate::ui::user_form::UserFormIntent;

/// Route one key press to the focused surface.
pub fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind == KeyEventKind::Release {
        return;
    }
    if is_ctrl_char(&key, 'c') {
        app.request_quit();
        return;
    }

    match app.focus() {
        Focus::Popup(kind) => handle_popup_key(app, kind, key),
        Focus::Filter => handle_filter_key(app, key),
        Focus::Table => handle_table_key(app, key),
    }
}

fn handle_table_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.request_quit(),
        KeyCode::Tab => app.next_view(),
        KeyCode::BackTab => app.prev_view(),
        KeyCode::Up | KeyCode::Char('k') => app.move_table_row(-1),
        KeyCode::Down | KeyCode::Char('j') => app.move_table_row(1),
        KeyCode::Left => app.page_step(-1),
        KeyCode::Right => app.page_step(1),
        KeyCode::Enter => app.activate_row(),
        KeyCode::Esc => app.disarm_delete(),
        KeyCode::Char('d') => app.arm_delete(),
        KeyCode::Char('a') => app.open_add_dialog(),
        KeyCode::Char('/') => app.begin_filter(),
        KeyCode::Char('o') => app.open_org_unit_picker(),
        KeyCode::Char('p') => app.open_period_picker(),
        KeyCode::Char('r') => app.refresh(),
        KeyCode::Char('l') => app.toggle_action_log(),
        _ => {}
    }
}

fn handle_filter_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.end_filter(false),
        KeyCode::Enter => app.end_filter(true),
        KeyCode::Backspace => app.filter_backspace(),
        KeyCode::Char(ch) => app.filter_input(ch),
        _ => {}
    }
}

fn handle_popup_key(app: &mut App, kind: PopupKind, key: KeyEvent) {
    match kind {
        PopupKind::UserForm => handle_user_form_key(app, key),
        PopupKind::FormDraft => handle_form_draft_key(app, key),
        PopupKind::OrgUnitPicker | PopupKind::PeriodPicker => handle_picker_key(app, key),
        PopupKind::ActionLog => match key.code {
            KeyCode::Esc | KeyCode::Char('l') | KeyCode::Char('q') => app.toggle_action_log(),
            _ => {}
        },
    }
}

fn handle_user_form_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.request_close_dialog(),
        KeyCode::Enter => app.submit_dialog(),
        KeyCode::Tab | KeyCode::Down => app.dispatch_user_form(UserFormIntent::FocusNext),
        KeyCode::BackTab | KeyCode::Up => app.dispatch_user_form(UserFormIntent::FocusPrev),
        KeyCode::Backspace => app.dispatch_user_form(UserFormIntent::Backspace),
        // Space toggles a role when the cursor sits on the grid and types
        // into the field otherwise. The reducer tells the two apart.
        KeyCode::Char(' ') => {
            if app.user_form().data().is_some_and(|d| d.focus_on_roles()) {
                app.dispatch_user_form(UserFormIntent::ToggleRole);
            } else {
                app.dispatch_user_form(UserFormIntent::Input { ch: ' ' });
            }
        }
        KeyCode::Char(ch) => app.dispatch_user_form(UserFormIntent::Input { ch }),
        _ => {}
    }
}

fn handle_form_draft_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.request_close_dialog(),
        KeyCode::Enter => app.submit_dialog(),
        KeyCode::Tab => app.dispatch_form_draft(FormDraftIntent::CyclePeriodType),
        KeyCode::Backspace => app.dispatch_form_draft(FormDraftIntent::Backspace),
        KeyCode::Char(ch) => app.dispatch_form_draft(FormDraftIntent::Input { ch }),
        _ => {}
    }
}

fn handle_picker_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.request_close_dialog(),
        KeyCode::Enter => app.pick_current(),
        KeyCode::Up | KeyCode::Char('k') => app.move_picker_row(-1),
        KeyCode::Down | KeyCode::Char('j') => app.move_picker_row(1),
        _ => {}
    }
}

fn is_ctrl_char(key: &KeyEvent, ch: char) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char(ch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, ConfigStore};
    use crate::store::users::UsersAction;
    use crate::store::Action;
    use crate::ui::app::View;
    use std::path::PathBuf;

    fn make_app() -> App {
        let config = ConfigStore::new(Config::default(), PathBuf::from("/tmp/fieldbook.toml"));
        App::new(config)
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn q_quits_from_the_table() {
        let mut app = make_app();
        handle_key(&mut app, press(KeyCode::Char('q')));
        assert!(app.should_quit());
    }

    #[test]
    fn ctrl_c_quits_from_anywhere() {
        let mut app = make_app();
        app.open_add_dialog();
        handle_key(
            &mut app,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        );
        assert!(app.should_quit());
    }

    #[test]
    fn q_types_into_the_filter_instead_of_quitting() {
        let mut app = make_app();
        handle_key(&mut app, press(KeyCode::Char('/')));
        assert_eq!(app.focus(), Focus::Filter);
        handle_key(&mut app, press(KeyCode::Char('q')));
        assert!(!app.should_quit());
        assert_eq!(app.users().filter, "q");
    }

    #[test]
    fn tab_cycles_the_views() {
        let mut app = make_app();
        handle_key(&mut app, press(KeyCode::Tab));
        assert_eq!(app.view(), View::Forms);
        handle_key(&mut app, press(KeyCode::Tab));
        assert_eq!(app.view(), View::OrgUnits);
        handle_key(&mut app, press(KeyCode::Tab));
        assert_eq!(app.view(), View::Users);
    }

    #[test]
    fn escape_in_the_table_disarms_a_pending_delete() {
        let mut app = make_app();
        app.dispatch(Action::Users(UsersAction::LoadSuccess {
            users: vec![crate::api::types::User {
                uuid: "u-1".to_string(),
                username: "ada".to_string(),
                person: crate::api::types::PersonRef {
                    uuid: "p-1".to_string(),
                    display: "Ada".to_string(),
                },
                roles: vec![],
                system_id: None,
            }],
        }));
        handle_key(&mut app, press(KeyCode::Char('d')));
        assert!(app.users().pending_delete.is_some());
        handle_key(&mut app, press(KeyCode::Esc));
        assert!(app.users().pending_delete.is_none());
    }

    #[test]
    fn typed_characters_reach_the_open_user_form() {
        let mut app = make_app();
        handle_key(&mut app, press(KeyCode::Char('a')));
        assert_eq!(app.focus(), Focus::Popup(PopupKind::UserForm));
        handle_key(&mut app, press(KeyCode::Char('A')));
        handle_key(&mut app, press(KeyCode::Char('d')));
        handle_key(&mut app, press(KeyCode::Char('a')));
        let data = app.user_form().data().unwrap();
        assert_eq!(data.first_name, "Ada");
    }

    #[test]
    fn release_events_are_ignored() {
        let mut app = make_app();
        let mut key = press(KeyCode::Char('q'));
        key.kind = KeyEventKind::Release;
        handle_key(&mut app, key);
        assert!(!app.should_quit());
    }
}
