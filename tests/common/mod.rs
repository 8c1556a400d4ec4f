//! Shared test utilities and the mock reporting API.

#![allow(dead_code, unused_imports)]

pub mod mock_api;

use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use fieldbook::api::types::{PersonRef, ReportForm, RoleRef, User};
use fieldbook::api::ApiClient;
use fieldbook::config::{ApiConfig, Config, ConfigStore};
use fieldbook::ui::app::App;

pub fn make_app() -> App {
    make_app_with(Config::default())
}

pub fn make_app_with(config: Config) -> App {
    let store = ConfigStore::new(config, PathBuf::from("/tmp/fieldbook-test.toml"));
    App::new(store)
}

pub fn press_key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

/// Type a string through the key handler, one character at a time.
pub fn type_text(app: &mut App, text: &str) {
    for ch in text.chars() {
        app.on_key(press_key(KeyCode::Char(ch)));
    }
}

/// Client pointed at a mock server, auth disabled.
pub fn make_client(base_url: &str) -> ApiClient {
    ApiClient::new(&api_config(base_url))
}

pub fn api_config(base_url: &str) -> ApiConfig {
    ApiConfig {
        base_url: base_url.to_string(),
        token_env: String::new(),
        connect_timeout_seconds: 2,
        request_timeout_seconds: 5,
    }
}

// -- Sample data ---------------------------------------------------------

pub fn user(uuid: &str, display: &str) -> User {
    User {
        uuid: uuid.to_string(),
        username: display.to_lowercase().replace(' ', "."),
        person: PersonRef {
            uuid: format!("p-{uuid}"),
            display: display.to_string(),
        },
        roles: vec![RoleRef {
            uuid: "r-1".to_string(),
            display: "Data entry".to_string(),
        }],
        system_id: None,
    }
}

pub fn form(uuid: &str, name: &str) -> ReportForm {
    ReportForm {
        uuid: uuid.to_string(),
        name: name.to_string(),
        period_type: Some("Monthly".to_string()),
    }
}

/// Wire-shape list body for the given users.
pub fn users_body(users: &[(&str, &str)]) -> String {
    let results: Vec<serde_json::Value> = users
        .iter()
        .map(|(uuid, display)| {
            serde_json::json!({
                "uuid": uuid,
                "username": display.to_lowercase().replace(' ', "."),
                "person": {"uuid": format!("p-{uuid}"), "display": display},
                "roles": [{"uuid": "r-1", "display": "Data entry"}],
            })
        })
        .collect();
    serde_json::json!({ "results": results }).to_string()
}

pub fn forms_body(forms: &[(&str, &str)]) -> String {
    let results: Vec<serde_json::Value> = forms
        .iter()
        .map(|(uuid, name)| {
            serde_json::json!({"uuid": uuid, "name": name, "periodType": "Monthly"})
        })
        .collect();
    serde_json::json!({ "results": results }).to_string()
}
