//! Configuration types.

use serde::{Deserialize, Serialize};

/// Root configuration container, read from `config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// Connection settings for the reporting API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL including the API prefix, e.g. "https://reports.example.org/api".
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Name of the environment variable holding the bearer token. Leave
    /// empty for servers that need no authentication.
    #[serde(default = "default_token_env")]
    pub token_env: String,

    /// TCP connect timeout in seconds.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u64,

    /// Whole-request deadline in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
}

/// Presentation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Rows per table page.
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Event-loop tick interval in milliseconds.
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,

    /// How long transient notices stay on screen, in milliseconds.
    #[serde(default = "default_notice_ms")]
    pub notice_ms: u64,
}

fn default_base_url() -> String {
    "http://localhost:8080/api".to_string()
}

fn default_token_env() -> String {
    "FIELDBOOK_TOKEN".to_string()
}

fn default_connect_timeout() -> u64 {
    5
}

fn default_request_timeout() -> u64 {
    30
}

fn default_page_size() -> usize {
    10
}

fn default_tick_ms() -> u64 {
    250
}

fn default_notice_ms() -> u64 {
    3000
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token_env: default_token_env(),
            connect_timeout_seconds: default_connect_timeout(),
            request_timeout_seconds: default_request_timeout(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            tick_ms: default_tick_ms(),
            notice_ms: default_notice_ms(),
        }
    }
}
