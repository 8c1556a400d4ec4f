//! Configuration loading and storage.

pub mod loader;
pub mod store;
pub mod types;

pub use loader::ConfigError;
pub use store::ConfigStore;
pub use types::{ApiConfig, Config, UiConfig};
