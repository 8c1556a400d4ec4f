//! Thread-safe configuration storage.

use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use crate::config::loader::ConfigError;
use crate::config::types::Config;

/// Shared config container with interior mutability.
///
/// Readers take cheap clones of the current config; `reload` swaps in a
/// fresh copy from disk without disturbing them.
#[derive(Clone)]
pub struct ConfigStore {
    inner: Arc<RwLock<Config>>,
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(config: Config, path: PathBuf) -> Self {
        Self {
            inner: Arc::new(RwLock::new(config)),
            path,
        }
    }

    /// Clone of the current config.
    pub fn get(&self) -> Config {
        self.inner.read().expect("config lock poisoned").clone()
    }

    /// Re-read the file backing this store. On failure the old config
    /// stays in place and the error is returned.
    pub fn reload(&self) -> Result<(), ConfigError> {
        let config = Config::load_from(&self.path)?;
        config.validate()?;
        let mut guard = self.inner.write().expect("config lock poisoned");
        *guard = config;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
