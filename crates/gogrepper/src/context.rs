//! Global context for CLI commands

use anyhow::Result;
use gogrepper_core::Session;
use gogrepper_core::config::{Config, ConfigStore, default_config_path};
use gogrepper_tool::Installer;
use std::path::PathBuf;

/// Configuration and session state shared by every action of one run
pub struct Context {
    pub store: ConfigStore,
    pub config: Config,
    pub session: Session,
}

impl Context {
    /// Create a new context by loading the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the config location cannot be determined or the
    /// file exists but cannot be parsed.
    pub fn new(config_path: Option<PathBuf>) -> Result<Self> {
        let path = match config_path {
            Some(path) => path,
            None => default_config_path()?,
        };
        let store = ConfigStore::new(path);
        let config = store.load()?;
        log::debug!("loaded config from {}", store.path().display());

        Ok(Self {
            store,
            config,
            session: Session::new(),
        })
    }

    /// Re-read the configuration after it was changed on disk
    pub fn reload(&mut self) -> Result<()> {
        self.config = self.store.load()?;
        Ok(())
    }

    pub fn installer(&self) -> Result<Installer> {
        let bundle_dir = match &self.config.install.bundle_dir {
            Some(dir) => dir.clone(),
            None => Installer::default_bundle_dir()?,
        };
        Ok(Installer::new(bundle_dir))
    }
}
