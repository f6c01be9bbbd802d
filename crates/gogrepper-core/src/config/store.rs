use super::model::Config;
use crate::error::{GogrepError, Result};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Environment variable overriding the config file location
pub const CONFIG_ENV: &str = "GOGREPPER_CONFIG";

/// Default config location: `<config_dir>/gogrepper/config.toml`
pub fn default_config_path() -> Result<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_ENV).filter(|p| !p.is_empty()) {
        return Ok(PathBuf::from(path));
    }
    let base = dirs::config_dir()
        .ok_or_else(|| GogrepError::Generic("Could not determine config directory".to_string()))?;
    Ok(base.join("gogrepper").join("config.toml"))
}

/// Reads and writes the configuration file
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Load the config, falling back to defaults when the file is absent
    pub fn load(&self) -> Result<Config> {
        if !self.exists() {
            log::debug!("no config at {}, using defaults", self.path.display());
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(&self.path).map_err(|e| {
            GogrepError::ConfigParseError {
                path: self.path.clone(),
                reason: e.to_string(),
            }
        })?;

        toml::from_str(&content).map_err(|e| GogrepError::ConfigParseError {
            path: self.path.clone(),
            reason: e.to_string(),
        })
    }

    /// Write the config atomically (temp file in the same directory + persist)
    pub fn save(&self, config: &Config) -> Result<()> {
        let write_err = |reason: String| GogrepError::ConfigWriteError {
            path: self.path.clone(),
            reason,
        };

        let content =
            toml::to_string_pretty(config).map_err(|e| write_err(format!("serialize: {}", e)))?;

        let parent = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        std::fs::create_dir_all(parent)
            .map_err(|e| write_err(format!("create parent dir: {}", e)))?;

        let mut temp_file = tempfile::NamedTempFile::new_in(parent)
            .map_err(|e| write_err(format!("create temp file: {}", e)))?;
        temp_file
            .write_all(content.as_bytes())
            .map_err(|e| write_err(format!("write temp file: {}", e)))?;
        temp_file
            .as_file()
            .sync_all()
            .map_err(|e| write_err(format!("sync temp file: {}", e)))?;
        temp_file
            .persist(&self.path)
            .map_err(|e| write_err(format!("persist temp file: {}", e)))?;

        Ok(())
    }

    /// Record a new binary location, keeping every other setting
    pub fn update_binary(&self, binary: &Path) -> Result<Config> {
        let mut config = self.load()?;
        config.gogrep.binary = binary.to_string_lossy().into_owned();
        self.save(&config)?;
        log::info!("gogrep.binary set to {}", binary.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gogrepper_testkit::temp_dir_in_workspace;

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let temp = temp_dir_in_workspace();
        let store = ConfigStore::new(temp.path().join("config.toml"));
        assert!(!store.exists());
        assert_eq!(store.load().unwrap(), Config::default());
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let temp = temp_dir_in_workspace();
        let store = ConfigStore::new(temp.path().join("nested").join("config.toml"));
        store.save(&Config::default()).unwrap();
        assert!(store.exists());
    }

    #[test]
    fn test_update_binary_keeps_other_settings() {
        let temp = temp_dir_in_workspace();
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "[gogrep]\ntests = false\n\n[go]\ngopath = \"/go\"\n").unwrap();
        let store = ConfigStore::new(&path);

        store
            .update_binary(Path::new("/opt/binaries/gogrep-linux-amd64"))
            .unwrap();

        let config = store.load().unwrap();
        assert_eq!(config.binary(), Some("/opt/binaries/gogrep-linux-amd64"));
        assert!(!config.gogrep.tests);
        assert_eq!(config.gopath().as_deref(), Some("/go"));
    }

    #[test]
    fn test_invalid_toml_is_a_parse_error() {
        let temp = temp_dir_in_workspace();
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "[gogrep\nbinary = 1").unwrap();

        let err = ConfigStore::new(&path).load().unwrap_err();
        assert!(matches!(err, GogrepError::ConfigParseError { .. }));
    }
}
