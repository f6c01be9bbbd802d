use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// config.toml schema
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub gogrep: GogrepConfig,
    #[serde(default)]
    pub go: GoConfig,
    #[serde(default)]
    pub install: InstallConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GogrepConfig {
    /// Binary name or path; rewritten by the installer
    #[serde(default = "default_binary")]
    pub binary: String,
    /// Include `_test.go` files in the search
    #[serde(default = "default_tests")]
    pub tests: bool,
}

impl Default for GogrepConfig {
    fn default() -> Self {
        Self {
            binary: default_binary(),
            tests: default_tests(),
        }
    }
}

fn default_binary() -> String {
    "gogrep".to_string()
}

fn default_tests() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct GoConfig {
    /// Overrides GOPATH for gogrep only; empty keeps the inherited value
    #[serde(default)]
    pub gopath: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct InstallConfig {
    /// Directory holding `gogrep-<os>-<arch>.gz` archives
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bundle_dir: Option<PathBuf>,
}

impl Config {
    /// Configured binary, or `None` when the value is blank
    pub fn binary(&self) -> Option<&str> {
        let binary = self.gogrep.binary.trim();
        (!binary.is_empty()).then_some(binary)
    }

    pub fn gopath(&self) -> Option<String> {
        let gopath = self.go.gopath.trim();
        (!gopath.is_empty()).then(|| gopath.to_string())
    }
}
