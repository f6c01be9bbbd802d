use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GogrepError {
    // User input errors
    #[error("MALFORMED_PATTERN: expected at most one '->' token, found {count}")]
    MalformedPattern { count: usize },

    #[error("INPLACE_WITH_LINE_FILTER: in-place replace for a single file is not implemented yet")]
    InplaceWithLineFilter,

    #[error("NO_ACTIVE_CONTEXT: {0}")]
    NoActiveContext(String),

    // Config errors
    #[error("CONFIG_PARSE_ERROR: failed to parse {path}: {reason}")]
    ConfigParseError { path: PathBuf, reason: String },

    #[error("CONFIG_WRITE_ERROR: failed to write {path}: {reason}")]
    ConfigWriteError { path: PathBuf, reason: String },

    #[error("CONFIG_MISSING_BINARY: Invalid or empty gogrep.binary config value")]
    MissingBinary,

    // Tool errors
    #[error("GOGREP_LAUNCH_FAILED: failed to launch {binary}: {source}")]
    LaunchFailed {
        binary: String,
        #[source]
        source: std::io::Error,
    },

    #[error("GOGREP_INSTALL_FAILED: {operation}: {source}")]
    InstallFailed {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    // IO errors
    #[error("IO_ERROR: {0}")]
    IoError(#[from] std::io::Error),

    // Generic errors
    #[error("{0}")]
    Generic(String),
}

impl GogrepError {
    /// True for launch errors caused by a missing executable.
    ///
    /// The io error kind is checked first; the message check covers
    /// platforms and wrappers that only surface the errno text.
    pub fn is_not_found(&self) -> bool {
        match self {
            GogrepError::LaunchFailed { source, .. } => {
                if source.kind() == std::io::ErrorKind::NotFound {
                    return true;
                }
                let message = source.to_string();
                message.contains("ENOENT") || message.contains("not found")
            }
            _ => false,
        }
    }

    /// User-input and configuration errors are reported as warnings and
    /// abort the action without a process being spawned.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            GogrepError::MalformedPattern { .. }
                | GogrepError::InplaceWithLineFilter
                | GogrepError::NoActiveContext(_)
                | GogrepError::MissingBinary
        )
    }
}

pub type Result<T> = std::result::Result<T, GogrepError>;
