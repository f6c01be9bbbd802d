use std::path::{Path, PathBuf};

/// Locate the configured gogrep binary without running it
///
/// Values containing a path separator are taken as paths; bare names are
/// looked up in PATH the way the OS would when spawning.
pub fn resolve_binary(binary: &str) -> Option<PathBuf> {
    let path = Path::new(binary);
    if path.components().count() > 1 || path.is_absolute() {
        return path.is_file().then(|| path.to_path_buf());
    }
    match which::which(binary) {
        Ok(found) => Some(found),
        Err(e) => {
            log::debug!("{} not found in PATH: {}", binary, e);
            None
        }
    }
}
