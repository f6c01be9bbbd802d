//! Test utilities for gogrepper
//!
//! This crate provides shared testing utilities used across the gogrepper workspace.

pub mod fixtures;

pub use fixtures::{gzip_file, write_fake_gogrep};

use tempfile::TempDir;

/// Creates a temporary directory within `.tmp/` at the current crate root
///
/// This keeps test files in one gitignored place that is easy to clean up
/// manually if a test aborts.
///
/// # Panics
///
/// Panics if:
/// - Unable to determine current directory
/// - Unable to create `.tmp/` directory
/// - Unable to create temporary subdirectory
///
/// # Examples
///
/// ```rust
/// use gogrepper_testkit::temp_dir_in_workspace;
///
/// let temp = temp_dir_in_workspace();
/// let file_path = temp.path().join("main.go");
/// std::fs::write(&file_path, "package main").unwrap();
/// // Cleanup happens automatically when temp is dropped
/// ```
pub fn temp_dir_in_workspace() -> TempDir {
    try_temp_dir_in_workspace().expect("Failed to create temporary directory in .tmp/")
}

/// Alternative with Result for non-test code
pub fn try_temp_dir_in_workspace() -> std::io::Result<TempDir> {
    let workspace_root = std::env::current_dir()?;
    let tmp_base = workspace_root.join(".tmp");
    std::fs::create_dir_all(&tmp_base)?;
    TempDir::new_in(&tmp_base)
}
