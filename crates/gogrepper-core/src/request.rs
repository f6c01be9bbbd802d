//! Search requests and the scopes they are built from

use crate::error::{GogrepError, Result};
use crate::pattern::ParsedPattern;
use std::path::{Path, PathBuf};

/// gogrep target for the package in the working directory
pub const TARGET_CURRENT_PACKAGE: &str = ".";

/// gogrep target for every package below the working directory
pub const TARGET_RECURSIVE: &str = "./...";

/// Where a search runs, one variant per user-facing trigger
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchScope {
    /// Search the package of a file and keep only that file's results
    File(PathBuf),
    /// Search recursively from the directory of a file
    Relative(PathBuf),
    /// Search recursively from the workspace root
    Root(PathBuf),
}

impl SearchScope {
    pub fn target(&self) -> &'static str {
        match self {
            SearchScope::File(_) => TARGET_CURRENT_PACKAGE,
            SearchScope::Relative(_) | SearchScope::Root(_) => TARGET_RECURSIVE,
        }
    }

    pub fn workdir(&self) -> Option<PathBuf> {
        match self {
            SearchScope::File(file) | SearchScope::Relative(file) => file
                .parent()
                .filter(|dir| !dir.as_os_str().is_empty())
                .map(Path::to_path_buf),
            SearchScope::Root(dir) => Some(dir.clone()),
        }
    }

    /// Only file scope filters; gogrep has no single-file target, so the
    /// package is searched and foreign lines are dropped from the output.
    pub fn line_filter(&self) -> Option<String> {
        match self {
            SearchScope::File(file) => Some(file.to_string_lossy().into_owned()),
            SearchScope::Relative(_) | SearchScope::Root(_) => None,
        }
    }
}

/// The kind of operation a request performs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    Search,
    Replace,
    ReplaceInplace,
}

/// Everything needed to run gogrep once
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    /// Package pattern or file passed as the positional argument
    pub target: String,
    pub search_pattern: String,
    /// Empty for search-only requests
    pub replace_pattern: String,
    pub inplace: bool,
    /// Directory gogrep runs in; inherited when `None`
    pub workdir: Option<PathBuf>,
    /// Substring that stdout lines must contain to be shown
    pub line_filter: Option<String>,
    /// GOPATH value for the child process only
    pub gopath: Option<String>,
}

impl SearchRequest {
    pub fn new(scope: &SearchScope, pattern: ParsedPattern) -> Self {
        Self {
            target: scope.target().to_string(),
            search_pattern: pattern.search,
            replace_pattern: pattern.replace,
            inplace: pattern.inplace,
            workdir: scope.workdir(),
            line_filter: scope.line_filter().filter(|f| !f.is_empty()),
            gopath: None,
        }
    }

    pub fn with_gopath(mut self, gopath: Option<String>) -> Self {
        self.gopath = gopath.filter(|p| !p.is_empty());
        self
    }

    pub fn mode(&self) -> SearchMode {
        match (self.replace_pattern.is_empty(), self.inplace) {
            (true, _) => SearchMode::Search,
            (false, false) => SearchMode::Replace,
            (false, true) => SearchMode::ReplaceInplace,
        }
    }

    pub fn has_line_filter(&self) -> bool {
        self.line_filter.as_deref().is_some_and(|f| !f.is_empty())
    }

    /// Reject combinations gogrep must not be started with.
    ///
    /// In-place rewriting touches every file of the searched package while
    /// a line filter only hides output, so the two are never combined.
    pub fn validate(&self) -> Result<()> {
        if self.inplace && self.has_line_filter() {
            return Err(GogrepError::InplaceWithLineFilter);
        }
        Ok(())
    }
}
