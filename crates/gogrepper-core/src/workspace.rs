//! Workspace root detection

use std::path::{Path, PathBuf};

/// Files whose presence marks a workspace root, in priority order
pub const ROOT_MARKERS: &[&str] = &["go.mod", ".git"];

/// Find the workspace root containing `start`.
///
/// Walks up from `start` and returns the nearest ancestor holding one of
/// [`ROOT_MARKERS`]. A `go.mod` anywhere on the way wins over a `.git`
/// further down, so nested modules resolve to the module root.
pub fn find_root(start: &Path) -> Option<PathBuf> {
    for marker in ROOT_MARKERS {
        let found = start
            .ancestors()
            .find(|dir| dir.join(marker).exists())
            .map(Path::to_path_buf);
        if let Some(root) = found {
            log::debug!("workspace root {} (marker {})", root.display(), marker);
            return Some(root);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use gogrepper_testkit::temp_dir_in_workspace;
    use std::fs;

    #[test]
    fn test_find_root_with_go_mod() {
        let temp = temp_dir_in_workspace();
        let root = temp.path();
        fs::write(root.join("go.mod"), "module example.com/app\n").unwrap();
        let nested = root.join("internal").join("pkg");
        fs::create_dir_all(&nested).unwrap();

        assert_eq!(find_root(&nested), Some(root.to_path_buf()));
    }

    #[test]
    fn test_go_mod_wins_over_git() {
        let temp = temp_dir_in_workspace();
        let root = temp.path();
        fs::create_dir(root.join(".git")).unwrap();
        let module = root.join("tools");
        fs::create_dir_all(module.join("cmd")).unwrap();
        fs::write(module.join("go.mod"), "module example.com/tools\n").unwrap();

        assert_eq!(find_root(&module.join("cmd")), Some(module));
    }

    #[test]
    fn test_find_root_with_git_only() {
        let temp = temp_dir_in_workspace();
        let root = temp.path();
        fs::create_dir(root.join(".git")).unwrap();
        let nested = root.join("src");
        fs::create_dir_all(&nested).unwrap();

        assert_eq!(find_root(&nested), Some(root.to_path_buf()));
    }
}
