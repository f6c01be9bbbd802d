//! Fake gogrep binaries and bundled archives

use std::io::Write;
use std::path::{Path, PathBuf};

/// Writes an executable shell script standing in for gogrep
///
/// `body` is placed after the `#!/bin/sh` line.
///
/// # Panics
///
/// Panics if the script cannot be written or made executable.
#[cfg(unix)]
pub fn write_fake_gogrep(dir: &Path, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).expect("Failed to write fake gogrep");
    let mut perms = std::fs::metadata(&path)
        .expect("Failed to get metadata")
        .permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&path, perms).expect("Failed to set permissions");
    path
}

/// Batch-file variant of [`write_fake_gogrep`]
#[cfg(windows)]
pub fn write_fake_gogrep(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(format!("{}.bat", name));
    std::fs::write(&path, format!("@echo off\r\n{}\r\n", body))
        .expect("Failed to write fake gogrep");
    path
}

/// Gzip `data` into `path`, like the bundled `gogrep-<key>.gz` archives
///
/// # Panics
///
/// Panics if the archive cannot be written.
pub fn gzip_file(path: &Path, data: &[u8]) {
    let file = std::fs::File::create(path).expect("Failed to create archive");
    let mut encoder = flate2::write::GzEncoder::new(file, flate2::Compression::default());
    encoder.write_all(data).expect("Failed to compress data");
    encoder.finish().expect("Failed to finish archive");
}
