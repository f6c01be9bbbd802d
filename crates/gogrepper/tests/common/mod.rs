//! Shared helpers for CLI integration tests

#![allow(dead_code)]

use assert_cmd::Command;
use assert_cmd::cargo_bin;
use std::fs;
use std::path::{Path, PathBuf};

/// `gogrepper` with an explicit config file and no inherited override
pub fn gogrepper(config: &Path) -> Command {
    let mut cmd = Command::new(cargo_bin!(env!("CARGO_PKG_NAME")));
    cmd.env_remove("GOGREPPER_CONFIG")
        .env_remove("RUST_LOG")
        .arg("--config")
        .arg(config);
    cmd
}

/// Write a config pointing `gogrep.binary` at `binary`
pub fn write_config(dir: &Path, binary: &str, extra: &str) -> PathBuf {
    let path = dir.join("config.toml");
    let content = format!("[gogrep]\nbinary = '{}'\n\n{}\n", binary, extra);
    fs::write(&path, content).expect("Failed to write config");
    path
}

/// A Go package with a single `main.go`
pub fn write_go_package(dir: &Path) -> PathBuf {
    fs::create_dir_all(dir).expect("Failed to create package dir");
    let file = dir.join("main.go");
    fs::write(&file, "package main\n\nfunc main() {}\n").expect("Failed to write main.go");
    file
}
