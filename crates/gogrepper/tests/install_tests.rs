//! Integration tests for the missing-binary install flow

#![cfg(unix)]

mod common;

use common::{gogrepper, write_config, write_go_package};
use gogrepper_testkit::{gzip_file, temp_dir_in_workspace};
use gogrepper_tool::Platform;
use predicates::prelude::*;
use std::fs;

fn supported_host() -> Option<Platform> {
    Platform::detect().filter(Platform::is_supported)
}

#[test]
fn test_missing_binary_reports_not_found() {
    let temp = temp_dir_in_workspace();
    let bundle = temp.path().join("empty-bundle");
    fs::create_dir_all(&bundle).unwrap();
    let config = write_config(
        temp.path(),
        "gogrep-does-not-exist-here",
        &format!("[install]\nbundle_dir = '{}'\n", bundle.display()),
    );
    let file = write_go_package(&temp.path().join("pkg"));

    let assert = gogrepper(&config)
        .args(["dir", file.to_str().unwrap(), "x"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("error:"))
        .stderr(predicate::str::contains(
            "gogrep-does-not-exist-here not found in PATH",
        ));

    // Supported hosts try the (empty) bundle; the read failure propagates.
    if supported_host().is_some() {
        assert.stderr(predicate::str::contains("INSTALL_FAILED"));
    }
}

#[test]
fn test_missing_binary_installs_bundled_gogrep() {
    let Some(platform) = supported_host() else {
        return;
    };
    let temp = temp_dir_in_workspace();
    let bundle = temp.path().join("binaries");
    fs::create_dir_all(&bundle).unwrap();
    gzip_file(
        &bundle.join(platform.archive_name()),
        b"#!/bin/sh\necho bundled\n",
    );
    let config = write_config(
        temp.path(),
        "gogrep-does-not-exist-here",
        &format!("[install]\nbundle_dir = '{}'\n", bundle.display()),
    );
    let file = write_go_package(&temp.path().join("pkg"));

    gogrepper(&config)
        .args(["dir", file.to_str().unwrap(), "x"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "installed gogrep, 'gogrep.binary' setting is updated",
        ));

    let installed = bundle.join(platform.binary_name());
    assert!(installed.is_file());
    let saved = fs::read_to_string(&config).unwrap();
    assert!(saved.contains(installed.to_str().unwrap()));

    // The next run picks up the installed binary.
    gogrepper(&config)
        .args(["dir", file.to_str().unwrap(), "x"])
        .assert()
        .success()
        .stdout(predicate::str::contains("bundled"));
}

#[test]
fn test_install_command_unpacks_archive() {
    let Some(platform) = supported_host() else {
        return;
    };
    let temp = temp_dir_in_workspace();
    let bundle = temp.path().join("binaries");
    fs::create_dir_all(&bundle).unwrap();
    gzip_file(&bundle.join(platform.archive_name()), b"#!/bin/sh\n");
    let config = write_config(
        temp.path(),
        "gogrep",
        &format!("[install]\nbundle_dir = '{}'\n", bundle.display()),
    );

    gogrepper(&config)
        .arg("install")
        .assert()
        .success()
        .stdout(predicate::str::contains("Installed to:"));

    assert!(bundle.join(platform.binary_name()).is_file());
}
