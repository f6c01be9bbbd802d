//! Doctor command - environment health check

use crate::context::Context;
use anyhow::Result;
use colored::Colorize;
use gogrepper_core::config::default_config_path;
use gogrepper_tool::install::host_key;
use gogrepper_tool::resolve::resolve_binary;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Doctor command JSON output schema
#[derive(Debug, Serialize)]
struct DoctorOutput {
    schema_version: String,
    config_path: String,
    checks: Vec<Check>,
}

#[derive(Debug, Serialize)]
struct Check {
    id: String,
    name: String,
    status: CheckStatus,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<BTreeMap<String, serde_json::Value>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
enum CheckStatus {
    Ok,
    Warning,
    Error,
}

impl Check {
    fn new(id: &str, name: &str, status: CheckStatus, message: impl Into<String>) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            status,
            message: message.into(),
            details: None,
        }
    }

    fn detail(mut self, key: &str, value: impl Into<String>) -> Self {
        self.details
            .get_or_insert_with(BTreeMap::new)
            .insert(key.to_string(), serde_json::Value::String(value.into()));
        self
    }
}

/// Run environment health check
///
/// Always returns Ok(0); problems are reported as failed checks.
/// `verbose` adds check details to the human-readable report.
pub fn run(config: Option<PathBuf>, verbose: u8, json: bool) -> Result<i32> {
    let config_path = match config.clone().map(Ok).unwrap_or_else(default_config_path) {
        Ok(path) => path.display().to_string(),
        Err(e) => format!("<unknown: {}>", e),
    };

    let mut checks = Vec::new();

    // Check 1: config file
    let ctx = match Context::new(config) {
        Ok(ctx) => {
            let message = if ctx.store.exists() {
                "config file is valid"
            } else {
                "no config file, using defaults"
            };
            checks.push(Check::new(
                "config_valid",
                "Configuration file",
                CheckStatus::Ok,
                message,
            ));
            Some(ctx)
        }
        Err(e) => {
            checks.push(Check::new(
                "config_valid",
                "Configuration file",
                CheckStatus::Error,
                format!("Failed to load config: {:#}", e),
            ));
            None
        }
    };

    if let Some(ctx) = &ctx {
        checks.push(check_binary(ctx));
        checks.extend(check_install(ctx));
    }

    let output = DoctorOutput {
        schema_version: "1.0".to_string(),
        config_path,
        checks,
    };

    if json {
        let json_str = serde_json::to_string_pretty(&output)?;
        crate::output::print_json(&json_str)?;
    } else {
        print_human_readable(&output, verbose > 0);
    }

    Ok(0)
}

fn check_binary(ctx: &Context) -> Check {
    const ID: &str = "gogrep_available";
    const NAME: &str = "gogrep binary";

    let Some(binary) = ctx.config.binary() else {
        return Check::new(
            ID,
            NAME,
            CheckStatus::Error,
            "Invalid or empty gogrep.binary config value",
        );
    };

    match resolve_binary(binary) {
        Some(path) => Check::new(ID, NAME, CheckStatus::Ok, format!("{} found", binary))
            .detail("path", path.display().to_string()),
        None => Check::new(
            ID,
            NAME,
            CheckStatus::Error,
            format!("{} not found in PATH", binary),
        )
        .detail("configured", binary),
    }
}

fn check_install(ctx: &Context) -> Vec<Check> {
    let installer = match ctx.installer() {
        Ok(installer) => installer,
        Err(e) => {
            return vec![Check::new(
                "bundle_dir",
                "Bundled binaries",
                CheckStatus::Error,
                format!("Failed to locate bundle directory: {:#}", e),
            )];
        }
    };

    let Some(platform) = installer.supported_platform() else {
        return vec![Check::new(
            "platform_supported",
            "Platform",
            CheckStatus::Warning,
            format!("no bundled gogrep for {}", host_key()),
        )];
    };

    let mut checks = vec![Check::new(
        "platform_supported",
        "Platform",
        CheckStatus::Ok,
        format!("{} is supported", platform),
    )];

    if let Some(archive) = installer.archive_path() {
        let check = if archive.is_file() {
            Check::new(
                "bundle_present",
                "Bundled archive",
                CheckStatus::Ok,
                "bundled archive present",
            )
        } else {
            Check::new(
                "bundle_present",
                "Bundled archive",
                CheckStatus::Warning,
                "bundled archive missing, install will fail",
            )
        };
        checks.push(check.detail("path", archive.display().to_string()));
    }
    checks
}

/// Print human-readable output
fn print_human_readable(output: &DoctorOutput, show_details: bool) {
    println!("{}", "Environment Health Check".bold());
    println!();
    println!("Config: {}", output.config_path);
    println!();

    println!("{}", "Checks:".bold());
    for check in &output.checks {
        let status_str = match check.status {
            CheckStatus::Ok => "✓".green(),
            CheckStatus::Warning => "⚠".yellow(),
            CheckStatus::Error => "✗".red(),
        };

        println!("  {} {}: {}", status_str, check.name.bold(), check.message);

        if let Some(details) = check.details.as_ref().filter(|_| show_details) {
            for (key, value) in details {
                println!("      {}: {}", key, value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_serializes_lowercase_status() {
        let check = Check::new("id", "Name", CheckStatus::Warning, "msg").detail("path", "/x");
        let value = serde_json::to_value(&check).unwrap();
        assert_eq!(value["status"], "warning");
        assert_eq!(value["details"]["path"], "/x");
    }

    #[test]
    fn test_check_without_details_omits_field() {
        let check = Check::new("id", "Name", CheckStatus::Ok, "msg");
        let value = serde_json::to_value(&check).unwrap();
        assert!(value.get("details").is_none());
    }
}
