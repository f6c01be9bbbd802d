//! Install command - unpack the bundled gogrep for this platform

use crate::context::Context;
use crate::output;
use anyhow::Result;
use gogrepper_tool::InstallOutcome;
use std::path::PathBuf;

/// Execute `gogrepper install`
///
/// Returns 1 when the host has no bundled binary.
pub fn run(config: Option<PathBuf>) -> Result<i32> {
    let mut ctx = Context::new(config)?;
    let installer = ctx.installer()?;
    log::debug!("bundle dir: {}", installer.bundle_dir().display());

    match installer.fix_missing_tool(&mut ctx.session.install, &ctx.store)? {
        InstallOutcome::Installed { binary } => {
            println!("✓ Installed to: {}", binary.display());
            output::notice("installed gogrep, 'gogrep.binary' setting is updated");
            Ok(0)
        }
        InstallOutcome::Unsupported { key } => {
            output::warn(format!("no bundled gogrep for platform {}", key));
            Ok(1)
        }
        InstallOutcome::AlreadyAttempted => Ok(0),
    }
}
