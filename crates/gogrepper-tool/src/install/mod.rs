//! One-shot install of a bundled prebuilt gogrep
//!
//! Prebuilt binaries ship gzip-compressed next to gogrepper as
//! `binaries/gogrep-<os>-<arch>.gz`. When gogrep cannot be launched the
//! archive for the host platform is unpacked beside it and
//! `gogrep.binary` is pointed at the result. This is attempted at most
//! once per session, whatever the outcome.

pub mod platform;

pub use platform::{Arch, Os, Platform, SUPPORTED_PLATFORMS, host_key};

use gogrepper_core::config::ConfigStore;
use gogrepper_core::{GogrepError, InstallAttemptState, Result};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Name of the archive directory next to the executable
pub const BUNDLE_DIR_NAME: &str = "binaries";

/// Mode of the unpacked binary (rwxrwxr-x)
pub const BINARY_MODE: u32 = 0o775;

/// What a call to [`Installer::fix_missing_tool`] did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    /// An earlier call in this session already tried
    AlreadyAttempted,
    /// No prebuilt binary for this platform; nothing was touched
    Unsupported { key: String },
    /// Binary written and recorded in the config
    Installed { binary: PathBuf },
}

/// Installs bundled gogrep binaries
#[derive(Debug, Clone)]
pub struct Installer {
    bundle_dir: PathBuf,
    platform: Option<Platform>,
}

impl Installer {
    /// Installer for the host platform
    pub fn new(bundle_dir: impl Into<PathBuf>) -> Self {
        Self {
            bundle_dir: bundle_dir.into(),
            platform: Platform::detect(),
        }
    }

    /// Override the detected platform (`None` = unrecognised host)
    pub fn with_platform(mut self, platform: Option<Platform>) -> Self {
        self.platform = platform;
        self
    }

    /// `<directory of the running executable>/binaries`
    pub fn default_bundle_dir() -> Result<PathBuf> {
        let exe = std::env::current_exe()?;
        let dir = exe.parent().ok_or_else(|| {
            GogrepError::Generic(format!(
                "Could not determine directory of {}",
                exe.display()
            ))
        })?;
        Ok(dir.join(BUNDLE_DIR_NAME))
    }

    pub fn bundle_dir(&self) -> &Path {
        &self.bundle_dir
    }

    pub fn platform(&self) -> Option<Platform> {
        self.platform
    }

    /// The platform, if the support table has a prebuilt binary for it
    pub fn supported_platform(&self) -> Option<Platform> {
        self.platform.filter(Platform::is_supported)
    }

    /// Archive path for the host, when supported
    pub fn archive_path(&self) -> Option<PathBuf> {
        self.supported_platform()
            .map(|p| self.bundle_dir.join(p.archive_name()))
    }

    /// React to a missing gogrep binary.
    ///
    /// Moves `state` to `Attempted` first, so later calls are no-ops even
    /// when this one fails.
    pub fn fix_missing_tool(
        &self,
        state: &mut InstallAttemptState,
        store: &ConfigStore,
    ) -> Result<InstallOutcome> {
        if !state.begin() {
            log::debug!("install already attempted in this session");
            return Ok(InstallOutcome::AlreadyAttempted);
        }
        self.install_from_prebuilt(store)
    }

    /// Unpack the bundled archive for this platform and record its path.
    pub fn install_from_prebuilt(&self, store: &ConfigStore) -> Result<InstallOutcome> {
        let Some(platform) = self.supported_platform() else {
            let key = self.platform.map(|p| p.key()).unwrap_or_else(host_key);
            log::info!("no prebuilt gogrep for {}, skipping install", key);
            return Ok(InstallOutcome::Unsupported { key });
        };

        let archive_path = self.bundle_dir.join(platform.archive_name());
        let binary_path = self.bundle_dir.join(platform.binary_name());
        log::info!(
            "installing gogrep from {} to {}",
            archive_path.display(),
            binary_path.display()
        );

        let compressed = fs::read(&archive_path).map_err(|e| GogrepError::InstallFailed {
            operation: format!("read {}", archive_path.display()),
            source: e,
        })?;
        let data = gunzip(&compressed).map_err(|e| GogrepError::InstallFailed {
            operation: format!("decompress {}", archive_path.display()),
            source: e,
        })?;
        write_executable(&binary_path, &data)?;

        store.update_binary(&binary_path)?;

        Ok(InstallOutcome::Installed {
            binary: binary_path,
        })
    }
}

fn gunzip(compressed: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut decoder = flate2::read::GzDecoder::new(compressed);
    let mut data = Vec::new();
    decoder.read_to_end(&mut data)?;
    Ok(data)
}

fn write_executable(path: &Path, data: &[u8]) -> Result<()> {
    fs::write(path, data).map_err(|e| GogrepError::InstallFailed {
        operation: format!("write {}", path.display()),
        source: e,
    })?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(BINARY_MODE)).map_err(|e| {
            GogrepError::InstallFailed {
                operation: format!("set permissions for {}", path.display()),
                source: e,
            }
        })?;
    }

    Ok(())
}
