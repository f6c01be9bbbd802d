//! Host platform detection, named the way Go names GOOS and GOARCH

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Os {
    Linux,
    Darwin,
    Windows,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arch {
    Amd64,
    Arm64,
}

impl Os {
    pub fn detect() -> Option<Os> {
        #[cfg(target_os = "linux")]
        return Some(Os::Linux);

        #[cfg(target_os = "macos")]
        return Some(Os::Darwin);

        #[cfg(target_os = "windows")]
        return Some(Os::Windows);

        #[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
        None
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Os::Linux => "linux",
            Os::Darwin => "darwin",
            Os::Windows => "windows",
        }
    }
}

impl Arch {
    pub fn detect() -> Option<Arch> {
        #[cfg(target_arch = "x86_64")]
        return Some(Arch::Amd64);

        #[cfg(target_arch = "aarch64")]
        return Some(Arch::Arm64);

        #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
        None
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Arch::Amd64 => "amd64",
            Arch::Arm64 => "arm64",
        }
    }
}

/// An OS/architecture pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Platform {
    pub os: Os,
    pub arch: Arch,
}

/// Platforms with a bundled prebuilt gogrep
pub const SUPPORTED_PLATFORMS: &[Platform] = &[
    Platform {
        os: Os::Linux,
        arch: Arch::Amd64,
    },
    Platform {
        os: Os::Windows,
        arch: Arch::Amd64,
    },
    Platform {
        os: Os::Darwin,
        arch: Arch::Amd64,
    },
];

impl Platform {
    /// `None` when either the OS or the architecture is unrecognised
    pub fn detect() -> Option<Platform> {
        Some(Platform {
            os: Os::detect()?,
            arch: Arch::detect()?,
        })
    }

    /// `<goos>-<goarch>`, e.g. `linux-amd64`
    pub fn key(&self) -> String {
        format!("{}-{}", self.os.as_str(), self.arch.as_str())
    }

    pub fn is_supported(&self) -> bool {
        SUPPORTED_PLATFORMS.contains(self)
    }

    pub fn archive_name(&self) -> String {
        format!("gogrep-{}.gz", self.key())
    }

    pub fn binary_name(&self) -> String {
        match self.os {
            Os::Windows => format!("gogrep-{}.exe", self.key()),
            Os::Linux | Os::Darwin => format!("gogrep-{}", self.key()),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}

/// Platform key of the host even when [`Platform::detect`] does not know it
pub fn host_key() -> String {
    let os = match std::env::consts::OS {
        "macos" => "darwin",
        other => other,
    };
    let arch = match std::env::consts::ARCH {
        "x86_64" => "amd64",
        "aarch64" => "arm64",
        "x86" => "386",
        other => other,
    };
    format!("{}-{}", os, arch)
}
