//! Host platform detection for the entire application.
//!
//! The installer only needs to know the platform family: it picks the
//! command-line tools archive, the sdkmanager launcher suffix and the
//! archive extraction strategy.

pub mod file_ops;

mod constants;

pub use constants::{sdkmanager_launcher_name, script_extension};

use std::fmt;

/// Platform family of the machine running the installer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostFamily {
    Windows,
    MacOs,
    Linux,
    Other(String),
}

impl HostFamily {
    /// Detect the family of the running host.
    pub fn current() -> Self {
        Self::from_os_name(std::env::consts::OS)
    }

    /// Map an operating system name (as reported by `std::env::consts::OS`
    /// or `uname`) to a family. Matching is case-insensitive.
    pub fn from_os_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "windows" => HostFamily::Windows,
            "macos" | "darwin" => HostFamily::MacOs,
            "linux" => HostFamily::Linux,
            other => HostFamily::Other(other.to_string()),
        }
    }

    pub fn is_windows(&self) -> bool {
        matches!(self, HostFamily::Windows)
    }

    /// Platform tag used in the command-line tools archive name.
    ///
    /// macOS archives are published as `mac`; every other family uses its
    /// lowercase name.
    pub fn archive_tag(&self) -> String {
        match self {
            HostFamily::Windows => "windows".to_string(),
            HostFamily::MacOs => "mac".to_string(),
            HostFamily::Linux => "linux".to_string(),
            HostFamily::Other(name) => name.clone(),
        }
    }
}

impl fmt::Display for HostFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostFamily::Windows => write!(f, "Windows"),
            HostFamily::MacOs => write!(f, "macOS"),
            HostFamily::Linux => write!(f, "Linux"),
            HostFamily::Other(name) => write!(f, "{name}"),
        }
    }
}
