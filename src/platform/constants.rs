//! Platform-specific constants and utility functions.

use super::HostFamily;

/// Suffix of launcher scripts shipped in the command-line tools
pub fn script_extension(host: &HostFamily) -> &'static str {
    if host.is_windows() { ".bat" } else { "" }
}

/// File name of the sdkmanager launcher for the given host
pub fn sdkmanager_launcher_name(host: &HostFamily) -> String {
    format!("sdkmanager{}", script_extension(host))
}
