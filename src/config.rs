// Copyright 2025 dentsusoken
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.


use crate::error::{Result, SdkprepError};
use crate::paths::ToolVersions;
use crate::platform::HostFamily;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_FILE_NAME: &str = "sdkprep.toml";
pub const ENV_PREFIX: &str = "SDKPREP";

const DEFAULT_CMDLINE_TOOLS_REVISION: &str = "8092744";
const DEFAULT_NDK_VERSION: &str = "19.2.5345600";
const DEFAULT_BASE_URL: &str = "https://dl.google.com/android/repository/";
const DEFAULT_TIMEOUT_SECS: u64 = 300;
const DEFAULT_RETRY_ATTEMPTS: usize = 5;
const DEFAULT_RETRY_DELAY_MS: u64 = 1000;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SdkprepConfig {
    /// Installation root; the current directory when unset
    #[serde(default)]
    pub root_dir: Option<PathBuf>,

    #[serde(default)]
    pub tools: ToolsConfig,

    #[serde(default)]
    pub packages: PackagesConfig,

    #[serde(default)]
    pub download: DownloadConfig,

    #[serde(default)]
    pub retry: RetryConfig,

    #[serde(default)]
    pub sdkmanager: SdkManagerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolsConfig {
    #[serde(default = "default_cmdline_tools_revision")]
    pub cmdline_tools_revision: String,

    #[serde(default = "default_ndk_version")]
    pub ndk_version: String,

    /// Overrides the platform tag of the archive name (`linux`, `mac`, ...)
    #[serde(default)]
    pub archive_platform: Option<String>,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            cmdline_tools_revision: default_cmdline_tools_revision(),
            ndk_version: default_ndk_version(),
            archive_platform: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackagesConfig {
    /// Packages installed before the NDK, in request order
    #[serde(default = "default_install_packages")]
    pub install: Vec<String>,
}

impl Default for PackagesConfig {
    fn default() -> Self {
        Self {
            install: default_install_packages(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_true")]
    pub verify_certificates: bool,

    #[serde(default = "default_true")]
    pub show_progress: bool,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            verify_certificates: true,
            show_progress: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    #[serde(default = "default_retry_attempts")]
    pub attempts: usize,

    #[serde(default = "default_retry_delay_ms")]
    pub delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            attempts: DEFAULT_RETRY_ATTEMPTS,
            delay_ms: DEFAULT_RETRY_DELAY_MS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SdkManagerConfig {
    /// Run `sdkmanager --list` before installing
    #[serde(default = "default_true")]
    pub list_packages: bool,

    /// Number of "y" answers to feed; unbounded until the child exits when unset
    #[serde(default)]
    pub confirm_answers: Option<usize>,
}

impl Default for SdkManagerConfig {
    fn default() -> Self {
        Self {
            list_packages: true,
            confirm_answers: None,
        }
    }
}

fn default_cmdline_tools_revision() -> String {
    DEFAULT_CMDLINE_TOOLS_REVISION.to_string()
}

fn default_ndk_version() -> String {
    DEFAULT_NDK_VERSION.to_string()
}

fn default_install_packages() -> Vec<String> {
    [
        "platform-tools",
        "cmdline-tools;latest",
        "platforms;android-28",
        "build-tools;29.0.2",
        "cmake;3.10.2.4988404",
    ]
    .iter()
    .map(|p| p.to_string())
    .collect()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_retry_attempts() -> usize {
    DEFAULT_RETRY_ATTEMPTS
}

fn default_retry_delay_ms() -> u64 {
    DEFAULT_RETRY_DELAY_MS
}

fn default_true() -> bool {
    true
}

impl SdkprepConfig {
    /// Load configuration for the given root directory.
    ///
    /// Sources, lowest precedence first: compiled defaults, `sdkprep.toml` in
    /// `root`, then `SDKPREP_*` environment variables (`__` separates nested
    /// keys, e.g. `SDKPREP_RETRY__ATTEMPTS`).
    pub fn load(root: &Path) -> Result<Self> {
        let config_path = root.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            log::debug!("Loading config from {config_path:?}");
        } else {
            log::debug!("Config file not found at {config_path:?}, using defaults");
        }

        let settings = config::Config::builder()
            .add_source(config::File::from(config_path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("packages.install")
                    .try_parsing(true),
            )
            .build()?;

        let config: SdkprepConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.tools.cmdline_tools_revision.trim().is_empty() {
            return Err(SdkprepError::InvalidConfig(
                "tools.cmdline_tools_revision must not be empty".to_string(),
            ));
        }
        if self.tools.ndk_version.trim().is_empty() {
            return Err(SdkprepError::InvalidConfig(
                "tools.ndk_version must not be empty".to_string(),
            ));
        }
        if self.retry.attempts == 0 {
            return Err(SdkprepError::InvalidConfig(
                "retry.attempts must be at least 1".to_string(),
            ));
        }
        if !(self.download.base_url.starts_with("https://")
            || self.download.base_url.starts_with("http://"))
        {
            return Err(SdkprepError::InvalidConfig(format!(
                "download.base_url must be an http(s) URL: {}",
                self.download.base_url
            )));
        }
        if self.sdkmanager.confirm_answers == Some(0) {
            return Err(SdkprepError::InvalidConfig(
                "sdkmanager.confirm_answers must be at least 1 when set".to_string(),
            ));
        }
        Ok(())
    }

    pub fn tool_versions(&self) -> ToolVersions {
        ToolVersions::new(
            self.tools.cmdline_tools_revision.clone(),
            self.tools.ndk_version.clone(),
        )
    }

    /// Platform tag used in the archive name for `host`.
    pub fn archive_tag(&self, host: &HostFamily) -> String {
        self.tools
            .archive_platform
            .clone()
            .unwrap_or_else(|| host.archive_tag())
    }

    /// Full download URL of the command-line tools archive.
    pub fn download_url(&self, archive_file_name: &str) -> String {
        if self.download.base_url.ends_with('/') {
            format!("{}{archive_file_name}", self.download.base_url)
        } else {
            format!("{}/{archive_file_name}", self.download.base_url)
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.download.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = SdkprepConfig::default();
        assert_eq!(config.tools.cmdline_tools_revision, "8092744");
        assert_eq!(config.tools.ndk_version, "19.2.5345600");
        assert_eq!(config.retry.attempts, 5);
        assert_eq!(config.retry.delay_ms, 1000);
        assert!(config.download.verify_certificates);
        assert!(config.sdkmanager.list_packages);
        assert_eq!(config.sdkmanager.confirm_answers, None);
        assert_eq!(
            config.packages.install,
            vec![
                "platform-tools",
                "cmdline-tools;latest",
                "platforms;android-28",
                "build-tools;29.0.2",
                "cmake;3.10.2.4988404",
            ]
        );
        config.validate().unwrap();
    }

    #[test]
    fn test_load_missing_config() {
        let temp_dir = TempDir::new().unwrap();
        let config = SdkprepConfig::load(temp_dir.path()).unwrap();
        assert_eq!(config.download.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_partial_config_file() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join(CONFIG_FILE_NAME),
            r#"
[tools]
ndk_version = "21.4.7075529"

[retry]
attempts = 2
"#,
        )
        .unwrap();

        let config = SdkprepConfig::load(temp_dir.path()).unwrap();
        assert_eq!(config.tools.ndk_version, "21.4.7075529");
        assert_eq!(config.tools.cmdline_tools_revision, "8092744");
        assert_eq!(config.retry.attempts, 2);
        assert_eq!(config.retry.delay_ms, 1000);
    }

    #[test]
    fn test_invalid_config_file_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join(CONFIG_FILE_NAME),
            "[retry]\nattempts = 0\n",
        )
        .unwrap();

        let err = SdkprepConfig::load(temp_dir.path()).unwrap_err();
        assert!(matches!(err, SdkprepError::InvalidConfig(_)));
    }

    #[test]
    fn test_validate_rejects_non_http_base_url() {
        let mut config = SdkprepConfig::default();
        config.download.base_url = "ftp://mirror.example/".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_download_url_joins_base() {
        let mut config = SdkprepConfig::default();
        assert_eq!(
            config.download_url("commandlinetools-linux-8092744_latest.zip"),
            "https://dl.google.com/android/repository/commandlinetools-linux-8092744_latest.zip"
        );

        config.download.base_url = "http://mirror.local/android".to_string();
        assert_eq!(
            config.download_url("a.zip"),
            "http://mirror.local/android/a.zip"
        );
    }

    #[test]
    fn test_archive_tag_override() {
        let mut config = SdkprepConfig::default();
        assert_eq!(config.archive_tag(&HostFamily::MacOs), "mac");

        config.tools.archive_platform = Some("win".to_string());
        assert_eq!(config.archive_tag(&HostFamily::Windows), "win");
    }
}
