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

use crate::error::SdkprepError;
use std::fmt;

pub struct ErrorContext<'a> {
    pub error: &'a SdkprepError,
    pub suggestion: Option<String>,
    pub details: Option<String>,
}

impl<'a> ErrorContext<'a> {
    pub fn new(error: &'a SdkprepError) -> Self {
        let (suggestion, details) = match error {
            SdkprepError::Download(msg) => {
                let suggestion = Some(
                    "Check your internet connection and try again. Use --timeout to increase \
                     timeout if needed."
                        .to_string(),
                );
                let details = Some(format!("Download failed: {msg}"));
                (suggestion, details)
            }
            SdkprepError::Extract(msg) => {
                let suggestion =
                    Some("Ensure you have enough disk space and try again.".to_string());
                let details = Some(format!("Extraction failed: {msg}"));
                (suggestion, details)
            }
            SdkprepError::CommandFailed { command, .. } => {
                let suggestion = if command.contains("sdkmanager") {
                    Some(
                        "Review the sdkmanager output above. A Java runtime (JAVA_HOME) is \
                         required and every package id must exist in the repository."
                            .to_string(),
                    )
                } else {
                    Some("Review the command output above for the cause.".to_string())
                };
                let details = None;
                (suggestion, details)
            }
            SdkprepError::CommandNotFound(command) => {
                let suggestion = if command == "unzip" {
                    Some(
                        "Install the 'unzip' utility (e.g. apt-get install unzip) and try again."
                            .to_string(),
                    )
                } else {
                    Some(format!(
                        "Ensure '{command}' exists. The command-line tools archive may not have \
                         been extracted."
                    ))
                };
                let details = None;
                (suggestion, details)
            }
            SdkprepError::EnvironmentWrite { path, .. } => {
                let suggestion = Some(format!("Ensure the file is writable: {path}"));
                let details = None;
                (suggestion, details)
            }
            SdkprepError::ConfigError(msg) | SdkprepError::InvalidConfig(msg) => {
                let suggestion = Some(
                    "Check sdkprep.toml in the root directory and any SDKPREP_* environment \
                     variables."
                        .to_string(),
                );
                let details = Some(msg.clone());
                (suggestion, details)
            }
            SdkprepError::PermissionDenied(path) => {
                let suggestion = if cfg!(unix) {
                    Some(format!(
                        "Try running with sudo or ensure you have write permissions to: {path}"
                    ))
                } else {
                    Some(format!(
                        "Run as Administrator or ensure you have write permissions to: {path}"
                    ))
                };
                let details = None;
                (suggestion, details)
            }
            SdkprepError::SecurityError(msg) => {
                let suggestion = Some(
                    "The archive may be corrupted or tampered with. Delete it and download again."
                        .to_string(),
                );
                let details = Some(msg.clone());
                (suggestion, details)
            }
            SdkprepError::NetworkError(msg) => {
                let suggestion =
                    Some("Check your internet connection and proxy settings.".to_string());
                let details = Some(format!("Network issue: {msg}"));
                (suggestion, details)
            }
            SdkprepError::Http(http_err) => {
                let error_string = http_err.to_string();
                let suggestion = if error_string.contains("timeout")
                    || error_string.contains("Timeout")
                {
                    Some(
                        "Try increasing the timeout with --timeout option (e.g., --timeout 600)."
                            .to_string(),
                    )
                } else if error_string.contains("certificate")
                    || error_string.contains("Certificate")
                {
                    Some(
                        "The host's root certificate store may be outdated. Update it, or pass \
                         --insecure on a trusted CI network."
                            .to_string(),
                    )
                } else if error_string.contains("redirect") || error_string.contains("Redirect") {
                    Some("The download URL has too many redirects. Try again later.".to_string())
                } else {
                    Some("Check your internet connection and try again.".to_string())
                };
                let details = Some(format!("HTTP error: {http_err}"));
                (suggestion, details)
            }
            SdkprepError::Io(io_err) => {
                let suggestion = match io_err.kind() {
                    std::io::ErrorKind::PermissionDenied => {
                        if cfg!(unix) {
                            Some("Try running with sudo or check file permissions.".to_string())
                        } else {
                            Some("Run as Administrator or check file permissions.".to_string())
                        }
                    }
                    std::io::ErrorKind::NotFound => Some(
                        "Ensure the file or directory exists and the path is correct.".to_string(),
                    ),
                    _ => None,
                };
                let details = Some(format!("I/O error: {io_err}"));
                (suggestion, details)
            }
            _ => (None, None),
        };

        ErrorContext {
            error,
            suggestion,
            details,
        }
    }
}

impl<'a> fmt::Display for ErrorContext<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error: {}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\n\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\n\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}
