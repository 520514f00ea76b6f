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

//! Environment variable exports for later build steps.
//!
//! Lines are appended to `environment.sh` and `environment.ps1` in the
//! installation root. Existing content is never truncated.

use crate::error::{Result, SdkprepError};
use crate::paths::PathSet;
use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

pub const POSIX_ENVIRONMENT_FILE: &str = "environment.sh";
pub const POWERSHELL_ENVIRONMENT_FILE: &str = "environment.ps1";

const SDK_VARIABLES: [&str; 2] = ["ANDROID_HOME", "ANDROID_SDK_ROOT"];
const NDK_VARIABLES: [&str; 2] = ["ANDROID_NDK_HOME", "ANDROID_NDK"];

/// Script syntax of an export line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFlavor {
    Posix,
    PowerShell,
}

impl ExportFlavor {
    pub fn file_name(&self) -> &'static str {
        match self {
            ExportFlavor::Posix => POSIX_ENVIRONMENT_FILE,
            ExportFlavor::PowerShell => POWERSHELL_ENVIRONMENT_FILE,
        }
    }
}

/// A single variable assignment rendered in one flavor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportLine {
    flavor: ExportFlavor,
    name: &'static str,
    value: String,
}

impl ExportLine {
    pub fn new(flavor: ExportFlavor, name: &'static str, value: &Path) -> Self {
        Self {
            flavor,
            name,
            value: value.to_string_lossy().into_owned(),
        }
    }

    pub fn name(&self) -> &str {
        self.name
    }
}

impl fmt::Display for ExportLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.flavor {
            ExportFlavor::Posix => {
                write!(f, "export {}={}", self.name, posix_quote(&self.value))
            }
            ExportFlavor::PowerShell => {
                // PowerShell uses backtick for escaping
                let escaped = self
                    .value
                    .replace('`', "``")
                    .replace('"', "`\"")
                    .replace('$', "`$");
                write!(f, "$env:{}=\"{escaped}\"", self.name)
            }
        }
    }
}

/// Quote a value for POSIX shells only when it needs it.
fn posix_quote(value: &str) -> String {
    let needs_quotes = value.is_empty()
        || value.chars().any(|c| {
            c.is_whitespace()
                || matches!(
                    c,
                    '"' | '\'' | '\\' | '$' | '`' | '&' | ';' | '|' | '<' | '>' | '(' | ')' | '*'
                        | '?' | '#' | '~' | '!'
                )
        });
    if !needs_quotes {
        return value.to_string();
    }
    let escaped = value
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('$', "\\$")
        .replace('`', "\\`");
    format!("\"{escaped}\"")
}

/// Lines for one flavor: SDK root exports (unless `ndk_only`) then NDK exports.
pub fn export_lines(paths: &PathSet, ndk_only: bool, flavor: ExportFlavor) -> Vec<ExportLine> {
    let mut lines = Vec::with_capacity(SDK_VARIABLES.len() + NDK_VARIABLES.len());
    if !ndk_only {
        lines.extend(
            SDK_VARIABLES
                .iter()
                .map(|name| ExportLine::new(flavor, name, &paths.sdk_root)),
        );
    }
    lines.extend(
        NDK_VARIABLES
            .iter()
            .map(|name| ExportLine::new(flavor, name, &paths.ndk_root)),
    );
    lines
}

pub struct EnvironmentExporter {
    output_dir: PathBuf,
}

impl EnvironmentExporter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn file_path(&self, flavor: ExportFlavor) -> PathBuf {
        self.output_dir.join(flavor.file_name())
    }

    /// Append the exports for `paths` to both environment files.
    pub fn export_environment(&self, paths: &PathSet, ndk_only: bool) -> Result<()> {
        for flavor in [ExportFlavor::Posix, ExportFlavor::PowerShell] {
            let lines = export_lines(paths, ndk_only, flavor);
            let path = self.file_path(flavor);
            append_lines(&path, &lines)?;
            log::info!("Appended {} exports to {}", lines.len(), path.display());
        }
        Ok(())
    }
}

fn append_lines(path: &Path, lines: &[ExportLine]) -> Result<()> {
    let write_error = |e: std::io::Error| SdkprepError::EnvironmentWrite {
        path: path.display().to_string(),
        message: e.to_string(),
    };

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(write_error)?;

    let mut contents = String::new();
    for line in lines {
        contents.push_str(&line.to_string());
        contents.push('\n');
    }
    file.write_all(contents.as_bytes()).map_err(write_error)?;
    file.flush().map_err(write_error)?;
    Ok(())
}
