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

//! Extraction of the command-line tools archive.
//!
//! The archive ships launcher scripts that must stay executable. On Windows
//! the zip crate decodes it in-process; everywhere else the system `unzip`
//! utility is used so the stored permission bits survive extraction.

use crate::error::{Result, SdkprepError};
use crate::platform::HostFamily;
use crate::platform::file_ops;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use zip::ZipArchive;

const UNZIP: &str = "unzip";

/// Extracts a zip archive into a directory.
pub trait ArchiveExtractor {
    fn extract(&self, archive_path: &Path, destination: &Path) -> Result<()>;
}

/// Extractor that picks the strategy for the host platform family.
pub struct SystemArchiveExtractor {
    host: HostFamily,
}

impl SystemArchiveExtractor {
    pub fn new(host: HostFamily) -> Self {
        Self { host }
    }
}

impl Default for SystemArchiveExtractor {
    fn default() -> Self {
        Self::new(HostFamily::current())
    }
}

impl ArchiveExtractor for SystemArchiveExtractor {
    fn extract(&self, archive_path: &Path, destination: &Path) -> Result<()> {
        println!("{}", "=".repeat(80));
        println!(
            "Unzip: {} to {}",
            archive_path.display(),
            destination.display()
        );
        extract_archive(archive_path, destination, &self.host)
    }
}

/// Extract `archive_path` into `destination`, creating it if needed.
///
/// Existing files are overwritten so a repeated extraction into the same
/// directory never stops to ask.
pub fn extract_archive(archive_path: &Path, destination: &Path, host: &HostFamily) -> Result<()> {
    if !archive_path.is_file() {
        return Err(SdkprepError::Extract(format!(
            "Archive not found: {}",
            archive_path.display()
        )));
    }

    fs::create_dir_all(destination)?;

    if host.is_windows() {
        extract_zip(archive_path, destination)
    } else {
        extract_with_unzip(archive_path, destination)
    }
}

fn extract_with_unzip(archive_path: &Path, destination: &Path) -> Result<()> {
    let unzip =
        which::which(UNZIP).map_err(|_| SdkprepError::CommandNotFound(UNZIP.to_string()))?;
    log::debug!(
        "Using {} to extract {}",
        unzip.display(),
        archive_path.display()
    );

    let output = Command::new(&unzip)
        .arg("-o")
        .arg("-d")
        .arg(destination)
        .arg(archive_path)
        .stdin(Stdio::null())
        .output()
        .map_err(|e| SdkprepError::Extract(format!("Failed to run {UNZIP}: {e}")))?;

    log::trace!("{}", String::from_utf8_lossy(&output.stdout));

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(SdkprepError::Extract(format!(
            "{UNZIP} exited with {}: {}",
            output
                .status
                .code()
                .map(|c| c.to_string())
                .unwrap_or_else(|| "signal".to_string()),
            stderr.trim()
        )));
    }

    log::info!(
        "Extracted {} into {}",
        archive_path.display(),
        destination.display()
    );
    Ok(())
}

pub(crate) fn extract_zip(archive_path: &Path, destination: &Path) -> Result<()> {
    let file = File::open(archive_path)?;
    let mut archive = ZipArchive::new(file)?;

    if archive.is_empty() {
        return Err(SdkprepError::Extract("Zip archive is empty".to_string()));
    }

    let total_files = archive.len();

    for i in 0..total_files {
        let mut file = archive.by_index(i)?;
        let outpath: PathBuf = match file.enclosed_name() {
            Some(path) => destination.join(path),
            None => {
                return Err(SdkprepError::SecurityError(format!(
                    "Archive entry would extract outside destination: {:?}",
                    file.name()
                )));
            }
        };

        if let Some(parent) = outpath.parent() {
            fs::create_dir_all(parent)?;
        }

        if file.is_dir() {
            fs::create_dir_all(&outpath)?;
        } else {
            let mut outfile = File::create(&outpath)?;
            std::io::copy(&mut file, &mut outfile)?;
        }

        if let Some(mode) = file.unix_mode() {
            file_ops::set_permissions_from_mode(&outpath, mode)?;
        }

        if (i + 1) % 100 == 0 {
            log::debug!("Extracted {}/{} files...", i + 1, total_files);
        }
    }

    log::info!("Extracted {total_files} files from zip archive");
    Ok(())
}
