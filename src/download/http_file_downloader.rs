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

use crate::download::client::{AttohttpcClient, HttpClient, HttpResponse, TransportConfig};
use crate::download::options::DownloadOptions;
use crate::error::{Result, SdkprepError};
use crate::platform::file_ops::remove_file_if_exists;
use std::fs;
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

const DOWNLOAD_CHUNK_SIZE: usize = 8192;

pub trait ProgressReporter: Send + Sync {
    fn on_start(&mut self, total_bytes: u64);

    fn on_progress(&mut self, bytes_downloaded: u64);

    fn on_complete(&mut self);
}

pub struct HttpFileDownloader {
    pub(crate) http_client: Box<dyn HttpClient>,
    progress_reporter: Option<Box<dyn ProgressReporter>>,
}

impl Default for HttpFileDownloader {
    fn default() -> Self {
        Self::new(TransportConfig::default())
    }
}

impl HttpFileDownloader {
    pub fn new(transport: TransportConfig) -> Self {
        Self::with_client(Box::new(AttohttpcClient::new(transport)))
    }

    pub fn with_client(http_client: Box<dyn HttpClient>) -> Self {
        Self {
            http_client,
            progress_reporter: None,
        }
    }

    pub fn with_progress_reporter(mut self, reporter: Box<dyn ProgressReporter>) -> Self {
        self.progress_reporter = Some(reporter);
        self
    }

    /// Fetch `url` into `destination`.
    ///
    /// Any file already at `destination` is removed first, so calling this
    /// again after a failure starts from scratch. The body is written to a
    /// temporary file beside the destination and renamed into place once
    /// complete.
    pub fn download(
        &mut self,
        url: &str,
        destination: &Path,
        options: &DownloadOptions,
    ) -> Result<PathBuf> {
        log::info!("Downloading {url} to {}", destination.display());

        if remove_file_if_exists(destination).map_err(|e| removal_error(destination, e))? {
            log::debug!("Removed stale file {}", destination.display());
        }

        let parent = match destination.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&parent)?;

        let response = self.http_client.get(url)?;

        self.validate_response(response.as_ref(), url, options.max_size)?;

        if let Some(final_url) = response.final_url() {
            if final_url != url {
                log::debug!("Redirected to {final_url}");
            }
        }

        let total_size = content_length(response.as_ref()).unwrap_or(0);

        if let Some(reporter) = &mut self.progress_reporter {
            reporter.on_start(total_size);
        }

        let temp_file = NamedTempFile::new_in(&parent)?;
        let temp_file = self.download_to_file(response, temp_file)?;

        temp_file
            .persist(destination)
            .map_err(|e| SdkprepError::Io(e.error))?;

        if let Some(reporter) = &mut self.progress_reporter {
            reporter.on_complete();
        }

        Ok(destination.to_path_buf())
    }

    fn validate_response(
        &self,
        response: &dyn HttpResponse,
        url: &str,
        max_size: u64,
    ) -> Result<()> {
        let status = response.status();

        if !(200..300).contains(&status) {
            return Err(SdkprepError::NetworkError(format!(
                "Download of {url} failed with status: {status}"
            )));
        }

        if let Some(length) = content_length(response) {
            if length > max_size {
                return Err(SdkprepError::ValidationError(format!(
                    "Download size {length} exceeds maximum allowed size {max_size}"
                )));
            }
        }

        Ok(())
    }

    fn download_to_file(
        &mut self,
        mut response: Box<dyn HttpResponse>,
        mut temp_file: NamedTempFile,
    ) -> Result<NamedTempFile> {
        let mut downloaded = 0u64;
        let mut buffer = vec![0; DOWNLOAD_CHUNK_SIZE];

        {
            let mut writer = BufWriter::new(temp_file.as_file_mut());
            loop {
                match response.read(&mut buffer) {
                    Ok(0) => break, // EOF
                    Ok(n) => {
                        writer.write_all(&buffer[..n])?;
                        downloaded += n as u64;

                        if let Some(reporter) = &mut self.progress_reporter {
                            reporter.on_progress(downloaded);
                        }
                    }
                    Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                    Err(e) => return Err(e.into()),
                }
            }
            writer.flush()?;
        }

        log::debug!("Received {downloaded} bytes");
        Ok(temp_file)
    }
}

fn content_length(response: &dyn HttpResponse) -> Option<u64> {
    response
        .header("Content-Length")
        .and_then(|value| value.trim().parse::<u64>().ok())
}

fn removal_error(path: &Path, error: std::io::Error) -> SdkprepError {
    match error.kind() {
        std::io::ErrorKind::PermissionDenied => {
            SdkprepError::PermissionDenied(path.display().to_string())
        }
        _ => SdkprepError::Download(format!(
            "Failed to remove stale file {}: {error}",
            path.display()
        )),
    }
}

#[cfg(test)]
#[path = "http_file_downloader_tests.rs"]
mod http_file_downloader_tests;
