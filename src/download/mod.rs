/// Download module for the command-line tools archive
///
/// This module provides functionality for fetching a URL to a file with:
/// - Removal of any stale file at the destination
/// - Atomic writes through a temporary file in the destination directory
/// - Explicit TLS trust configuration
/// - Progress reporting
mod client;
mod http_file_downloader;
mod options;
mod progress;

pub use client::{AttohttpcClient, HttpClient, HttpResponse, TransportConfig};
pub use http_file_downloader::{HttpFileDownloader, ProgressReporter};
pub use options::{DEFAULT_TIMEOUT, DownloadOptions, MAX_DOWNLOAD_SIZE};
pub use progress::IndicatifProgressReporter;
