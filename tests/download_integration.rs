use mockito::Server;
use sdkprep::download::{DownloadOptions, HttpFileDownloader, TransportConfig};
use sdkprep::error::SdkprepError;
use sdkprep::retry_policy::RetryPolicy;
use std::fs;
use std::time::Duration;
use tempfile::tempdir;

const ARCHIVE: &str = "/commandlinetools-linux-8092744_latest.zip";

#[test]
fn test_download_archive_from_server() {
    let mut server = Server::new();
    let body = b"PK\x03\x04 command-line tools";

    let mock = server
        .mock("GET", ARCHIVE)
        .with_status(200)
        .with_header("content-type", "application/zip")
        .with_header("content-length", &body.len().to_string())
        .with_body(body)
        .create();

    let temp_dir = tempdir().unwrap();
    let dest_file = temp_dir.path().join("commandlinetools-linux-8092744_latest.zip");

    let mut downloader = HttpFileDownloader::new(TransportConfig::default());
    let result = downloader.download(
        &format!("{}{ARCHIVE}", server.url()),
        &dest_file,
        &DownloadOptions::default(),
    );

    assert_eq!(result.unwrap(), dest_file);
    assert_eq!(fs::read(&dest_file).unwrap(), body);
    mock.assert();
}

#[test]
fn test_download_replaces_stale_archive() {
    let mut server = Server::new();
    let _m = server
        .mock("GET", ARCHIVE)
        .with_status(200)
        .with_body("fresh")
        .create();

    let temp_dir = tempdir().unwrap();
    let dest_file = temp_dir.path().join("archive.zip");
    fs::write(&dest_file, "stale content from an earlier attempt").unwrap();

    let mut downloader = HttpFileDownloader::new(TransportConfig::default());
    downloader
        .download(
            &format!("{}{ARCHIVE}", server.url()),
            &dest_file,
            &DownloadOptions::default(),
        )
        .unwrap();

    assert_eq!(fs::read_to_string(&dest_file).unwrap(), "fresh");
}

#[test]
fn test_server_error_is_network_error() {
    let mut server = Server::new();
    let _m = server
        .mock("GET", ARCHIVE)
        .with_status(500)
        .with_body("Internal Server Error")
        .create();

    let temp_dir = tempdir().unwrap();
    let dest_file = temp_dir.path().join("archive.zip");

    let mut downloader = HttpFileDownloader::new(TransportConfig::default());
    let err = downloader
        .download(
            &format!("{}{ARCHIVE}", server.url()),
            &dest_file,
            &DownloadOptions::default(),
        )
        .unwrap_err();

    assert!(matches!(err, SdkprepError::NetworkError(_)));
    assert!(!dest_file.exists());
}

#[test]
fn test_retry_policy_retries_server_errors() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", ARCHIVE)
        .with_status(503)
        .expect(5)
        .create();

    let temp_dir = tempdir().unwrap();
    let dest_file = temp_dir.path().join("archive.zip");
    let url = format!("{}{ARCHIVE}", server.url());

    let mut downloader = HttpFileDownloader::new(TransportConfig::default());
    let policy = RetryPolicy::new(5, Duration::ZERO);
    let result = policy.run("Downloading", || {
        downloader.download(&url, &dest_file, &DownloadOptions::default())
    });

    assert!(result.is_err());
    mock.assert();
}
