#[cfg(test)]
mod tests {
    use crate::download::{
        DownloadOptions, HttpClient, HttpFileDownloader, HttpResponse, ProgressReporter,
    };
    use crate::error::{Result, SdkprepError};
    use crate::retry_policy::RetryPolicy;
    use std::io::{Cursor, Read};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;
    use tempfile::tempdir;

    // Mock implementations for testing
    struct MockHttpClient {
        responses: Vec<MockOutcome>,
        request_count: Arc<Mutex<usize>>,
    }

    enum MockOutcome {
        Response(MockResponse),
        Failure(String),
    }

    struct MockResponse {
        status: u16,
        headers: Vec<(String, String)>,
        body: Vec<u8>,
    }

    impl MockHttpClient {
        fn new(responses: Vec<MockOutcome>) -> Self {
            Self {
                responses,
                request_count: Arc::new(Mutex::new(0)),
            }
        }

        fn ok(body: &[u8]) -> MockOutcome {
            MockOutcome::Response(MockResponse {
                status: 200,
                headers: vec![("Content-Length".to_string(), body.len().to_string())],
                body: body.to_vec(),
            })
        }
    }

    impl HttpClient for MockHttpClient {
        fn get(&self, _url: &str) -> Result<Box<dyn HttpResponse>> {
            let mut count = self.request_count.lock().unwrap();
            if *count >= self.responses.len() {
                return Err(SdkprepError::NetworkError(
                    "No more mock responses".to_string(),
                ));
            }

            let outcome = &self.responses[*count];
            *count += 1;

            match outcome {
                MockOutcome::Failure(msg) => Err(SdkprepError::NetworkError(msg.clone())),
                MockOutcome::Response(response) => Ok(Box::new(MockHttpResponse {
                    status: response.status,
                    headers: response.headers.clone(),
                    body: Cursor::new(response.body.clone()),
                })),
            }
        }
    }

    struct MockHttpResponse {
        status: u16,
        headers: Vec<(String, String)>,
        body: Cursor<Vec<u8>>,
    }

    impl Read for MockHttpResponse {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            self.body.read(buf)
        }
    }

    impl HttpResponse for MockHttpResponse {
        fn status(&self) -> u16 {
            self.status
        }

        fn header(&self, name: &str) -> Option<&str> {
            self.headers
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(name))
                .map(|(_, v)| v.as_str())
        }

        fn final_url(&self) -> Option<&str> {
            None
        }
    }

    #[derive(Default)]
    struct RecordingReporter {
        events: Arc<Mutex<Vec<String>>>,
    }

    impl ProgressReporter for RecordingReporter {
        fn on_start(&mut self, total_bytes: u64) {
            self.events.lock().unwrap().push(format!("start {total_bytes}"));
        }

        fn on_progress(&mut self, bytes_downloaded: u64) {
            self.events
                .lock()
                .unwrap()
                .push(format!("progress {bytes_downloaded}"));
        }

        fn on_complete(&mut self) {
            self.events.lock().unwrap().push("complete".to_string());
        }
    }

    #[test]
    fn test_download_with_mock_client() {
        let test_content = b"PK fake archive";
        let mock_client = MockHttpClient::new(vec![MockHttpClient::ok(test_content)]);

        let mut downloader = HttpFileDownloader::with_client(Box::new(mock_client));
        let temp_dir = tempdir().unwrap();
        let dest_path = temp_dir.path().join("tools.zip");

        let result = downloader.download(
            "http://example.com/tools.zip",
            &dest_path,
            &DownloadOptions::default(),
        );

        assert_eq!(result.unwrap(), dest_path);
        assert_eq!(std::fs::read(&dest_path).unwrap(), test_content);
    }

    #[test]
    fn test_download_replaces_stale_file() {
        let mock_client = MockHttpClient::new(vec![MockHttpClient::ok(b"fresh")]);
        let mut downloader = HttpFileDownloader::with_client(Box::new(mock_client));
        let temp_dir = tempdir().unwrap();
        let dest_path = temp_dir.path().join("tools.zip");
        std::fs::write(&dest_path, b"stale content that is longer").unwrap();

        downloader
            .download(
                "http://example.com/tools.zip",
                &dest_path,
                &DownloadOptions::default(),
            )
            .unwrap();

        assert_eq!(std::fs::read(&dest_path).unwrap(), b"fresh");
    }

    #[test]
    fn test_failed_download_leaves_no_stale_file() {
        let mock_client = MockHttpClient::new(vec![MockOutcome::Failure(
            "connection reset".to_string(),
        )]);
        let mut downloader = HttpFileDownloader::with_client(Box::new(mock_client));
        let temp_dir = tempdir().unwrap();
        let dest_path = temp_dir.path().join("tools.zip");
        std::fs::write(&dest_path, b"stale").unwrap();

        let result = downloader.download(
            "http://example.com/tools.zip",
            &dest_path,
            &DownloadOptions::default(),
        );

        assert!(result.is_err());
        assert!(!dest_path.exists());
        assert_eq!(std::fs::read_dir(temp_dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_download_with_http_error() {
        let mock_client = MockHttpClient::new(vec![MockOutcome::Response(MockResponse {
            status: 404,
            headers: vec![],
            body: vec![],
        })]);

        let mut downloader = HttpFileDownloader::with_client(Box::new(mock_client));
        let temp_dir = tempdir().unwrap();
        let dest_path = temp_dir.path().join("tools.zip");

        let result = downloader.download(
            "http://example.com/tools.zip",
            &dest_path,
            &DownloadOptions::default(),
        );

        match result.unwrap_err() {
            SdkprepError::NetworkError(msg) => assert!(msg.contains("404")),
            other => panic!("Expected NetworkError, got {other:?}"),
        }
        assert!(!dest_path.exists());
    }

    #[test]
    fn test_download_exceeding_size_limit() {
        let mock_client = MockHttpClient::new(vec![MockOutcome::Response(MockResponse {
            status: 200,
            headers: vec![
                ("Content-Length".to_string(), "2000000000".to_string()), // 2GB
            ],
            body: vec![],
        })]);

        let mut downloader = HttpFileDownloader::with_client(Box::new(mock_client));
        let temp_dir = tempdir().unwrap();
        let dest_path = temp_dir.path().join("tools.zip");

        let result = downloader.download(
            "http://example.com/tools.zip",
            &dest_path,
            &DownloadOptions::default(),
        );

        match result.unwrap_err() {
            SdkprepError::ValidationError(msg) => assert!(msg.contains("exceeds maximum")),
            other => panic!("Expected ValidationError, got {other:?}"),
        }
    }

    #[test]
    fn test_progress_reporter_events() {
        let reporter = RecordingReporter::default();
        let events = Arc::clone(&reporter.events);
        let mock_client = MockHttpClient::new(vec![MockHttpClient::ok(b"0123456789")]);

        let mut downloader = HttpFileDownloader::with_client(Box::new(mock_client))
            .with_progress_reporter(Box::new(reporter));
        let temp_dir = tempdir().unwrap();
        let dest_path = temp_dir.path().join("tools.zip");

        downloader
            .download(
                "http://example.com/tools.zip",
                &dest_path,
                &DownloadOptions::default(),
            )
            .unwrap();

        let events = events.lock().unwrap();
        assert_eq!(events.first().unwrap(), "start 10");
        assert!(events.contains(&"progress 10".to_string()));
        assert_eq!(events.last().unwrap(), "complete");
    }

    #[test]
    fn test_retry_then_succeed_writes_once() {
        let mut outcomes: Vec<MockOutcome> = (1..=4)
            .map(|i| MockOutcome::Failure(format!("transient {i}")))
            .collect();
        outcomes.push(MockHttpClient::ok(b"archive bytes"));
        let mock_client = MockHttpClient::new(outcomes);
        let request_count = Arc::clone(&mock_client.request_count);

        let mut downloader = HttpFileDownloader::with_client(Box::new(mock_client));
        let temp_dir = tempdir().unwrap();
        let dest_path = temp_dir.path().join("tools.zip");
        let policy = RetryPolicy::new(5, Duration::ZERO);

        policy
            .run("download", || {
                downloader.download(
                    "http://example.com/tools.zip",
                    &dest_path,
                    &DownloadOptions::default(),
                )
            })
            .unwrap();

        assert_eq!(*request_count.lock().unwrap(), 5);
        assert_eq!(std::fs::read(&dest_path).unwrap(), b"archive bytes");
        assert_eq!(std::fs::read_dir(temp_dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_retry_gives_up_after_five_attempts() {
        let outcomes: Vec<MockOutcome> = (1..=6)
            .map(|i| MockOutcome::Failure(format!("down {i}")))
            .collect();
        let mock_client = MockHttpClient::new(outcomes);
        let request_count = Arc::clone(&mock_client.request_count);

        let mut downloader = HttpFileDownloader::with_client(Box::new(mock_client));
        let temp_dir = tempdir().unwrap();
        let dest_path = temp_dir.path().join("tools.zip");
        let policy = RetryPolicy::new(5, Duration::from_millis(25));

        let started = std::time::Instant::now();
        let err = policy
            .run("download", || {
                downloader.download(
                    "http://example.com/tools.zip",
                    &dest_path,
                    &DownloadOptions::default(),
                )
            })
            .unwrap_err();

        assert_eq!(*request_count.lock().unwrap(), 5);
        assert!(started.elapsed() >= Duration::from_millis(100));
        match err {
            SdkprepError::NetworkError(msg) => assert_eq!(msg, "down 5"),
            other => panic!("Expected NetworkError, got {other:?}"),
        }
    }
}
