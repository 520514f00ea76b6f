use std::time::Duration;

/// Default timeout for download operations
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

/// Maximum allowed download size (1GB)
pub const MAX_DOWNLOAD_SIZE: u64 = 1_073_741_824;

/// Options for configuring download behavior
#[derive(Debug, Clone)]
pub struct DownloadOptions {
    /// Maximum allowed file size
    pub max_size: u64,
}

impl Default for DownloadOptions {
    fn default() -> Self {
        Self {
            max_size: MAX_DOWNLOAD_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_download_options_default() {
        let options = DownloadOptions::default();
        assert_eq!(options.max_size, MAX_DOWNLOAD_SIZE);
    }
}
