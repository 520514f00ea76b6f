use rand::Rng;
use std::fs;
use std::path::{Path, PathBuf};

/// Installation root under target/home with a random 8-character name.
/// Removed when the guard is dropped.
pub struct TestRootGuard {
    path: PathBuf,
}

impl TestRootGuard {
    pub fn new() -> Self {
        let random_name: String = rand::thread_rng()
            .sample_iter(&rand::distributions::Alphanumeric)
            .take(8)
            .map(char::from)
            .collect();

        let path = PathBuf::from("target/home").join(random_name);
        fs::create_dir_all(&path).expect("Failed to create test root directory");

        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Absolute form of the root, as written into the environment files.
    #[allow(dead_code)]
    pub fn absolute(&self) -> PathBuf {
        fs::canonicalize(&self.path).expect("Failed to canonicalize test root")
    }

    #[allow(dead_code)]
    pub fn read(&self, file_name: &str) -> String {
        fs::read_to_string(self.path.join(file_name))
            .unwrap_or_else(|e| panic!("Failed to read {file_name}: {e}"))
    }

    #[allow(dead_code)]
    pub fn write_config(&self, contents: &str) -> &Self {
        fs::write(self.path.join("sdkprep.toml"), contents).expect("Failed to write sdkprep.toml");
        self
    }
}

impl Drop for TestRootGuard {
    fn drop(&mut self) {
        if self.path.exists() {
            fs::remove_dir_all(&self.path).unwrap_or_else(|e| {
                eprintln!(
                    "Failed to cleanup test directory {}: {}",
                    self.path.display(),
                    e
                );
            });
        }
    }
}
