//! [`DataDir`] builder for record directory scenarios.

use std::fs;
use std::path::Path;

use tempfile::TempDir;

/// A temporary directory of record files.
///
/// # Example
///
/// ```rust,no_run
/// use gitdata_test_utils::DataDir;
///
/// let data = DataDir::new()
///     .with_file("images/a.yaml", "owners: [x]\n")
///     .with_file("images/b.json", r#"{"owners": ["y"]}"#);
/// data.assert_file_contains("images/a.yaml", "owners");
/// ```
pub struct DataDir {
    temp_dir: TempDir,
}

impl Default for DataDir {
    fn default() -> Self {
        Self::new()
    }
}

impl DataDir {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// Return the root path of the temporary directory.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write `content` to `rel`, creating parent directories.
    pub fn write(&self, rel: &str, content: &str) {
        let path = self.root().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content)
            .unwrap_or_else(|e| panic!("DataDir::write: {}: {e}", path.display()));
    }

    /// Builder form of [`write`](Self::write).
    pub fn with_file(self, rel: &str, content: &str) -> Self {
        self.write(rel, content);
        self
    }

    /// Create an empty directory at `rel`.
    pub fn with_dir(self, rel: &str) -> Self {
        fs::create_dir_all(self.root().join(rel)).unwrap();
        self
    }

    /// Read the file at `rel`.
    pub fn read(&self, rel: &str) -> String {
        let path = self.root().join(rel);
        fs::read_to_string(&path)
            .unwrap_or_else(|_| panic!("Could not read file: {}", path.display()))
    }

    /// Assert that the file at `rel` contains `content`.
    ///
    /// # Panics
    /// Panics if the file cannot be read or does not contain `content`.
    pub fn assert_file_contains(&self, rel: &str, content: &str) {
        let file_content = self.read(rel);
        assert!(
            file_content.contains(content),
            "File {} does not contain expected content.\nExpected: {}\nActual: {}",
            rel,
            content,
            file_content
        );
    }
}
