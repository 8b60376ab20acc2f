//! Settings for opening a [`GitData`](crate::GitData) session

use std::path::{Path, PathBuf};

use gitdata_fs::{ConfigStore, NormalizedPath};
use serde::{Deserialize, Serialize};

use crate::Result;
use crate::store::DEFAULT_EXTENSIONS;

/// Everything needed to resolve a data source and open its records.
///
/// Loadable from a TOML, YAML or JSON file; missing fields take their
/// defaults.
///
/// ```toml
/// source = "git@github.com:org/ocp-build-data.git"
/// clone_dir = "/tmp"
/// branch = "openshift-4.1"
/// sub_dir = "images"
/// extensions = ["yaml", "yml"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Remote URL or local path of the data
    pub source: Option<String>,

    /// Directory remote sources are cloned into
    pub clone_dir: PathBuf,

    /// Branch the clone must track
    pub branch: String,

    /// Subdirectory of the data holding the records
    pub sub_dir: Option<String>,

    /// Recognized record extensions, in lookup order
    pub extensions: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            source: None,
            clone_dir: PathBuf::from("."),
            branch: "master".to_string(),
            sub_dir: None,
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
        }
    }
}

impl Settings {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: Some(source.into()),
            ..Self::default()
        }
    }

    /// Read settings from a file; the format follows its extension.
    pub fn load(path: &Path) -> Result<Self> {
        Ok(ConfigStore::new().load(&NormalizedPath::new(path))?)
    }

    pub fn with_clone_dir(mut self, clone_dir: impl Into<PathBuf>) -> Self {
        self.clone_dir = clone_dir.into();
        self
    }

    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = branch.into();
        self
    }

    pub fn with_sub_dir(mut self, sub_dir: impl Into<String>) -> Self {
        self.sub_dir = Some(sub_dir.into());
        self
    }

    pub fn with_extensions<S: Into<String>>(mut self, extensions: impl IntoIterator<Item = S>) -> Self {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let settings = Settings::default();
        assert_eq!(settings.branch, "master");
        assert_eq!(settings.clone_dir, PathBuf::from("."));
        assert_eq!(settings.extensions, vec!["yaml", "yml", "json"]);
        assert!(settings.source.is_none());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let settings: Settings = toml_like("branch = \"openshift-4.1\"");
        assert_eq!(settings.branch, "openshift-4.1");
        assert_eq!(settings.extensions.len(), 3);
    }

    fn toml_like(content: &str) -> Settings {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gitdata.toml");
        std::fs::write(&path, content).unwrap();
        Settings::load(&path).unwrap()
    }
}
