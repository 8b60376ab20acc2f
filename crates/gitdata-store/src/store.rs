//! Record store over a data directory

use std::fs;
use std::path::Path;

use gitdata_fs::NormalizedPath;
use gitdata_git::{GitCli, GitExecutor};

use crate::filter::{self, RecordFilter};
use crate::format::Format;
use crate::record::{Record, RecordCollection};
use crate::{Error, Result};

/// Extensions recognized when none are configured, in lookup order.
pub const DEFAULT_EXTENSIONS: &[&str] = &["yaml", "yml", "json"];

/// Outcome of [`RecordStore::load`].
#[derive(Debug, Clone, PartialEq)]
pub enum Loaded {
    /// Lookup by key; `None` when no file exists for the key.
    Record(Option<Record>),
    /// Directory scan.
    Collection(RecordCollection),
}

impl Loaded {
    pub fn into_record(self) -> Option<Record> {
        match self {
            Self::Record(record) => record,
            Self::Collection(_) => None,
        }
    }

    pub fn into_collection(self) -> Option<RecordCollection> {
        match self {
            Self::Collection(collection) => Some(collection),
            Self::Record(_) => None,
        }
    }
}

/// Loads, filters and persists records below a data directory.
///
/// The data directory must exist when the store is created. Commit and push
/// run git with the data directory as working directory.
#[derive(Debug, Clone)]
pub struct RecordStore<G = GitCli> {
    data_dir: NormalizedPath,
    extensions: Vec<(String, Format)>,
    git: G,
}

impl<G: GitExecutor> RecordStore<G> {
    /// Create a store over `root`, or `root/sub_dir` when given.
    pub fn new(root: impl AsRef<Path>, sub_dir: Option<&str>, git: G) -> Result<Self> {
        let root = NormalizedPath::new(root);
        let data_dir = match sub_dir {
            Some(sub) if !sub.is_empty() => root.join(sub),
            _ => root,
        };

        if !data_dir.is_dir() {
            let message = match sub_dir {
                Some(sub) if !sub.is_empty() => {
                    format!("'{sub}' is not a valid sub-directory in the data")
                }
                _ => "data directory does not exist".to_string(),
            };
            return Err(Error::InvalidDataPath {
                path: data_dir.to_native(),
                message,
            });
        }

        let extensions = DEFAULT_EXTENSIONS
            .iter()
            .filter_map(|ext| Format::from_extension(ext).map(|f| (ext.to_string(), f)))
            .collect();

        Ok(Self {
            data_dir,
            extensions,
            git,
        })
    }

    /// Replace the recognized extensions. Order decides which file wins a
    /// key lookup; a leading dot is accepted.
    pub fn with_extensions<S: AsRef<str>>(mut self, extensions: &[S]) -> Result<Self> {
        self.extensions = extensions
            .iter()
            .map(|ext| {
                let ext = ext.as_ref().trim_start_matches('.').to_lowercase();
                match Format::from_extension(&ext) {
                    Some(format) => Ok((ext, format)),
                    None => Err(Error::UnsupportedExtension { extension: ext }),
                }
            })
            .collect::<Result<_>>()?;
        Ok(self)
    }

    pub fn data_dir(&self) -> &NormalizedPath {
        &self.data_dir
    }

    pub fn extensions(&self) -> impl Iterator<Item = &str> {
        self.extensions.iter().map(|(ext, _)| ext.as_str())
    }

    pub fn git(&self) -> &G {
        &self.git
    }

    /// Load one record by `key`, or every record in `path`.
    ///
    /// With a key, `filters` are not consulted and a missing record is
    /// `Loaded::Record(None)`. Without one, only records accepted by all
    /// filters are returned.
    pub fn load(&self, path: &str, key: Option<&str>, filters: &[&dyn RecordFilter]) -> Result<Loaded> {
        match key {
            Some(key) => self.load_key(path, key).map(Loaded::Record),
            None => self.load_all(path, filters).map(Loaded::Collection),
        }
    }

    /// Load the first `key.<ext>` that exists in `path`, in extension order.
    pub fn load_key(&self, path: &str, key: &str) -> Result<Option<Record>> {
        let dir = self.target_dir(path)?;

        for (ext, format) in &self.extensions {
            let candidate = dir.join(&format!("{key}.{ext}"));
            if candidate.is_file() {
                tracing::debug!(path = %candidate, "Loading record");
                return Record::load(candidate, *format).map(Some);
            }
        }

        tracing::debug!(key, dir = %dir, "No record found");
        Ok(None)
    }

    /// Load every recognized record in `path` accepted by all `filters`.
    pub fn load_all(&self, path: &str, filters: &[&dyn RecordFilter]) -> Result<RecordCollection> {
        let dir = self.target_dir(path)?;
        let entries = fs::read_dir(dir.to_native()).map_err(|e| Error::InvalidDataPath {
            path: dir.to_native(),
            message: e.to_string(),
        })?;

        let mut records = RecordCollection::new();
        for entry in entries {
            let entry = entry.map_err(|e| Error::data_load(dir.to_native(), e.to_string()))?;
            let file = NormalizedPath::new(entry.path());

            let Some(format) = file.extension().and_then(|ext| self.format_of(ext)) else {
                continue;
            };
            if !file.is_file() {
                continue;
            }

            let record = Record::load(file, format)?;
            if filter::all_match(filters, record.key(), &record.data) {
                records.insert(record);
            }
        }

        tracing::debug!(dir = %dir, count = records.len(), "Loaded records");
        Ok(records)
    }

    /// Stage every change in the clone and commit it.
    pub fn commit(&self, message: &str) -> Result<()> {
        let dir = self.data_dir.to_native();
        self.git.run_checked(&dir, &["add", "-A"])?;
        self.git.run_checked(&dir, &["commit", "-m", message])?;
        tracing::info!(dir = %self.data_dir, "Committed data changes");
        Ok(())
    }

    /// Push the checked-out branch to `origin`.
    pub fn push(&self) -> Result<()> {
        let dir = self.data_dir.to_native();
        self.git.run_checked(&dir, &["push", "origin", "HEAD"])?;
        tracing::info!(dir = %self.data_dir, "Pushed data changes");
        Ok(())
    }

    fn target_dir(&self, path: &str) -> Result<NormalizedPath> {
        let dir = self.data_dir.join(path);
        if !path.is_empty() && !dir.is_dir() {
            return Err(Error::InvalidDataPath {
                path: dir.to_native(),
                message: format!("cannot find '{}' under '{}'", path, self.data_dir),
            });
        }
        Ok(dir)
    }

    fn format_of(&self, ext: &str) -> Option<Format> {
        self.extensions
            .iter()
            .find(|(known, _)| known.eq_ignore_ascii_case(ext))
            .map(|(_, format)| *format)
    }
}
