//! Error types for gitdata-store

use std::path::PathBuf;

/// Result type for gitdata-store operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading, filtering or persisting records
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid data path {path}: {message}")]
    InvalidDataPath { path: PathBuf, message: String },

    #[error("Failed to load data from {path}: {message}")]
    DataLoad { path: PathBuf, message: String },

    #[error("Unsupported record extension: {extension}")]
    UnsupportedExtension { extension: String },

    #[error("No data source configured")]
    MissingSource,

    #[error("Invalid filter '{expression}': {message}")]
    InvalidFilter { expression: String, message: String },

    #[error(transparent)]
    Git(#[from] gitdata_git::Error),

    #[error(transparent)]
    Fs(#[from] gitdata_fs::Error),
}

impl Error {
    pub fn data_load(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::DataLoad {
            path: path.into(),
            message: message.into(),
        }
    }
}
