//! Error types for gitdata-git

use std::path::PathBuf;

/// Result type for gitdata-git operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving or operating on a data clone
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid data source '{location}': unsupported scheme '{scheme}'")]
    InvalidSource { location: String, scheme: String },

    #[error("Cannot derive a clone directory name from '{location}'")]
    UnnamedSource { location: String },

    #[error(
        "Local branch at {path} is '{local}', but '{requested}' was requested. \
         Clear the local data or check out the correct branch manually."
    )]
    BranchMismatch {
        path: PathBuf,
        local: String,
        requested: String,
    },

    #[error(
        "Local data at {path} is out of sync with the remote and has {} unpushed commit(s). \
         Clear the local data or rebase onto the latest remote to continue.",
        commits.len()
    )]
    UnsyncedLocalChanges { path: PathBuf, commits: Vec<String> },

    #[error("Failed to clone branch '{branch}' of {url}: {stderr}")]
    CloneFailed {
        url: String,
        branch: String,
        stderr: String,
    },

    #[error("Branch '{branch}' not found on remote {url}")]
    RemoteBranchNotFound { url: String, branch: String },

    #[error("Git command `{command}` failed with exit code {status}: {stderr}")]
    Command {
        command: String,
        status: i32,
        stderr: String,
    },

    #[error("Failed to run {}: {source}", program.display())]
    Spawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Filesystem error: {0}")]
    Fs(#[from] gitdata_fs::Error),
}
