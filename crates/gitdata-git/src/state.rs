//! Clone states and the reconciliation decision table
//!
//! A [`CloneState`] is observed fresh on every resolution and never stored.
//! [`CloneState::plan`] maps it to an action without touching git or the
//! filesystem.

use std::path::Path;

use crate::{Error, Result};

/// Observed condition of a local clone relative to its remote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CloneState {
    /// No clone directory exists yet.
    Absent,
    /// The clone is on the requested branch and already contains the remote tip.
    Synced,
    /// The clone is on the requested branch, lacks the remote tip, and has
    /// no commits of its own.
    Behind,
    /// The clone has a different branch checked out.
    BranchMismatch { local: String },
    /// The clone lacks the remote tip and carries commits the remote does not have.
    Unpushed { commits: Vec<String> },
}

/// What to do with the clone directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncAction {
    /// Use the existing clone as-is.
    Reuse,
    /// Clone into a directory that does not exist yet.
    Clone,
    /// Replace the existing clone with a fresh one.
    Reclone,
}

impl CloneState {
    /// Decide how to proceed for the clone at `path` tracking `branch`.
    ///
    /// Conflicting states become errors; the clone is never switched to
    /// another branch and unpushed work is never discarded.
    pub fn plan(self, path: &Path, branch: &str) -> Result<SyncAction> {
        match self {
            Self::Absent => Ok(SyncAction::Clone),
            Self::Synced => Ok(SyncAction::Reuse),
            Self::Behind => Ok(SyncAction::Reclone),
            Self::BranchMismatch { local } => Err(Error::BranchMismatch {
                path: path.to_path_buf(),
                local,
                requested: branch.to_string(),
            }),
            Self::Unpushed { commits } => Err(Error::UnsyncedLocalChanges {
                path: path.to_path_buf(),
                commits,
            }),
        }
    }
}

/// Pick the tip revision of `branch` out of `git ls-remote` output.
///
/// `ls-remote <url> <branch>` matches by ref suffix, so tags and deeper
/// branches like `refs/heads/x/<branch>` may be listed too. Only
/// `refs/heads/<branch>` counts.
pub(crate) fn remote_tip(ls_remote: &str, branch: &str) -> Option<String> {
    let head_ref = format!("refs/heads/{branch}");

    ls_remote.lines().find_map(|line| {
        let mut fields = line.split_whitespace();
        match (fields.next(), fields.next()) {
            (Some(sha), Some(refname)) if refname == head_ref => Some(sha.to_string()),
            _ => None,
        }
    })
}

/// Split `git log --format=%H` output into commit ids.
pub(crate) fn commit_list(log: &str) -> Vec<String> {
    log.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
