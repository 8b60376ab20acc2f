//! Resolution of a data source to a usable local directory

use std::fs;
use std::path::{Path, PathBuf};

use gitdata_fs::io;

use crate::exec::GitExecutor;
use crate::source::SourceLocation;
use crate::state::{CloneState, SyncAction, commit_list, remote_tip};
use crate::{Error, Result};

/// Owns the lifecycle of local clones below a clone root.
///
/// After [`resolve`](Self::resolve) returns, the directory it names holds
/// the requested branch; the engine keeps no further state about it.
#[derive(Debug, Clone)]
pub struct SyncEngine<G> {
    git: G,
    clone_root: PathBuf,
    branch: String,
}

impl<G: GitExecutor> SyncEngine<G> {
    pub fn new(git: G, clone_root: impl Into<PathBuf>, branch: impl Into<String>) -> Self {
        Self {
            git,
            clone_root: clone_root.into(),
            branch: branch.into(),
        }
    }

    pub fn branch(&self) -> &str {
        &self.branch
    }

    pub fn clone_root(&self) -> &Path {
        &self.clone_root
    }

    pub fn git(&self) -> &G {
        &self.git
    }

    /// Absolute directory a remote named `name` is cloned into.
    pub fn clone_dir(&self, name: &str) -> Result<PathBuf> {
        let root = std::path::absolute(&self.clone_root)
            .map_err(|e| Error::Fs(gitdata_fs::Error::io(&self.clone_root, e)))?;
        Ok(root.join(name))
    }

    /// Resolve `source` to a local directory holding the requested branch.
    ///
    /// Local sources are returned unchanged. Remote sources are cloned when
    /// absent, reused when they already contain the remote tip, and
    /// re-cloned when they are merely behind. A clone on another branch or
    /// with unpushed commits is an error and is left untouched.
    pub fn resolve(&self, source: &SourceLocation) -> Result<PathBuf> {
        match source {
            SourceLocation::Local { path } => {
                tracing::debug!(path = %path.display(), "Using local data directory");
                Ok(path.clone())
            }
            SourceLocation::Remote { url, name } => {
                let dest = self.clone_dir(name)?;
                let state = self.probe(url, &dest)?;
                tracing::debug!(?state, path = %dest.display(), "Observed clone state");

                match state.plan(&dest, &self.branch)? {
                    SyncAction::Reuse => {
                        tracing::info!(url = %url, "Data is already cloned and up to date");
                    }
                    SyncAction::Clone | SyncAction::Reclone => self.clone_into(url, name, &dest)?,
                }
                Ok(dest)
            }
        }
    }

    /// Observe the state of the clone at `dest` relative to `url`.
    ///
    /// Checks run in order and stop at the first conclusive answer: branch,
    /// remote tip ancestry, then outgoing commits.
    pub fn probe(&self, url: &str, dest: &Path) -> Result<CloneState> {
        if !dest.is_dir() {
            return Ok(CloneState::Absent);
        }
        tracing::info!(path = %dest.display(), "Clone directory already exists, checking commit sha");

        let local = self
            .git
            .run_checked(dest, &["rev-parse", "--abbrev-ref", "HEAD"])?;
        if local != self.branch {
            return Ok(CloneState::BranchMismatch { local });
        }

        let listing = self.git.run_checked(dest, &["ls-remote", url, &self.branch])?;
        let tip = remote_tip(&listing, &self.branch).ok_or_else(|| Error::RemoteBranchNotFound {
            url: url.to_string(),
            branch: self.branch.clone(),
        })?;

        // non-zero covers both "not an ancestor" and "object unknown to a shallow clone"
        let contained = self
            .git
            .run(dest, &["merge-base", "--is-ancestor", &tip, "HEAD"])?
            .success();
        if contained {
            return Ok(CloneState::Synced);
        }

        let outgoing = format!("origin/{}..HEAD", self.branch);
        let log = self
            .git
            .run_checked(dest, &["log", "--format=%H", &outgoing])?;
        let commits = commit_list(&log);

        if commits.is_empty() {
            Ok(CloneState::Behind)
        } else {
            Ok(CloneState::Unpushed { commits })
        }
    }

    /// Shallow-clone the branch next to `dest`, then swap it into place.
    ///
    /// The previous clone is only removed once the new one is complete.
    fn clone_into(&self, url: &str, name: &str, dest: &Path) -> Result<()> {
        let root = dest.parent().unwrap_or(dest);
        fs::create_dir_all(root).map_err(|e| gitdata_fs::Error::io(root, e))?;

        let staging = root.join(format!(".{name}.partial"));
        io::remove_tree(&staging)?;

        tracing::info!(url = %url, branch = %self.branch, "Cloning data");
        let staging_arg = staging.to_string_lossy();
        let output = self.git.run(
            root,
            &[
                "clone",
                "--branch",
                &self.branch,
                "--depth",
                "1",
                "--single-branch",
                url,
                &staging_arg,
            ],
        )?;

        if !output.success() {
            let _ = io::remove_tree(&staging);
            return Err(Error::CloneFailed {
                url: url.to_string(),
                branch: self.branch.clone(),
                stderr: output.stderr.trim().to_string(),
            });
        }

        io::remove_tree(dest)?;
        fs::rename(&staging, dest).map_err(|e| gitdata_fs::Error::io(dest, e))?;
        tracing::info!(path = %dest.display(), "Clone ready");
        Ok(())
    }
}
