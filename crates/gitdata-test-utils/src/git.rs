//! Git fixtures: a bare repository standing in for the remote, plus a
//! seed working copy used to publish new remote commits.
//!
//! Everything runs through the real `git` CLI; inspection goes through
//! `git2` so assertions do not depend on CLI output formats.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Run `git <args>` in `dir` and return trimmed stdout.
///
/// # Panics
/// Panics if git cannot be started or exits non-zero.
pub fn git(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .unwrap_or_else(|e| panic!("failed to run `git {args:?}` (is git installed?): {e}"));
    if !output.status.success() {
        panic!(
            "`git {args:?}` failed in {}:\n{}",
            dir.display(),
            String::from_utf8_lossy(&output.stderr)
        );
    }
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

/// Configure a commit identity local to the repository at `dir`.
pub fn configure_identity(dir: &Path) {
    git(dir, &["config", "user.email", "test@test.com"]);
    git(dir, &["config", "user.name", "Test User"]);
    git(dir, &["config", "commit.gpgsign", "false"]);
}

/// Write `files` below `dir` (creating parents) and commit them.
pub fn commit_files(dir: &Path, files: &[(&str, &str)], message: &str) {
    for (rel, content) in files {
        let path = dir.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .unwrap_or_else(|e| panic!("commit_files: failed to create {}: {e}", parent.display()));
        }
        fs::write(&path, content)
            .unwrap_or_else(|e| panic!("commit_files: failed to write {}: {e}", path.display()));
    }
    git(dir, &["add", "-A"]);
    git(dir, &["commit", "-m", message]);
}

/// Name of the branch checked out at `dir`, read through `git2`.
pub fn current_branch(dir: &Path) -> String {
    let repo = git2::Repository::open(dir)
        .unwrap_or_else(|e| panic!("current_branch: cannot open {}: {e}", dir.display()));
    let head = repo
        .head()
        .unwrap_or_else(|e| panic!("current_branch: no HEAD in {}: {e}", dir.display()));
    head.shorthand().unwrap_or("HEAD").to_string()
}

/// Full id of the commit HEAD points at, read through `git2`.
pub fn head_id(dir: &Path) -> String {
    let repo = git2::Repository::open(dir)
        .unwrap_or_else(|e| panic!("head_id: cannot open {}: {e}", dir.display()));
    let commit = repo
        .head()
        .and_then(|head| head.peel_to_commit())
        .unwrap_or_else(|e| panic!("head_id: cannot resolve HEAD in {}: {e}", dir.display()));
    commit.id().to_string()
}

/// A bare repository acting as the remote, and the seed repository it was
/// created from.
///
/// The bare path is passed to the code under test as the remote URL. New
/// remote commits are made in the seed and pushed to the bare repository.
pub struct RemoteFixture {
    pub bare: PathBuf,
    pub seed: PathBuf,
    pub branch: String,
}

impl RemoteFixture {
    /// Create `<root>/<name>.git` with one commit containing `files` on `branch`.
    pub fn new(root: &Path, name: &str, branch: &str, files: &[(&str, &str)]) -> Self {
        let seed = root.join(format!("{name}-seed"));
        fs::create_dir_all(&seed)
            .unwrap_or_else(|e| panic!("RemoteFixture: failed to create seed dir: {e}"));

        git(&seed, &["init"]);
        configure_identity(&seed);
        commit_files(&seed, files, "Initial data");
        git(&seed, &["branch", "-M", branch]);

        let bare = root.join(format!("{name}.git"));
        let bare_arg = bare.to_string_lossy().into_owned();
        git(root, &["clone", "--bare", "--quiet", &seed.to_string_lossy(), &bare_arg]);

        Self {
            bare,
            seed,
            branch: branch.to_string(),
        }
    }

    /// The remote URL handed to the code under test.
    pub fn url(&self) -> String {
        self.bare.to_string_lossy().into_owned()
    }

    /// Commit `files` in the seed and publish them to the remote.
    pub fn push_change(&self, files: &[(&str, &str)], message: &str) {
        commit_files(&self.seed, files, message);
        let bare_arg = self.url();
        git(&self.seed, &["push", "--quiet", &bare_arg, &self.branch]);
    }

    /// Publish an extra branch on the remote, pointing at the current seed HEAD.
    pub fn add_branch(&self, branch: &str) {
        let bare_arg = self.url();
        let refspec = format!("HEAD:refs/heads/{branch}");
        git(&self.seed, &["push", "--quiet", &bare_arg, &refspec]);
    }

    /// Id of the branch tip on the remote.
    pub fn tip(&self) -> String {
        let refname = format!("refs/heads/{}", self.branch);
        git(&self.bare, &["rev-parse", &refname])
    }
}
