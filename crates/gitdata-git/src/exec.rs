//! Git command execution
//!
//! Every invocation names its working directory explicitly; the process
//! working directory is never changed.

use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Arc;

use crate::{Error, Result};

/// Captured result of a git invocation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GitOutput {
    /// Exit code; `-1` when the process was terminated by a signal
    pub status: i32,
    pub stdout: String,
    pub stderr: String,
}

impl GitOutput {
    pub fn success(&self) -> bool {
        self.status == 0
    }
}

/// Runs git subcommands.
///
/// `run` only fails when git cannot be started at all; a non-zero exit is
/// reported through [`GitOutput::status`]. `run_checked` turns a non-zero
/// exit into [`Error::Command`].
pub trait GitExecutor {
    /// Run `git <args>` with `dir` as the working directory.
    fn run(&self, dir: &Path, args: &[&str]) -> Result<GitOutput>;

    /// Run `git <args>` and return trimmed stdout, failing on non-zero exit.
    fn run_checked(&self, dir: &Path, args: &[&str]) -> Result<String> {
        let output = self.run(dir, args)?;
        if output.success() {
            Ok(output.stdout.trim().to_string())
        } else {
            Err(Error::Command {
                command: format!("git {}", args.join(" ")),
                status: output.status,
                stderr: output.stderr.trim().to_string(),
            })
        }
    }
}

impl<G: GitExecutor + ?Sized> GitExecutor for &G {
    fn run(&self, dir: &Path, args: &[&str]) -> Result<GitOutput> {
        (**self).run(dir, args)
    }
}

impl<G: GitExecutor + ?Sized> GitExecutor for Arc<G> {
    fn run(&self, dir: &Path, args: &[&str]) -> Result<GitOutput> {
        (**self).run(dir, args)
    }
}

/// [`GitExecutor`] backed by the `git` binary.
#[derive(Debug, Clone)]
pub struct GitCli {
    program: PathBuf,
}

impl Default for GitCli {
    fn default() -> Self {
        Self {
            program: PathBuf::from("git"),
        }
    }
}

impl GitCli {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a specific git binary instead of the one on `PATH`.
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl GitExecutor for GitCli {
    fn run(&self, dir: &Path, args: &[&str]) -> Result<GitOutput> {
        tracing::debug!(dir = %dir.display(), ?args, "Running git");

        let output = Command::new(&self.program)
            .args(args)
            .current_dir(dir)
            .env("GIT_TERMINAL_PROMPT", "0")
            .output()
            .map_err(|source| Error::Spawn {
                program: self.program.clone(),
                source,
            })?;

        let result = GitOutput {
            status: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };
        if !result.success() {
            tracing::debug!(status = result.status, stderr = %result.stderr.trim(), "git exited non-zero");
        }
        Ok(result)
    }
}
