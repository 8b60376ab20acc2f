//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use gitdata_store::Settings;

use crate::error::Result;

/// gitdata - Query and edit records kept in a git repository
#[derive(Parser, Debug)]
#[command(name = "gitdata")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(flatten)]
    pub source: SourceArgs,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Where the data lives. Flags override the config file, which overrides
/// the defaults.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceArgs {
    /// Settings file (.toml, .yaml, .yml or .json)
    #[arg(long, global = true, env = "GITDATA_CONFIG")]
    pub config: Option<PathBuf>,

    /// Remote URL or local path of the data
    #[arg(long, global = true, env = "GITDATA_SOURCE")]
    pub source: Option<String>,

    /// Directory remote sources are cloned into
    #[arg(long, global = true)]
    pub clone_dir: Option<PathBuf>,

    /// Branch the clone must track
    #[arg(long, global = true)]
    pub branch: Option<String>,

    /// Subdirectory of the data holding the records
    #[arg(long, global = true)]
    pub sub_dir: Option<String>,

    /// Recognized record extension, in lookup order (repeatable)
    #[arg(long = "ext", global = true, value_name = "EXT")]
    pub extensions: Vec<String>,
}

impl SourceArgs {
    /// Merge the config file (if any) with explicit flags.
    pub fn settings(&self) -> Result<Settings> {
        let mut settings = match &self.config {
            Some(path) => Settings::load(path)?,
            None => Settings::default(),
        };

        if let Some(source) = &self.source {
            settings.source = Some(source.clone());
        }
        if let Some(clone_dir) = &self.clone_dir {
            settings.clone_dir = clone_dir.clone();
        }
        if let Some(branch) = &self.branch {
            settings.branch = branch.clone();
        }
        if let Some(sub_dir) = &self.sub_dir {
            settings.sub_dir = Some(sub_dir.clone());
        }
        if !self.extensions.is_empty() {
            settings.extensions = self.extensions.clone();
        }
        Ok(settings)
    }
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Resolve the data source and print its local directory
    ///
    /// Remote sources are cloned or refreshed as needed.
    Sync,

    /// List the keys of matching records
    ///
    /// Examples:
    ///   gitdata list images --owner someone@example.com
    ///   gitdata list images --where from.stream=rhel --mode wip
    ///   gitdata list images --json
    List {
        /// Directory below the data root
        path: Option<String>,

        /// Keep records whose FIELD equals VALUE (repeatable, all must match)
        #[arg(long = "where", value_name = "FIELD=VALUE")]
        conditions: Vec<String>,

        /// Keep records listing this owner
        #[arg(long)]
        owner: Option<String>,

        /// Keep records in this mode (records without one are "enabled")
        #[arg(long)]
        mode: Option<String>,

        /// Print records as a JSON object keyed by record key
        #[arg(long)]
        json: bool,
    },

    /// Print one record
    Show {
        /// [PATH] KEY
        #[arg(value_name = "PATH_OR_KEY", num_args = 1..=2, required = true)]
        args: Vec<String>,

        /// Print as JSON regardless of the file format
        #[arg(long)]
        json: bool,
    },

    /// Set fields on one record and save it
    ///
    /// Examples:
    ///   gitdata set images cluster-autoscaler mode=wip
    ///   gitdata set cluster-autoscaler from.stream=golang
    Set {
        /// [PATH] KEY FIELD=VALUE...
        #[arg(value_name = "ARGS", num_args = 2.., required = true)]
        args: Vec<String>,
    },

    /// Stage every change and commit it
    Commit {
        /// Commit message
        #[arg(short, long)]
        message: String,
    },

    /// Push the checked-out branch to origin
    Push,
}
