//! gitdata CLI
//!
//! Query and edit YAML/JSON records kept in a git repository.

mod cli;
mod commands;
mod error;

use clap::Parser;
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use cli::{Cli, Commands};
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .with_writer(std::io::stderr)
            .finish();
        if tracing::subscriber::set_global_default(subscriber).is_ok() {
            tracing::debug!("Verbose mode enabled");
        }
    }

    let Some(command) = cli.command else {
        println!("{} query and edit git-tracked data", "gitdata".green().bold());
        println!();
        println!("Run {} for available commands.", "gitdata --help".cyan());
        return Ok(());
    };

    let settings = cli.source.settings()?;
    match command {
        Commands::Sync => commands::run_sync(settings),
        Commands::List {
            path,
            conditions,
            owner,
            mode,
            json,
        } => commands::run_list(
            settings,
            path.as_deref().unwrap_or_default(),
            &conditions,
            owner.as_deref(),
            mode.as_deref(),
            json,
        ),
        Commands::Show { args, json } => {
            let (path, key) = commands::split_target(&args)?;
            commands::run_show(settings, path, key, json)
        }
        Commands::Set { args } => commands::run_set(settings, &args),
        Commands::Commit { message } => commands::run_commit(settings, &message),
        Commands::Push => commands::run_push(settings),
    }
}
