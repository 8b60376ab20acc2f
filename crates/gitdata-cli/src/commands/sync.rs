//! Sync command: resolve the data source to a local directory

use colored::Colorize;
use gitdata_store::Settings;

use crate::error::Result;

/// Run the sync command
///
/// Prints the resolved directory on stdout so it can be captured by scripts.
pub fn run_sync(settings: Settings) -> Result<()> {
    let data = super::open(settings)?;

    if let Some(url) = data.remote_url() {
        eprintln!(
            "{} {} ({})",
            "=>".blue().bold(),
            url.cyan(),
            data.settings().branch.dimmed()
        );
    }
    println!("{}", data.root().display());
    Ok(())
}
