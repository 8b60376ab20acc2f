//! Commands that change the data: set, commit and push

use colored::Colorize;
use gitdata_store::Settings;

use super::query::display_path;
use crate::error::{CliError, Result};

/// Run the set command
///
/// `args` is `[PATH] KEY FIELD=VALUE...`; every value is stored as a string.
pub fn run_set(settings: Settings, args: &[String]) -> Result<()> {
    let split = args.iter().position(|arg| arg.contains('=')).unwrap_or(args.len());
    let (target, assignments) = args.split_at(split);
    let (path, key) = super::split_target(target)?;
    if assignments.is_empty() {
        return Err(CliError::user("expected at least one FIELD=VALUE"));
    }
    let assignments = parse_assignments(assignments)?;

    let data = super::open(settings)?;
    let mut record = data.load_key(path, key)?.ok_or_else(|| {
        CliError::user(format!("no record '{}' in '{}'", key, display_path(path)))
    })?;

    for (field, value) in assignments {
        record.set_dotted(field, value);
    }
    record.save()?;

    println!(
        "{} Updated {}",
        "OK".green().bold(),
        record.path().as_str().cyan()
    );
    Ok(())
}

/// Run the commit command
pub fn run_commit(settings: Settings, message: &str) -> Result<()> {
    let data = super::open(settings)?;
    data.commit(message)?;
    println!("{} Committed: {}", "OK".green().bold(), message);
    Ok(())
}

/// Run the push command
pub fn run_push(settings: Settings) -> Result<()> {
    let data = super::open(settings)?;
    data.push()?;
    println!("{} Pushed to {}", "OK".green().bold(), data.settings().branch.cyan());
    Ok(())
}

fn parse_assignments(assignments: &[String]) -> Result<Vec<(&str, &str)>> {
    assignments
        .iter()
        .map(|assignment| match assignment.split_once('=') {
            Some((field, value)) if !field.trim().is_empty() => Ok((field.trim(), value)),
            _ => Err(CliError::user(format!(
                "invalid assignment '{assignment}', expected FIELD=VALUE"
            ))),
        })
        .collect()
}
