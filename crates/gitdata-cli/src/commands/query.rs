//! Read-only commands: list and show

use colored::Colorize;
use gitdata_store::filter::{self, FieldMatch, RecordFilter};
use gitdata_store::{Format, Settings};

use crate::error::{CliError, Result};

/// Run the list command
///
/// All given conditions must match. Keys print one per line in sorted
/// order; `--json` prints an object of key to record content instead.
pub fn run_list(
    settings: Settings,
    path: &str,
    conditions: &[String],
    owner: Option<&str>,
    mode: Option<&str>,
    json: bool,
) -> Result<()> {
    let data = super::open(settings)?;

    let field_matches = conditions
        .iter()
        .map(String::as_str)
        .map(FieldMatch::parse)
        .collect::<gitdata_store::Result<Vec<_>>>()?;
    let owner_filter = owner.map(filter::owner_is);
    let mode_filter = mode.map(filter::mode_is);

    let mut filters: Vec<&dyn RecordFilter> = field_matches
        .iter()
        .map(|f| f as &dyn RecordFilter)
        .collect();
    if let Some(f) = &owner_filter {
        filters.push(f);
    }
    if let Some(f) = &mode_filter {
        filters.push(f);
    }

    let records = data.load_all(path, &filters)?;
    tracing::debug!(path, count = records.len(), "Listed records");

    if json {
        let object: serde_json::Map<String, serde_json::Value> = records
            .iter()
            .map(|(key, record)| (key.to_string(), record.data.clone()))
            .collect();
        println!("{}", serde_json::to_string_pretty(&object)?);
    } else {
        for key in records.keys() {
            println!("{key}");
        }
    }
    Ok(())
}

/// Run the show command
///
/// A missing record is reported but is not an error.
pub fn run_show(settings: Settings, path: &str, key: &str, json: bool) -> Result<()> {
    let data = super::open(settings)?;

    let Some(record) = data.load_key(path, key)? else {
        println!("{} No record '{}' in '{}'", "warning:".yellow().bold(), key, display_path(path));
        return Ok(());
    };

    let format = if json { Format::Json } else { record.format() };
    let content = format.encode(&record.data).map_err(CliError::user)?;
    print!("{content}");
    Ok(())
}

pub(crate) fn display_path(path: &str) -> &str {
    if path.is_empty() { "." } else { path }
}
