//! Command implementations for gitdata-cli

pub mod edit;
pub mod query;
pub mod sync;

pub use edit::{run_commit, run_push, run_set};
pub use query::{run_list, run_show};
pub use sync::run_sync;

use gitdata_git::GitCli;
use gitdata_store::{GitData, Settings};

use crate::error::{CliError, Result};

/// Resolve the configured source and open its records.
pub fn open(settings: Settings) -> Result<GitData> {
    if settings.source.is_none() {
        return Err(CliError::user(
            "no data source given; pass --source or set `source` in --config",
        ));
    }
    Ok(GitData::open(settings, GitCli::new())?)
}

/// Split `[PATH] KEY` into a path (empty when omitted) and a key.
pub fn split_target(args: &[String]) -> Result<(&str, &str)> {
    match args {
        [key] => Ok(("", key.as_str())),
        [path, key] => Ok((path.as_str(), key.as_str())),
        _ => Err(CliError::user("expected [PATH] KEY")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn split_target_with_and_without_path() {
        let one = strings(&["a"]);
        assert_eq!(split_target(&one).unwrap(), ("", "a"));
        let two = strings(&["images", "a"]);
        assert_eq!(split_target(&two).unwrap(), ("images", "a"));
        let three = strings(&["x", "y", "z"]);
        assert!(split_target(&three).is_err());
    }
}
