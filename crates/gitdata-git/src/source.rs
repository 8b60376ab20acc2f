//! Classification of data sources

use std::path::{Path, PathBuf};

use gitdata_fs::NormalizedPath;

use crate::{Error, Result};

/// URL schemes that are cloned rather than read in place.
pub const REMOTE_SCHEMES: &[&str] = &["ssh", "ssh+git", "http", "https"];

/// Where the tracked data comes from.
///
/// Computed once by [`SourceLocation::parse`] and never reclassified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceLocation {
    /// A repository that has to be cloned locally.
    Remote {
        /// The URL exactly as given, passed unchanged to git
        url: String,
        /// Clone directory name: last URL path segment, extension stripped
        name: String,
    },
    /// A directory used in place.
    Local { path: PathBuf },
}

impl SourceLocation {
    /// Classify a data source string.
    ///
    /// - `ssh://`, `ssh+git://`, `http://`, `https://` URLs are remote.
    /// - scp-style `host:path` (no `/` before the first `:`, and not a
    ///   drive letter such as `C:`) is remote.
    /// - `file://` and `file:` URLs and plain paths are local and made absolute.
    /// - any other `scheme://` is rejected with [`Error::InvalidSource`].
    pub fn parse(location: &str) -> Result<Self> {
        if let Some((scheme, rest)) = location.split_once("://") {
            let scheme = scheme.to_ascii_lowercase();
            if REMOTE_SCHEMES.contains(&scheme.as_str()) {
                return Self::remote(location, rest);
            }
            if scheme == "file" {
                let rest = rest.strip_prefix("localhost").unwrap_or(rest);
                return Self::local(Path::new(rest));
            }
            return Err(Error::InvalidSource {
                location: location.to_string(),
                scheme,
            });
        }

        // `file:/srv/data` and `file:data` have no authority part
        if let Some(prefix) = location.get(..5)
            && prefix.eq_ignore_ascii_case("file:")
        {
            return Self::local(Path::new(&location[5..]));
        }

        match scp_path(location) {
            Some(path) => Self::remote(location, path),
            None => Self::local(Path::new(location)),
        }
    }

    fn remote(url: &str, path: &str) -> Result<Self> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let name = NormalizedPath::new(path.trim_end_matches('/'))
            .stem()
            .filter(|stem| !stem.is_empty() && !stem.contains(':'))
            .map(str::to_string)
            .ok_or_else(|| Error::UnnamedSource {
                location: url.to_string(),
            })?;

        Ok(Self::Remote {
            url: url.to_string(),
            name,
        })
    }

    fn local(path: &Path) -> Result<Self> {
        let path = std::path::absolute(path)
            .map_err(|e| Error::Fs(gitdata_fs::Error::io(path, e)))?;
        Ok(Self::Local { path })
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Remote { .. })
    }

    /// The remote URL, if this source is cloned.
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Remote { url, .. } => Some(url),
            Self::Local { .. } => None,
        }
    }
}

impl std::fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Remote { url, .. } => write!(f, "{url}"),
            Self::Local { path } => write!(f, "{}", path.display()),
        }
    }
}

/// Path part of a scp-style `[user@]host:path` location.
fn scp_path(location: &str) -> Option<&str> {
    let (host, path) = location.split_once(':')?;
    if host.is_empty() || host.contains('/') || host.contains('\\') {
        return None;
    }
    // `C:\data` and `C:/data` are Windows drives
    if host.len() == 1 && host.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    Some(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scp_path_splits_at_first_colon() {
        assert_eq!(scp_path("git@github.com:org/data.git"), Some("org/data.git"));
    }

    #[test]
    fn scp_path_rejects_slash_before_colon() {
        assert_eq!(scp_path("./weird:name"), None);
        assert_eq!(scp_path("/abs/weird:name"), None);
    }

    #[test]
    fn scp_path_rejects_drive_letter() {
        assert_eq!(scp_path("C:\\data"), None);
    }
}
