//! Filesystem helpers for gitdata
//!
//! Provides forward-slash normalized paths, atomic text I/O and
//! format-agnostic loading of settings files.

pub mod config;
pub mod error;
pub mod io;
pub mod path;

pub use config::ConfigStore;
pub use error::{Error, Result};
pub use path::NormalizedPath;
