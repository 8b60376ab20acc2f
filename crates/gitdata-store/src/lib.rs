//! Records loaded from a git-tracked data directory
//!
//! A [`RecordStore`] projects a directory of YAML/JSON files into keyed
//! [`Record`]s, filters them with [`RecordFilter`]s and writes changes back.
//! [`GitData`] ties a store to a [`SyncEngine`](gitdata_git::SyncEngine)
//! resolved from [`Settings`].

pub mod error;
pub mod filter;
pub mod format;
pub mod gitdata;
pub mod record;
pub mod settings;
pub mod store;

pub use error::{Error, Result};
pub use filter::{FieldMatch, RecordFilter};
pub use format::Format;
pub use gitdata::GitData;
pub use record::{Record, RecordCollection};
pub use settings::Settings;
pub use store::{Loaded, RecordStore};

pub use serde_json::Value;
