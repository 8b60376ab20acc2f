//! Local clone lifecycle for gitdata
//!
//! Decides whether an existing clone of a data repository can be reused,
//! must be re-cloned, or conflicts with its remote, and carries out that
//! decision through a [`GitExecutor`].

pub mod error;
pub mod exec;
pub mod source;
pub mod state;
pub mod sync;

pub use error::{Error, Result};
pub use exec::{GitCli, GitExecutor, GitOutput};
pub use source::SourceLocation;
pub use state::{CloneState, SyncAction};
pub use sync::SyncEngine;
