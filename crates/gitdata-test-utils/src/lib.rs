//! Shared test utilities for the gitdata workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`git`]: bare "remote" repositories and clone inspection
//! - [`data`]: [`DataDir`] builder for record directories

pub mod data;
pub mod git;

pub use data::DataDir;
pub use git::RemoteFixture;
