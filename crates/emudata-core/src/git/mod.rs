//! Git operations for acquiring and updating the local data clone.
//!
//! This module provides:
//! - [`GitBackend`], the capability interface the resolver depends on
//! - [`GitCli`], the backend used in production
//! - [`RemoteSpec`], the remote URL and the clone directory derived from it

mod backend;
mod cli;
mod spec;

pub use backend::GitBackend;
pub use cli::GitCli;
pub use spec::{DEFAULT_MAINLINE, DEFAULT_REMOTE_URL, RemoteSpec};
