use std::path::PathBuf;
use thiserror::Error;

use crate::integrity::remediation;

/// Failure of a single delegated git operation.
#[derive(Debug, Error)]
pub enum GitError {
    #[error("Failed to run git {args:?}: {source}")]
    Spawn {
        args: Vec<String>,
        #[source]
        source: std::io::Error,
    },

    #[error("Git command failed {args:?}: {stderr}")]
    Failed { args: Vec<String>, stderr: String },

    #[error("Git repository error: {0}")]
    Repository(#[from] git2::Error),
}

/// Fatal errors of the fetch-and-select operation.
///
/// Anything not listed here is a best-effort step: it is reported through
/// [`crate::diagnostics::Diagnostics`] and never aborts the operation.
#[derive(Debug, Error)]
pub enum EmuDataError {
    #[error("Invalid remote '{url}': {reason}")]
    InvalidRemote { url: String, reason: String },

    #[error("Failed to create data directory {path}: {source}")]
    CreateDataDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to clone {url} into {path}: {source}")]
    Clone {
        url: String,
        path: PathBuf,
        #[source]
        source: GitError,
    },

    #[error("Failed to open existing clone at {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: GitError,
    },

    #[error("No local clone at {path}. Run `emudata fetch` first.")]
    NotCloned { path: PathBuf },

    #[error(
        "The repository at {clone_dir} was not cloned properly: {path} is {size} bytes, \
         expected at least {min_bytes}.\n{}",
        remediation(.url, .clone_dir)
    )]
    Integrity {
        path: PathBuf,
        size: u64,
        min_bytes: u64,
        url: String,
        clone_dir: PathBuf,
    },

    #[error(
        "The repository at {clone_dir} was not cloned properly: {path} could not be read ({source}).\n{}",
        remediation(.url, .clone_dir)
    )]
    MissingArtifact {
        path: PathBuf,
        url: String,
        clone_dir: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Version {requested} not available. Must be one of {available:?}.")]
    VersionNotAvailable {
        requested: String,
        available: Vec<String>,
    },
}
