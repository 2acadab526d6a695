//! Emudata Core Library
//!
//! Keeps a local clone of a git-lfs backed model-data repository present,
//! verified, up to date and checked out at a requested version.

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod git;
pub mod integrity;
pub mod resolver;
pub mod version;

/// Re-exports of commonly used types
pub mod prelude {
    // Configuration
    pub use crate::config::{ConfigStore, EmuDataConfig, RemoteConfig};

    // Errors
    pub use crate::error::{EmuDataError, GitError};

    // Git
    pub use crate::git::{GitBackend, GitCli, RemoteSpec};

    // Diagnostics
    pub use crate::diagnostics::{Diagnostics, Step, TracingDiagnostics};

    // Integrity
    pub use crate::integrity::ArtifactCheck;

    // Version
    pub use crate::resolver::{StepOutcome, SyncReport, VersionResolver};
    pub use crate::version::{CheckoutTarget, VersionRequest};
}
