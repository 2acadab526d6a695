//! Size heuristic for detecting unmaterialized git-lfs pointer files.
//!
//! A clone made without git-lfs contains small text pointers in place of
//! the real binary content. Checking the size of one known large artifact
//! is enough to tell the two apart.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::EmuDataError;

/// Artifact checked by default, relative to the clone root.
pub const DEFAULT_ARTIFACT_PATH: &str = "21cmEMU/saved_model.pb";

/// Smallest size a real (non-pointer) artifact may have.
pub const MIN_ARTIFACT_BYTES: u64 = 1_000_000;

/// Which artifact to check and how large it must be.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtifactCheck {
    /// Path of the artifact relative to the clone root
    pub path: PathBuf,
    /// Minimum accepted size in bytes
    pub min_bytes: u64,
}

impl Default for ArtifactCheck {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_ARTIFACT_PATH),
            min_bytes: MIN_ARTIFACT_BYTES,
        }
    }
}

impl ArtifactCheck {
    pub fn new(path: impl Into<PathBuf>, min_bytes: u64) -> Self {
        Self {
            path: path.into(),
            min_bytes,
        }
    }

    /// Verify the artifact inside `clone_dir` and return its size.
    ///
    /// `remote_url` only feeds the remediation text of the error.
    pub fn verify(&self, clone_dir: &Path, remote_url: &str) -> Result<u64, EmuDataError> {
        let path = clone_dir.join(&self.path);
        let size = match std::fs::metadata(&path) {
            Ok(meta) => meta.len(),
            Err(source) => {
                return Err(EmuDataError::MissingArtifact {
                    path,
                    url: remote_url.to_string(),
                    clone_dir: clone_dir.to_path_buf(),
                    source,
                });
            }
        };

        if size < self.min_bytes {
            return Err(EmuDataError::Integrity {
                path,
                size,
                min_bytes: self.min_bytes,
                url: remote_url.to_string(),
                clone_dir: clone_dir.to_path_buf(),
            });
        }

        tracing::debug!(path = %path.display(), size, "Artifact size check passed");
        Ok(size)
    }
}

/// Instructions for getting a complete copy onto a machine without git-lfs.
pub fn remediation(remote_url: &str, clone_dir: &Path) -> String {
    let folder = clone_dir
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| clone_dir.display().to_string());

    format!(
        "Check that git-lfs is installed properly on your system.\n\
         If git-lfs cannot be installed or no internet connection is available, \
         clone the repository on another machine with git-lfs and internet access using\n\
         \n    git clone -v -- {remote_url}\n\n\
         Then make sure it downloaded fully by running: du -sh {folder}\n\
         (the default emulator repository is about 500M).\n\
         Finally copy this folder and its contents to this machine at\n\
         \n    {}\n",
        clone_dir.display()
    )
}
