//! Remote repository specification types.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::EmuDataError;

/// Remote cloned when no other remote is configured.
pub const DEFAULT_REMOTE_URL: &str = "https://huggingface.co/DanielaBreitman/21cmEMU";

/// Branch checked out for the `latest` version.
pub const DEFAULT_MAINLINE: &str = "main";

/// Specification for the remote model-data repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteSpec {
    /// Repository URL (e.g., "https://huggingface.co/org/model")
    pub repo_url: String,
    /// Branch that `latest` resolves to
    pub mainline: String,
}

impl Default for RemoteSpec {
    fn default() -> Self {
        Self::new(DEFAULT_REMOTE_URL)
    }
}

impl RemoteSpec {
    /// Create a new RemoteSpec tracking the default mainline.
    pub fn new(repo_url: impl Into<String>) -> Self {
        Self {
            repo_url: repo_url.into(),
            mainline: DEFAULT_MAINLINE.to_string(),
        }
    }

    /// Set the branch used for `latest`.
    pub fn with_mainline(mut self, mainline: impl Into<String>) -> Self {
        self.mainline = mainline.into();
        self
    }

    /// Parse a remote source string into a RemoteSpec.
    ///
    /// Supports formats:
    /// - `hf:owner/name` (Hugging Face shorthand)
    /// - `git:https://host/owner/name`
    /// - any URL or local path git can clone from
    pub fn parse(source: &str) -> Result<Self, EmuDataError> {
        let source = source.trim();
        let raw = source.strip_prefix("git:").unwrap_or(source);
        let raw = if let Some(shorthand) = raw.strip_prefix("hf:") {
            Self::expand_hf_shorthand(shorthand).ok_or_else(|| EmuDataError::InvalidRemote {
                url: source.to_string(),
                reason: "expected hf:<owner>/<name>".to_string(),
            })?
        } else {
            raw.to_string()
        };

        let spec = Self::new(raw);
        spec.repo_name()?;
        Ok(spec)
    }

    /// Expand "owner/name" to a Hugging Face model URL.
    fn expand_hf_shorthand(shorthand: &str) -> Option<String> {
        let (owner, name) = shorthand.trim_matches('/').split_once('/')?;
        if owner.is_empty() || name.is_empty() || name.contains('/') {
            return None;
        }
        Some(format!("https://huggingface.co/{}/{}", owner, name))
    }

    /// Name of the clone directory, taken from the last path segment.
    pub fn repo_name(&self) -> Result<String, EmuDataError> {
        let last = match url::Url::parse(&self.repo_url) {
            Ok(url) if url.scheme().len() > 1 => url
                .path_segments()
                .and_then(|segments| segments.filter(|s| !s.is_empty()).next_back())
                .map(str::to_string),
            // Plain paths, and Windows drive letters that parse as a scheme
            _ => Path::new(self.repo_url.trim_end_matches(['/', '\\']))
                .file_name()
                .map(|name| name.to_string_lossy().into_owned()),
        };

        let name = last.unwrap_or_default();
        let name = name.strip_suffix(".git").unwrap_or(&name);
        if name.is_empty() || name == "." || name == ".." {
            return Err(EmuDataError::InvalidRemote {
                url: self.repo_url.clone(),
                reason: "cannot derive a directory name from the URL".to_string(),
            });
        }
        Ok(name.to_string())
    }

    /// Compute the local clone directory under `data_path`.
    pub fn clone_dir(&self, data_path: &Path) -> Result<PathBuf, EmuDataError> {
        Ok(data_path.join(self.repo_name()?))
    }
}
