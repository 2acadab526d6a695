//! Configuration schema for emudata.toml

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::git::{DEFAULT_MAINLINE, DEFAULT_REMOTE_URL, RemoteSpec};
use crate::integrity::ArtifactCheck;

use super::paths;

/// Root configuration structure for emudata.toml
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct EmuDataConfig {
    /// Directory the clone lives under (defaults to the user data dir)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,

    #[serde(default)]
    pub remote: RemoteConfig,

    #[serde(default)]
    pub artifact: ArtifactCheck,
}

/// Remote repository settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// URL, local path, or `hf:owner/name` shorthand
    #[serde(default = "default_url")]
    pub url: String,

    /// Branch checked out for `latest`
    #[serde(default = "default_mainline")]
    pub mainline: String,
}

fn default_url() -> String {
    DEFAULT_REMOTE_URL.to_string()
}

fn default_mainline() -> String {
    DEFAULT_MAINLINE.to_string()
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            mainline: default_mainline(),
        }
    }
}

impl EmuDataConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configured data directory, or the platform default.
    pub fn data_dir(&self) -> anyhow::Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => paths::default_data_dir(),
        }
    }

    pub fn remote_spec(&self) -> anyhow::Result<RemoteSpec> {
        let spec = RemoteSpec::parse(&self.remote.url)?;
        Ok(spec.with_mainline(&self.remote.mainline))
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        self.remote_spec()?;

        if self.remote.mainline.trim().is_empty() {
            anyhow::bail!("remote.mainline must not be empty");
        }
        if self.artifact.path.as_os_str().is_empty() {
            anyhow::bail!("artifact.path must not be empty");
        }
        if self.artifact.path.is_absolute() {
            anyhow::bail!(
                "artifact.path must be relative to the clone root: {}",
                self.artifact.path.display()
            );
        }
        if self.artifact.min_bytes == 0 {
            anyhow::bail!("artifact.min_bytes must be greater than zero");
        }
        Ok(())
    }
}
