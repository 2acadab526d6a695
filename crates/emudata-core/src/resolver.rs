//! Clone, verify, update and check out the model-data repository.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::diagnostics::{Diagnostics, Step, TracingDiagnostics};
use crate::error::{EmuDataError, GitError};
use crate::git::{GitBackend, GitCli, RemoteSpec};
use crate::integrity::ArtifactCheck;
use crate::version::{CheckoutTarget, VersionRequest, available_versions, resolve};

/// Outcome of a best-effort step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StepOutcome {
    Done,
    Skipped { reason: String },
}

impl StepOutcome {
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }
}

/// Summary of one successful [`VersionResolver::ensure_and_select_version`] call.
#[derive(Debug, Clone, Serialize)]
pub struct SyncReport {
    pub clone_dir: PathBuf,
    /// Whether the clone was created by this call
    pub cloned: bool,
    pub artifact_bytes: u64,
    pub pull: StepOutcome,
    pub target: CheckoutTarget,
    pub checkout: StepOutcome,
    pub available_versions: Vec<String>,
}

/// Keeps a local clone of the remote at the requested version.
#[derive(Debug, Clone)]
pub struct VersionResolver<B = GitCli, D = TracingDiagnostics> {
    backend: B,
    diagnostics: D,
    remote: RemoteSpec,
    artifact: ArtifactCheck,
}

impl VersionResolver {
    /// Resolver using the `git` binary and tracing-based warnings.
    pub fn new(remote: RemoteSpec, artifact: ArtifactCheck) -> Self {
        Self::with_backend(GitCli::new(), TracingDiagnostics, remote, artifact)
    }
}

impl<B: GitBackend, D: Diagnostics> VersionResolver<B, D> {
    pub fn with_backend(
        backend: B,
        diagnostics: D,
        remote: RemoteSpec,
        artifact: ArtifactCheck,
    ) -> Self {
        Self {
            backend,
            diagnostics,
            remote,
            artifact,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn diagnostics(&self) -> &D {
        &self.diagnostics
    }

    pub fn remote(&self) -> &RemoteSpec {
        &self.remote
    }

    /// Ensure a verified clone under `data_path` and check out `version`.
    ///
    /// Clone failures, a too-small artifact and unknown explicit versions are
    /// fatal. Pull and checkout failures are reported to the diagnostics sink
    /// and leave the clone as it was.
    pub fn ensure_and_select_version(
        &self,
        data_path: &Path,
        version: &VersionRequest,
    ) -> Result<SyncReport, EmuDataError> {
        let clone_dir = self.remote.clone_dir(data_path)?;
        let cloned = self.acquire_clone(data_path, &clone_dir)?;

        let artifact_bytes = self.artifact.verify(&clone_dir, &self.remote.repo_url)?;

        let pull = self.best_effort(Step::Pull, self.backend.pull(&clone_dir));

        let tags = self.tags(&clone_dir);
        let available_versions = available_versions(&tags);
        let target = resolve(version, &tags, &self.remote.mainline)?;
        tracing::debug!(%version, target = target.name(), "Resolved version");

        let checkout = self.best_effort(
            Step::Checkout,
            self.backend.checkout(&clone_dir, target.name()),
        );

        Ok(SyncReport {
            clone_dir,
            cloned,
            artifact_bytes,
            pull,
            target,
            checkout,
            available_versions,
        })
    }

    /// Versions available in an existing clone, without touching the remote.
    pub fn available_versions(&self, data_path: &Path) -> Result<Vec<String>, EmuDataError> {
        let clone_dir = self.open_existing(data_path)?;
        Ok(available_versions(&self.tags(&clone_dir)))
    }

    /// Run only the artifact size check against an existing clone.
    pub fn verify(&self, data_path: &Path) -> Result<u64, EmuDataError> {
        let clone_dir = self.open_existing(data_path)?;
        self.artifact.verify(&clone_dir, &self.remote.repo_url)
    }

    /// Open the clone if present, otherwise clone it. Returns whether a clone happened.
    fn acquire_clone(&self, data_path: &Path, clone_dir: &Path) -> Result<bool, EmuDataError> {
        if clone_dir.exists() {
            self.backend.open(clone_dir).map_err(|source| EmuDataError::Open {
                path: clone_dir.to_path_buf(),
                source,
            })?;
            tracing::debug!(path = %clone_dir.display(), "Reusing existing clone");
            return Ok(false);
        }

        std::fs::create_dir_all(data_path).map_err(|source| EmuDataError::CreateDataDir {
            path: data_path.to_path_buf(),
            source,
        })?;

        tracing::info!(
            url = %self.remote.repo_url,
            path = %clone_dir.display(),
            "Cloning data repository"
        );
        self.backend
            .clone_repo(&self.remote.repo_url, clone_dir)
            .map_err(|source| EmuDataError::Clone {
                url: self.remote.repo_url.clone(),
                path: clone_dir.to_path_buf(),
                source,
            })?;
        Ok(true)
    }

    fn open_existing(&self, data_path: &Path) -> Result<PathBuf, EmuDataError> {
        let clone_dir = self.remote.clone_dir(data_path)?;
        if !clone_dir.exists() {
            return Err(EmuDataError::NotCloned { path: clone_dir });
        }
        self.backend.open(&clone_dir).map_err(|source| EmuDataError::Open {
            path: clone_dir.clone(),
            source,
        })?;
        Ok(clone_dir)
    }

    /// Tag names, or none when they cannot be read.
    fn tags(&self, clone_dir: &Path) -> Vec<String> {
        match self.backend.list_tags(clone_dir) {
            Ok(tags) => tags,
            Err(error) => {
                self.diagnostics.warn(Step::ListTags, &error);
                Vec::new()
            }
        }
    }

    fn best_effort(&self, step: Step, result: Result<(), GitError>) -> StepOutcome {
        match result {
            Ok(()) => StepOutcome::Done,
            Err(error) => {
                self.diagnostics.warn(step, &error);
                StepOutcome::Skipped {
                    reason: error.to_string(),
                }
            }
        }
    }
}
