use std::cell::RefCell;
use std::path::{Path, PathBuf};

use emudata_core::diagnostics::{Diagnostics, Step};
use emudata_core::error::GitError;
use emudata_core::git::GitBackend;
use emudata_core::integrity::DEFAULT_ARTIFACT_PATH;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Clone { url: String, dest: PathBuf },
    Open(PathBuf),
    ListTags,
    Pull,
    Checkout(String),
}

/// In-memory [`GitBackend`] recording every call.
///
/// A successful clone creates the destination with an artifact of
/// `cloned_artifact_bytes` bytes at the default artifact path.
#[derive(Debug)]
pub struct FakeGit {
    pub tags: Vec<String>,
    pub cloned_artifact_bytes: usize,
    pub fail_clone: bool,
    pub fail_open: bool,
    pub fail_list_tags: bool,
    pub fail_pull: bool,
    pub fail_checkout: bool,
    pub calls: RefCell<Vec<Call>>,
}

impl Default for FakeGit {
    fn default() -> Self {
        Self {
            tags: Vec::new(),
            cloned_artifact_bytes: 1_500_000,
            fail_clone: false,
            fail_open: false,
            fail_list_tags: false,
            fail_pull: false,
            fail_checkout: false,
            calls: RefCell::new(Vec::new()),
        }
    }
}

impl FakeGit {
    pub fn with_tags(tags: &[&str]) -> Self {
        Self {
            tags: tags.iter().map(|t| t.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn cloned(&self) -> bool {
        self.calls()
            .iter()
            .any(|call| matches!(call, Call::Clone { .. }))
    }

    pub fn checkouts(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Checkout(name) => Some(name),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    fn failure(operation: &str) -> GitError {
        GitError::Failed {
            args: vec![operation.to_string()],
            stderr: format!("simulated {operation} failure"),
        }
    }
}

impl GitBackend for FakeGit {
    fn clone_repo(&self, url: &str, dest: &Path) -> Result<(), GitError> {
        self.record(Call::Clone {
            url: url.to_string(),
            dest: dest.to_path_buf(),
        });
        if self.fail_clone {
            return Err(Self::failure("clone"));
        }
        write_artifact(dest, self.cloned_artifact_bytes);
        Ok(())
    }

    fn open(&self, path: &Path) -> Result<(), GitError> {
        self.record(Call::Open(path.to_path_buf()));
        if self.fail_open {
            return Err(Self::failure("open"));
        }
        Ok(())
    }

    fn list_tags(&self, _path: &Path) -> Result<Vec<String>, GitError> {
        self.record(Call::ListTags);
        if self.fail_list_tags {
            return Err(Self::failure("tag"));
        }
        Ok(self.tags.clone())
    }

    fn pull(&self, _path: &Path) -> Result<(), GitError> {
        self.record(Call::Pull);
        if self.fail_pull {
            return Err(Self::failure("pull"));
        }
        Ok(())
    }

    fn checkout(&self, _path: &Path, name: &str) -> Result<(), GitError> {
        self.record(Call::Checkout(name.to_string()));
        if self.fail_checkout {
            return Err(Self::failure("checkout"));
        }
        Ok(())
    }
}

/// Diagnostics sink keeping every warning for later assertions.
#[derive(Debug, Default)]
pub struct RecordingDiagnostics {
    warnings: RefCell<Vec<(Step, String)>>,
}

impl RecordingDiagnostics {
    pub fn warnings(&self) -> Vec<(Step, String)> {
        self.warnings.borrow().clone()
    }

    pub fn steps(&self) -> Vec<Step> {
        self.warnings().into_iter().map(|(step, _)| step).collect()
    }
}

impl Diagnostics for RecordingDiagnostics {
    fn warn(&self, step: Step, error: &GitError) {
        self.warnings.borrow_mut().push((step, error.to_string()));
    }
}

/// Write an artifact of `len` bytes at the default path under `clone_dir`.
pub fn write_artifact(clone_dir: &Path, len: usize) {
    let path = clone_dir.join(DEFAULT_ARTIFACT_PATH);
    std::fs::create_dir_all(path.parent().expect("artifact has a parent"))
        .expect("Failed to create artifact dir");
    std::fs::write(path, vec![0u8; len]).expect("Failed to write artifact");
}
