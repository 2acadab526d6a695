//! Capability interface over the version-control tool.

use std::path::Path;

use crate::error::GitError;

/// The git operations the resolver relies on.
///
/// Every operation is fallible; whether a failure is fatal is decided by the
/// caller, not the backend.
pub trait GitBackend {
    /// Clone `url` into `dest`, materializing large files.
    fn clone_repo(&self, url: &str, dest: &Path) -> Result<(), GitError>;

    /// Open an existing working copy without modifying it.
    fn open(&self, path: &Path) -> Result<(), GitError>;

    /// Names of all tags in the working copy.
    fn list_tags(&self, path: &Path) -> Result<Vec<String>, GitError>;

    /// Pull from the default remote.
    fn pull(&self, path: &Path) -> Result<(), GitError>;

    /// Check out a branch or tag by name.
    fn checkout(&self, path: &Path, name: &str) -> Result<(), GitError>;
}

impl<T: GitBackend + ?Sized> GitBackend for &T {
    fn clone_repo(&self, url: &str, dest: &Path) -> Result<(), GitError> {
        (**self).clone_repo(url, dest)
    }

    fn open(&self, path: &Path) -> Result<(), GitError> {
        (**self).open(path)
    }

    fn list_tags(&self, path: &Path) -> Result<Vec<String>, GitError> {
        (**self).list_tags(path)
    }

    fn pull(&self, path: &Path) -> Result<(), GitError> {
        (**self).pull(path)
    }

    fn checkout(&self, path: &Path, name: &str) -> Result<(), GitError> {
        (**self).checkout(path, name)
    }
}
