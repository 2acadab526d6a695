//! Git backend driving the `git` binary, with libgit2 for read-only queries.

use std::ffi::OsStr;
use std::path::Path;
use std::process::Command;

use git2::Repository;

use super::GitBackend;
use crate::error::GitError;

/// Variables that would redirect git away from the working copy we pass in.
const GIT_ENV_OVERRIDES: [&str; 4] = [
    "GIT_DIR",
    "GIT_WORK_TREE",
    "GIT_INDEX_FILE",
    "GIT_COMMON_DIR",
];

/// Production [`GitBackend`].
///
/// Clone, pull and checkout go through the `git` binary so that the git-lfs
/// filters installed on the machine run. Opening and tag listing use `git2`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GitCli;

impl GitCli {
    pub fn new() -> Self {
        Self
    }

    /// Ensure a usable `git` binary is on the PATH.
    pub fn ensure_git_version() -> anyhow::Result<()> {
        let output = Self::command()
            .arg("--version")
            .output()
            .map_err(|e| anyhow::anyhow!("Failed to invoke git --version: {}. Is git installed?", e))?;
        if !output.status.success() {
            anyhow::bail!("Failed to run git --version");
        }
        let stdout = String::from_utf8_lossy(&output.stdout);
        let version = stdout
            .split_whitespace()
            .nth(2)
            .ok_or_else(|| anyhow::anyhow!("Unexpected git version output: {}", stdout))?;
        let major: u32 = version
            .split('.')
            .next()
            .and_then(|part| part.parse().ok())
            .ok_or_else(|| anyhow::anyhow!("Invalid git version: {}", version))?;
        if major < 2 {
            anyhow::bail!("Git 2.0+ is required, found {}. Please upgrade git.", version);
        }
        Ok(())
    }

    /// Whether the git-lfs extension is installed.
    pub fn lfs_available() -> bool {
        Self::command()
            .args(["lfs", "version"])
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
    }

    fn command() -> Command {
        let mut cmd = Command::new("git");
        for key in GIT_ENV_OVERRIDES {
            cmd.env_remove(key);
        }
        cmd
    }

    /// Run a git command.
    fn run_git<I, S>(cwd: Option<&Path>, args: I) -> Result<(), GitError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let mut cmd = Self::command();
        let args: Vec<S> = args.into_iter().collect();
        cmd.args(&args);
        if let Some(dir) = cwd {
            cmd.current_dir(dir);
        }
        // Lossy rendering is for messages only; git receives the raw bytes.
        let display_args: Vec<String> = args
            .iter()
            .map(|a| a.as_ref().to_string_lossy().into_owned())
            .collect();
        tracing::debug!(args = ?display_args, "Running git");
        let output = cmd.output().map_err(|source| GitError::Spawn {
            args: display_args.clone(),
            source,
        })?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(GitError::Failed {
                args: display_args,
                stderr: stderr.trim().to_string(),
            });
        }
        Ok(())
    }
}

impl GitBackend for GitCli {
    fn clone_repo(&self, url: &str, dest: &Path) -> Result<(), GitError> {
        let args = [
            OsStr::new("clone"),
            OsStr::new("-v"),
            OsStr::new("--"),
            OsStr::new(url),
            dest.as_os_str(),
        ];
        Self::run_git(None, args)
    }

    fn open(&self, path: &Path) -> Result<(), GitError> {
        Repository::open(path)?;
        Ok(())
    }

    fn list_tags(&self, path: &Path) -> Result<Vec<String>, GitError> {
        let repo = Repository::open(path)?;
        let names = repo.tag_names(None)?;
        Ok(names.iter().flatten().map(str::to_string).collect())
    }

    fn pull(&self, path: &Path) -> Result<(), GitError> {
        Self::run_git(Some(path), ["pull", "--ff-only", "origin"])
    }

    fn checkout(&self, path: &Path, name: &str) -> Result<(), GitError> {
        // Trailing `--` keeps a same-named file in the working tree from
        // turning the ref into a pathspec.
        Self::run_git(Some(path), ["checkout", name, "--"])
    }
}
