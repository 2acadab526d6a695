//! End-to-end resolver runs against local git remotes.
//!
//! These tests require git to be installed. The artifact is committed as a
//! regular blob, which stands in for content git-lfs would have materialized.

mod support;

use std::path::{Path, PathBuf};

use tempfile::TempDir;

use emudata_core::diagnostics::Step;
use emudata_core::error::EmuDataError;
use emudata_core::git::{GitCli, RemoteSpec};
use emudata_core::integrity::{ArtifactCheck, DEFAULT_ARTIFACT_PATH};
use emudata_core::resolver::VersionResolver;
use emudata_core::version::VersionRequest;

use support::fake::RecordingDiagnostics;
use support::git::{commit_all, file_url, init_repo, run_git, write_file};

/// Remote named `21cmEMU` with `v1.0` and `v2.0` tags on `main`.
fn init_remote(root: &Path, artifact_bytes: usize) -> PathBuf {
    let remote = root.join("remote").join("21cmEMU");
    init_repo(&remote);
    write_file(&remote, DEFAULT_ARTIFACT_PATH, &vec![7u8; artifact_bytes]);
    write_file(&remote, "VERSION", b"1.0");
    commit_all(&remote, "first release");
    run_git(&remote, &["tag", "v1.0"]);
    write_file(&remote, "VERSION", b"2.0");
    commit_all(&remote, "second release");
    run_git(&remote, &["tag", "v2.0"]);
    remote
}

fn resolver_for<'a>(
    remote: &Path,
    diagnostics: &'a RecordingDiagnostics,
) -> VersionResolver<GitCli, &'a RecordingDiagnostics> {
    VersionResolver::with_backend(
        GitCli::new(),
        diagnostics,
        RemoteSpec::new(file_url(remote)),
        ArtifactCheck::default(),
    )
}

fn checked_out_version(data_path: &Path) -> String {
    std::fs::read_to_string(data_path.join("21cmEMU").join("VERSION")).unwrap()
}

#[test]
fn fetch_latest_then_pin_and_return_to_latest() {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let remote = init_remote(temp.path(), 1_000_001);
    let data_path = temp.path().join("data");
    let diagnostics = RecordingDiagnostics::default();
    let resolver = resolver_for(&remote, &diagnostics);

    let first = resolver
        .ensure_and_select_version(&data_path, &VersionRequest::Latest)
        .unwrap();
    assert!(first.cloned);
    assert!(first.pull.is_done());
    assert_eq!(first.available_versions, vec!["v1.0", "v2.0"]);
    assert_eq!(checked_out_version(&data_path), "2.0");

    let pinned = resolver
        .ensure_and_select_version(&data_path, &"V1.0".into())
        .unwrap();
    assert!(!pinned.cloned);
    assert!(pinned.checkout.is_done());
    assert_eq!(checked_out_version(&data_path), "1.0");

    // Detached at a tag, so the pull is skipped while the checkout still runs.
    let latest = resolver
        .ensure_and_select_version(&data_path, &VersionRequest::Latest)
        .unwrap();
    assert!(!latest.pull.is_done());
    assert!(latest.checkout.is_done());
    assert_eq!(checked_out_version(&data_path), "2.0");
    assert_eq!(diagnostics.steps(), vec![Step::Pull]);
}

#[test]
fn new_remote_tags_become_available_after_pull() {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let remote = init_remote(temp.path(), 1_000_001);
    let data_path = temp.path().join("data");
    let diagnostics = RecordingDiagnostics::default();
    let resolver = resolver_for(&remote, &diagnostics);

    resolver
        .ensure_and_select_version(&data_path, &VersionRequest::Latest)
        .unwrap();

    write_file(&remote, "VERSION", b"3.0");
    commit_all(&remote, "third release");
    run_git(&remote, &["tag", "v3.0"]);

    let report = resolver
        .ensure_and_select_version(&data_path, &"v3.0".into())
        .unwrap();

    assert!(report.available_versions.contains(&"v3.0".to_string()));
    assert_eq!(checked_out_version(&data_path), "3.0");
}

#[test]
fn unknown_version_fails_after_clone() {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let remote = init_remote(temp.path(), 1_000_001);
    let data_path = temp.path().join("data");
    let diagnostics = RecordingDiagnostics::default();

    let err = resolver_for(&remote, &diagnostics)
        .ensure_and_select_version(&data_path, &"v3.0".into())
        .unwrap_err();

    assert!(err.to_string().contains(r#"["v1.0", "v2.0"]"#));
    assert!(data_path.join("21cmEMU").exists());
}

#[test]
fn pointer_stub_clone_is_rejected() {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let remote = init_remote(temp.path(), 130);
    let data_path = temp.path().join("data");
    let diagnostics = RecordingDiagnostics::default();

    let err = resolver_for(&remote, &diagnostics)
        .ensure_and_select_version(&data_path, &VersionRequest::Latest)
        .unwrap_err();

    assert!(matches!(err, EmuDataError::Integrity { size: 130, .. }));
}

#[test]
fn unreachable_remote_fails_to_clone() {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let missing = temp.path().join("remote").join("21cmEMU");
    let diagnostics = RecordingDiagnostics::default();

    let err = resolver_for(&missing, &diagnostics)
        .ensure_and_select_version(&temp.path().join("data"), &VersionRequest::Latest)
        .unwrap_err();

    assert!(matches!(err, EmuDataError::Clone { .. }));
}

#[cfg(unix)]
#[test]
fn clones_into_non_utf8_data_dir() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let temp = TempDir::new().expect("Failed to create temp dir");
    let remote = init_remote(temp.path(), 1_000_001);
    let data_path = temp.path().join(OsStr::from_bytes(b"data\xff"));
    let diagnostics = RecordingDiagnostics::default();

    let report = resolver_for(&remote, &diagnostics)
        .ensure_and_select_version(&data_path, &VersionRequest::Latest)
        .unwrap();

    assert!(report.cloned);
    assert_eq!(report.clone_dir, data_path.join("21cmEMU"));
    assert_eq!(checked_out_version(&data_path), "2.0");

    let mut entries: Vec<_> = std::fs::read_dir(temp.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name())
        .collect();
    entries.sort();
    assert_eq!(
        entries,
        vec![
            OsStr::from_bytes(b"data\xff").to_os_string(),
            OsStr::new("remote").to_os_string(),
        ]
    );
}
