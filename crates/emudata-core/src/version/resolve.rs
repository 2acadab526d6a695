//! Mapping a [`VersionRequest`] onto something `git checkout` accepts.

use serde::Serialize;

use super::VersionRequest;
use crate::error::EmuDataError;

/// What the resolver will check out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "name", rename_all = "lowercase")]
pub enum CheckoutTarget {
    Branch(String),
    Tag(String),
}

impl CheckoutTarget {
    pub fn name(&self) -> &str {
        match self {
            Self::Branch(name) | Self::Tag(name) => name,
        }
    }
}

fn is_version_tag(tag: &str) -> bool {
    tag.to_lowercase().starts_with('v')
}

/// Lower-cased `v*` tags, sorted lexicographically.
///
/// The ordering is plain string ordering, so `v10.0` sorts before `v2.0`.
pub fn available_versions(tags: &[String]) -> Vec<String> {
    let mut versions: Vec<String> = tags
        .iter()
        .filter(|tag| is_version_tag(tag))
        .map(|tag| tag.to_lowercase())
        .collect();
    versions.sort();
    versions.dedup();
    versions
}

/// Resolve `request` against the tags currently present in the clone.
///
/// `Latest` always resolves to `mainline`, whether or not newer tags exist.
/// A tag request resolves to the stored tag name, so `V1.0` checks out `v1.0`.
pub fn resolve(
    request: &VersionRequest,
    tags: &[String],
    mainline: &str,
) -> Result<CheckoutTarget, EmuDataError> {
    let requested = match request {
        VersionRequest::Latest => return Ok(CheckoutTarget::Branch(mainline.to_string())),
        VersionRequest::Tag(tag) => tag,
    };

    let wanted = requested.to_lowercase();
    let mut candidates: Vec<&String> = tags.iter().filter(|tag| is_version_tag(tag)).collect();
    candidates.sort();

    candidates
        .into_iter()
        .find(|tag| tag.to_lowercase() == wanted)
        .map(|tag| CheckoutTarget::Tag(tag.clone()))
        .ok_or_else(|| EmuDataError::VersionNotAvailable {
            requested: requested.clone(),
            available: available_versions(tags),
        })
}
