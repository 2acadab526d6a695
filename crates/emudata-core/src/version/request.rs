use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Sentinel selecting the tip of the mainline branch.
pub const LATEST: &str = "latest";

/// Which version of the data the caller wants checked out.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum VersionRequest {
    /// Tip of the mainline branch
    #[default]
    Latest,
    /// A tag, matched case-insensitively
    Tag(String),
}

impl VersionRequest {
    pub fn is_latest(&self) -> bool {
        matches!(self, Self::Latest)
    }
}

impl From<&str> for VersionRequest {
    /// Only the exact string `latest` is the sentinel; `Latest` or `LATEST`
    /// are treated as tag names.
    fn from(raw: &str) -> Self {
        if raw == LATEST {
            Self::Latest
        } else {
            Self::Tag(raw.to_string())
        }
    }
}

impl From<String> for VersionRequest {
    fn from(raw: String) -> Self {
        if raw == LATEST {
            Self::Latest
        } else {
            Self::Tag(raw)
        }
    }
}

impl From<VersionRequest> for String {
    fn from(request: VersionRequest) -> Self {
        match request {
            VersionRequest::Latest => LATEST.to_string(),
            VersionRequest::Tag(tag) => tag,
        }
    }
}

impl FromStr for VersionRequest {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl fmt::Display for VersionRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Latest => f.write_str(LATEST),
            Self::Tag(tag) => f.write_str(tag),
        }
    }
}
