//! Sink for warnings raised by best-effort steps.

use std::fmt;

use serde::Serialize;

use crate::error::GitError;

/// A step whose failure is reported and then skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Pull,
    ListTags,
    Checkout,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Step::Pull => "pulling",
            Step::ListTags => "tag listing",
            Step::Checkout => "version checkout",
        };
        f.write_str(name)
    }
}

/// Receives the errors of skipped steps.
pub trait Diagnostics {
    fn warn(&self, step: Step, error: &GitError);
}

impl<T: Diagnostics + ?Sized> Diagnostics for &T {
    fn warn(&self, step: Step, error: &GitError) {
        (**self).warn(step, error)
    }
}

/// Emits each warning as a `tracing` event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn warn(&self, step: Step, error: &GitError) {
        tracing::warn!(%step, %error, "Skipping the {} step...", step);
    }
}
