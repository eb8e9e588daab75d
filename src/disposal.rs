//! Disposal reports.
//!
//! Disposal is best-effort: every tracked instance is attempted and each
//! failure is collected here instead of being raised.

use crate::error::BoxError;
use crate::key::Key;
use crate::provider::ScopeId;

/// A disposal hook that failed or panicked.
#[derive(Debug, thiserror::Error)]
#[error("Failed to dispose {service}: {source}")]
pub struct DisposalFailure {
    /// Key of the instance whose hook failed
    pub service: Key,
    /// The error returned by the hook, or [`DisposerPanicked`]
    #[source]
    pub source: BoxError,
}

/// Error recorded when a disposal hook panics.
#[derive(Debug, thiserror::Error)]
#[error("disposer panicked: {0}")]
pub struct DisposerPanicked(pub String);

/// Outcome of disposing one scope, or the container's singletons.
#[derive(Debug, Default)]
pub struct DisposalReport {
    /// The disposed scope; `None` for the container root
    pub scope: Option<ScopeId>,
    /// Hooks that were run
    pub attempted: usize,
    /// Async hooks skipped by a synchronous disposal
    pub skipped_async: usize,
    /// Hooks that returned an error or panicked
    pub failures: Vec<DisposalFailure>,
}

impl DisposalReport {
    pub(crate) fn for_scope(scope: ScopeId) -> Self {
        Self {
            scope: Some(scope),
            ..Self::default()
        }
    }

    /// True when no hook failed and none was skipped.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty() && self.skipped_async == 0
    }
}

/// Outcome of [`Container::shutdown`](crate::Container::shutdown).
#[derive(Debug, Default)]
pub struct ShutdownReport {
    /// One report per scope that was still active
    pub scopes: Vec<DisposalReport>,
    /// Singleton instances and root-level disposers
    pub singletons: DisposalReport,
}

impl ShutdownReport {
    /// Total number of failed hooks across scopes and singletons.
    pub fn failure_count(&self) -> usize {
        self.singletons.failures.len()
            + self.scopes.iter().map(|r| r.failures.len()).sum::<usize>()
    }

    pub fn is_clean(&self) -> bool {
        self.singletons.is_clean() && self.scopes.iter().all(DisposalReport::is_clean)
    }
}
