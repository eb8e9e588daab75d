//! Internal disposal bag: the best-effort disposal coordinator.

use std::any::Any;
use std::future::Future;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::pin::Pin;
use std::sync::Arc;

use futures::FutureExt;
use tracing::warn;

use crate::disposal::{DisposalFailure, DisposalReport, DisposerPanicked};
use crate::key::Key;
use crate::traits::{AsyncDispose, Dispose, DisposeResult};

/// Future type for async disposal operations.
pub(crate) type BoxFutureDispose = Pin<Box<dyn Future<Output = DisposeResult> + Send>>;

/// A disposal hook bound to one materialized instance.
pub(crate) enum Disposer {
    Sync(Box<dyn FnOnce() -> DisposeResult + Send>),
    Async(Box<dyn FnOnce() -> BoxFutureDispose + Send>),
}

impl Disposer {
    pub(crate) fn sync<T: ?Sized + Dispose>(service: Arc<T>) -> Self {
        Disposer::Sync(Box::new(move || service.dispose()))
    }

    pub(crate) fn asynchronous<T: ?Sized + AsyncDispose>(service: Arc<T>) -> Self {
        Disposer::Async(Box::new(move || -> BoxFutureDispose {
            Box::pin(async move { service.dispose().await })
        }))
    }
}

struct Tracked {
    service: Key,
    disposer: Disposer,
}

/// Disposal hooks in creation order.
///
/// Running the bag attempts every hook: async hooks first, then sync hooks,
/// each in reverse creation order (LIFO). Failures and panics are recorded
/// in the report and never stop the remaining hooks.
#[derive(Default)]
pub(crate) struct DisposeBag {
    entries: Vec<Tracked>,
}

impl DisposeBag {
    pub(crate) fn push(&mut self, service: Key, disposer: Disposer) {
        self.entries.push(Tracked { service, disposer });
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Takes the hooks out, leaving an empty bag behind.
    pub(crate) fn take(&mut self) -> DisposeBag {
        std::mem::take(self)
    }

    /// Runs the sync hooks; async hooks are skipped and counted.
    pub(crate) fn run_sync(self, report: &mut DisposalReport) {
        let mut sync = Vec::new();
        for tracked in self.entries.into_iter().rev() {
            match tracked.disposer {
                Disposer::Sync(f) => sync.push((tracked.service, f)),
                Disposer::Async(_) => {
                    warn!(service = %tracked.service, "Async disposer skipped by synchronous disposal");
                    report.skipped_async += 1;
                }
            }
        }
        run_sync_hooks(sync, report);
    }

    /// Runs every hook, awaiting the async ones.
    pub(crate) async fn run_async(self, report: &mut DisposalReport) {
        let mut sync = Vec::new();
        let mut asyncs = Vec::new();
        for tracked in self.entries.into_iter().rev() {
            match tracked.disposer {
                Disposer::Sync(f) => sync.push((tracked.service, f)),
                Disposer::Async(f) => asyncs.push((tracked.service, f)),
            }
        }

        for (service, f) in asyncs {
            report.attempted += 1;
            match AssertUnwindSafe(async move { f().await }).catch_unwind().await {
                Ok(Ok(())) => {}
                Ok(Err(source)) => record_failure(report, service, source),
                Err(payload) => record_panic(report, service, payload),
            }
        }
        run_sync_hooks(sync, report);
    }
}

fn run_sync_hooks(
    hooks: Vec<(Key, Box<dyn FnOnce() -> DisposeResult + Send>)>,
    report: &mut DisposalReport,
) {
    for (service, f) in hooks {
        report.attempted += 1;
        match catch_unwind(AssertUnwindSafe(f)) {
            Ok(Ok(())) => {}
            Ok(Err(source)) => record_failure(report, service, source),
            Err(payload) => record_panic(report, service, payload),
        }
    }
}

fn record_failure(report: &mut DisposalReport, service: Key, source: crate::error::BoxError) {
    warn!(service = %service, error = %source, "Disposer failed");
    report.failures.push(DisposalFailure { service, source });
}

fn record_panic(report: &mut DisposalReport, service: Key, payload: Box<dyn Any + Send>) {
    let panicked = DisposerPanicked(panic_message(payload.as_ref()));
    record_failure(report, service, Box::new(panicked));
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&'static str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
