//! Scope management: per-scope instance caches and their lifecycle.
//!
//! This module contains the ScopeManager that owns the active scopes and
//! the ScopeGuard that ties a scope to a lexical block.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use once_cell::sync::OnceCell;
use parking_lot::Mutex;

use crate::disposal::DisposalReport;
use crate::error::{DiError, DiResult};
use crate::internal::{DisposeBag, Disposer};
use crate::key::Key;
use crate::registration::AnyArc;
use crate::traits::ResolverCore;

use super::Container;

/// Opaque token identifying one scope of a [`Container`].
///
/// Ids are never reused within a container, so a stale id keeps failing
/// with [`DiError::ScopeNotFound`] after its scope is disposed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScopeId(u64);

impl ScopeId {
    /// Numeric value of the id, for logs and correlation.
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ScopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "scope-{}", self.0)
    }
}

/// Cache slot shared by concurrent resolutions of one registration.
type Slot = Arc<OnceCell<AnyArc>>;

#[derive(Default)]
struct ScopeCache {
    // keyed by registration serial
    slots: HashMap<u64, Slot>,
    bag: DisposeBag,
    disposed: bool,
}

/// State of one active scope.
#[derive(Default)]
pub(crate) struct ScopeState {
    cache: Mutex<ScopeCache>,
}

/// Contents of a scope taken out at disposal.
pub(crate) struct ClosedScope {
    pub(crate) bag: DisposeBag,
    /// Dropped after the disposal hooks have run
    pub(crate) instances: Vec<Slot>,
}

impl ScopeState {
    /// The cache slot of a registration, created empty on first use.
    ///
    /// The scope lock only guards the map; the slot is initialized outside
    /// of it so a factory can resolve other scoped services.
    pub(crate) fn slot(&self, serial: u64, id: ScopeId) -> DiResult<Slot> {
        let mut cache = self.cache.lock();
        if cache.disposed {
            return Err(DiError::ScopeNotFound(id));
        }
        Ok(cache.slots.entry(serial).or_default().clone())
    }

    /// Tracks a disposal hook; hands it back if the scope is already closed.
    pub(crate) fn track(&self, service: Key, disposer: Disposer) -> Result<(), Disposer> {
        let mut cache = self.cache.lock();
        if cache.disposed {
            return Err(disposer);
        }
        cache.bag.push(service, disposer);
        Ok(())
    }

    /// Admits a freshly built instance and its hook, if any.
    ///
    /// Fails, handing the hook back, once the scope has been closed so the
    /// instance is never cached in a drained scope.
    pub(crate) fn admit(&self, service: Key, disposer: Option<Disposer>) -> Result<(), Option<Disposer>> {
        let mut cache = self.cache.lock();
        if cache.disposed {
            return Err(disposer);
        }
        if let Some(disposer) = disposer {
            cache.bag.push(service, disposer);
        }
        Ok(())
    }

    pub(crate) fn close(&self) -> ClosedScope {
        let mut cache = self.cache.lock();
        cache.disposed = true;
        ClosedScope {
            bag: cache.bag.take(),
            instances: cache.slots.drain().map(|(_, slot)| slot).collect(),
        }
    }
}

/// Creates and destroys scopes.
///
/// Ids come from a monotonic counter; the map holds only active scopes.
#[derive(Default)]
pub(crate) struct ScopeManager {
    next_id: AtomicU64,
    active: Mutex<HashMap<ScopeId, Arc<ScopeState>>>,
}

impl ScopeManager {
    pub(crate) fn create(&self) -> ScopeId {
        let id = ScopeId(self.next_id.fetch_add(1, Ordering::Relaxed) + 1);
        self.active.lock().insert(id, Arc::new(ScopeState::default()));
        id
    }

    pub(crate) fn get(&self, id: ScopeId) -> DiResult<Arc<ScopeState>> {
        self.active
            .lock()
            .get(&id)
            .cloned()
            .ok_or(DiError::ScopeNotFound(id))
    }

    pub(crate) fn contains(&self, id: ScopeId) -> bool {
        self.active.lock().contains_key(&id)
    }

    /// Removes a scope so no new resolution can reach it.
    pub(crate) fn remove(&self, id: ScopeId) -> Option<Arc<ScopeState>> {
        self.active.lock().remove(&id)
    }

    /// Removes every active scope, oldest first.
    pub(crate) fn drain(&self) -> Vec<(ScopeId, Arc<ScopeState>)> {
        let mut scopes: Vec<_> = self.active.lock().drain().collect();
        scopes.sort_by_key(|(id, _)| *id);
        scopes
    }

    pub(crate) fn ids(&self) -> Vec<ScopeId> {
        let mut ids: Vec<ScopeId> = self.active.lock().keys().copied().collect();
        ids.sort();
        ids
    }

    pub(crate) fn len(&self) -> usize {
        self.active.lock().len()
    }
}

/// A scope that is disposed when the guard goes out of scope.
///
/// Dropping the guard runs the synchronous disposal hooks, on every exit
/// path including unwinding. Call [`dispose_async`](Self::dispose_async) to
/// also run async hooks, or [`dispose`](Self::dispose) to get the report.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use tenure_di::{Container, Lifetime, Resolver};
///
/// struct UnitOfWork;
///
/// let container = Container::new();
/// container.register_factory::<UnitOfWork, _>(Lifetime::Scoped, |_| Ok(UnitOfWork)).unwrap();
///
/// let id = {
///     let scope = container.scope().unwrap();
///     let a = scope.get::<UnitOfWork>().unwrap();
///     let b = scope.get::<UnitOfWork>().unwrap();
///     assert!(Arc::ptr_eq(&a, &b));
///     scope.id()
/// };
///
/// assert!(!container.active_scopes().contains(&id));
/// ```
pub struct ScopeGuard {
    container: Container,
    id: ScopeId,
    disposed: bool,
}

impl ScopeGuard {
    pub(crate) fn new(container: Container, id: ScopeId) -> Self {
        Self {
            container,
            id,
            disposed: false,
        }
    }

    pub fn id(&self) -> ScopeId {
        self.id
    }

    /// Disposes the scope now, running sync hooks only.
    pub fn dispose(mut self) -> DisposalReport {
        self.disposed = true;
        self.container
            .dispose_scope(self.id)
            .unwrap_or_else(|| DisposalReport::for_scope(self.id))
    }

    /// Disposes the scope now, running async hooks then sync hooks.
    pub async fn dispose_async(mut self) -> DisposalReport {
        self.disposed = true;
        self.container
            .dispose_scope_async(self.id)
            .await
            .unwrap_or_else(|| DisposalReport::for_scope(self.id))
    }
}

impl ResolverCore for ScopeGuard {
    fn resolve_any(&self, key: &Key) -> DiResult<Arc<dyn Any + Send + Sync>> {
        self.container.resolve_key(key, Some(self.id))
    }
}

impl Drop for ScopeGuard {
    fn drop(&mut self) {
        if !self.disposed {
            self.container.dispose_scope(self.id);
        }
    }
}

impl fmt::Debug for ScopeGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScopeGuard").field("id", &self.id).finish()
    }
}
