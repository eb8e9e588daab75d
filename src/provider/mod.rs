//! The service container.
//!
//! This module contains the Container type: registration, resolution by
//! lifetime, scope management and shutdown.

use std::any::{type_name, Any};
use std::fmt;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use once_cell::sync::OnceCell;
use parking_lot::{Mutex, RwLock};
use tracing::{debug, debug_span, info, warn};

use crate::config::ContainerConfig;
use crate::descriptors::ServiceDescriptor;
use crate::disposal::{DisposalReport, ShutdownReport};
use crate::error::{DiError, DiResult};
use crate::internal::{DisposeBag, Disposer, InitGraph, ResolutionChain, SlotId};
use crate::key::{key_of_named, key_of_type, Key};
use crate::lifetime::Lifetime;
use crate::registration::{
    track_async, track_sync, AnyArc, Ctor, Policy, Registration, Registry, TrackFn,
};
use crate::traits::{downcast, downcast_trait, AsyncDispose, Dispose, ResolverCore};

pub mod context;
pub mod scope;

pub use context::ResolverContext;
pub use scope::{ScopeGuard, ScopeId};
use scope::{ClosedScope, ScopeManager};

/// Service container with lifetime policies and deterministic teardown.
///
/// Recipes are registered once at startup. Each unit of work then creates a
/// scope, resolves what it needs, and disposes the scope:
///
/// - **Singleton**: built on first resolution, shared by every scope and
///   thread, disposed at [`shutdown`](Self::shutdown)
/// - **Scoped**: built once per scope, disposed with the scope
/// - **Transient**: built on every resolution, never cached
///
/// # Thread Safety
///
/// `Container` is a cheap handle over shared state: clones see the same
/// registrations, singletons and scopes. Registration takes a write lock
/// that is never held while a factory runs. Concurrent first resolutions of
/// a singleton (or of a scoped service within one scope) run its factory at
/// most once.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use tenure_di::{Container, Lifetime, Resolver};
///
/// struct Database { url: String }
/// struct Repository { db: Arc<Database> }
///
/// let container = Container::new();
/// container.register_singleton(Database { url: "postgres://localhost".to_string() }).unwrap();
/// container.register_factory::<Repository, _>(Lifetime::Scoped, |ctx| {
///     Ok(Repository { db: ctx.get::<Database>()? })
/// }).unwrap();
///
/// let scope = container.create_scope().unwrap();
/// let repo = container.resolve::<Repository>(Some(scope)).unwrap();
/// assert_eq!(repo.db.url, "postgres://localhost");
///
/// container.dispose_scope(scope);
/// let report = container.shutdown();
/// assert!(report.is_clean());
/// ```
#[derive(Clone)]
pub struct Container {
    inner: Arc<ContainerInner>,
}

pub(crate) struct ContainerInner {
    config: ContainerConfig,
    registry: RwLock<Registry>,
    scopes: ScopeManager,
    // disposal hooks of singletons and of what they own
    root_disposers: Mutex<DisposeBag>,
    // cached slots under construction, across threads
    inits: InitGraph,
    shut_down: AtomicBool,
}

impl Container {
    /// Creates an empty container with the default configuration.
    pub fn new() -> Self {
        Self::with_config(ContainerConfig::default())
    }

    pub fn with_config(config: ContainerConfig) -> Self {
        Self {
            inner: Arc::new(ContainerInner {
                config,
                registry: RwLock::new(Registry::default()),
                scopes: ScopeManager::default(),
                root_disposers: Mutex::new(DisposeBag::default()),
                inits: InitGraph::default(),
                shut_down: AtomicBool::new(false),
            }),
        }
    }

    pub fn config(&self) -> &ContainerConfig {
        &self.inner.config
    }

    pub fn is_shut_down(&self) -> bool {
        self.inner.shut_down.load(Ordering::Acquire)
    }

    fn ensure_running(&self) -> DiResult<()> {
        if self.is_shut_down() {
            Err(DiError::ShutDown)
        } else {
            Ok(())
        }
    }

    // ----- Registration -----

    /// Registers a pre-built singleton instance.
    ///
    /// Fails with [`DiError::AlreadyRegistered`] if `T` is already
    /// registered; the existing registration is left untouched.
    pub fn register_singleton<T: Send + Sync + 'static>(&self, instance: T) -> DiResult<()> {
        let key = key_of_type::<T>();
        self.insert(Registration::prebuilt(key, Arc::new(instance), type_name::<T>()))
            .map(|_| ())
    }

    /// Registers a pre-built singleton instance under `name`.
    pub fn register_named_singleton<T: Send + Sync + 'static>(
        &self,
        name: &'static str,
        instance: T,
    ) -> DiResult<()> {
        let key = named_key::<T>(name)?;
        self.insert(Registration::prebuilt(key, Arc::new(instance), type_name::<T>()))
            .map(|_| ())
    }

    /// Registers a pre-built trait object as a singleton.
    ///
    /// ```
    /// use std::sync::Arc;
    /// use tenure_di::{Container, Resolver};
    ///
    /// trait Greeter: Send + Sync {
    ///     fn greet(&self) -> String;
    /// }
    ///
    /// struct English;
    /// impl Greeter for English {
    ///     fn greet(&self) -> String { "hello".to_string() }
    /// }
    ///
    /// let container = Container::new();
    /// container.register_singleton_trait(Arc::new(English) as Arc<dyn Greeter>).unwrap();
    ///
    /// let greeter = container.resolve_trait::<dyn Greeter>(None).unwrap();
    /// assert_eq!(greeter.greet(), "hello");
    /// ```
    pub fn register_singleton_trait<T: ?Sized + Send + Sync + 'static>(
        &self,
        instance: Arc<T>,
    ) -> DiResult<()> {
        let key = key_of_type::<T>();
        self.insert(Registration::prebuilt(key, Arc::new(instance), type_name::<T>()))
            .map(|_| ())
    }

    /// Registers a pre-built singleton whose [`Dispose`] hook runs at
    /// shutdown.
    pub fn register_disposable_singleton<T: Dispose>(&self, instance: T) -> DiResult<()> {
        let key = key_of_type::<T>();
        let instance: AnyArc = Arc::new(instance);
        let registration = Registration::prebuilt(key, instance.clone(), type_name::<T>())
            .with_tracking(track_sync::<T>);
        let registration = self.insert(registration)?;
        self.track_instance(&registration, None, &instance);
        Ok(())
    }

    /// Registers a factory for `T` with the given lifetime.
    ///
    /// The factory receives a [`ResolverContext`] for its own dependencies
    /// and may fail; an application error is best wrapped with
    /// [`DiError::factory`]. Nothing is cached when it fails.
    pub fn register_factory<T, F>(&self, lifetime: Lifetime, factory: F) -> DiResult<()>
    where
        T: Send + Sync + 'static,
        F: Fn(&ResolverContext<'_>) -> DiResult<T> + Send + Sync + 'static,
    {
        let key = key_of_type::<T>();
        self.insert(Registration::new(key, lifetime, erase(factory), type_name::<T>()))
            .map(|_| ())
    }

    /// Registers a factory for `T` under `name`.
    ///
    /// ```
    /// use tenure_di::{Container, Lifetime};
    ///
    /// struct Pool { size: usize }
    ///
    /// let container = Container::new();
    /// container.register_named_factory::<Pool, _>("reads", Lifetime::Singleton, |_| Ok(Pool { size: 16 })).unwrap();
    /// container.register_named_factory::<Pool, _>("writes", Lifetime::Singleton, |_| Ok(Pool { size: 4 })).unwrap();
    ///
    /// assert_eq!(container.resolve_named::<Pool>("reads", None).unwrap().size, 16);
    /// assert_eq!(container.resolve_named::<Pool>("writes", None).unwrap().size, 4);
    /// assert!(container.resolve::<Pool>(None).is_err());
    /// ```
    pub fn register_named_factory<T, F>(
        &self,
        name: &'static str,
        lifetime: Lifetime,
        factory: F,
    ) -> DiResult<()>
    where
        T: Send + Sync + 'static,
        F: Fn(&ResolverContext<'_>) -> DiResult<T> + Send + Sync + 'static,
    {
        let key = named_key::<T>(name)?;
        self.insert(Registration::new(key, lifetime, erase(factory), type_name::<T>()))
            .map(|_| ())
    }

    /// Registers a factory producing a trait object.
    pub fn register_trait_factory<T, F>(&self, lifetime: Lifetime, factory: F) -> DiResult<()>
    where
        T: ?Sized + Send + Sync + 'static,
        F: Fn(&ResolverContext<'_>) -> DiResult<Arc<T>> + Send + Sync + 'static,
    {
        let ctor: Ctor = Arc::new(move |ctx: &ResolverContext<'_>| {
            factory(ctx).map(|value| Arc::new(value) as AnyArc)
        });
        self.insert(Registration::new(key_of_type::<T>(), lifetime, ctor, type_name::<T>()))
            .map(|_| ())
    }

    /// Registers a factory whose instances are tracked for [`Dispose`].
    ///
    /// Scoped and transient instances are disposed with their scope,
    /// singletons at shutdown. A transient resolved without a scope fails
    /// with [`DiError::MissingScope`] unless a singleton's factory asks for
    /// it; the singleton then owns it until shutdown.
    pub fn register_disposable_factory<T, F>(&self, lifetime: Lifetime, factory: F) -> DiResult<()>
    where
        T: Dispose,
        F: Fn(&ResolverContext<'_>) -> DiResult<T> + Send + Sync + 'static,
    {
        self.register_tracked(key_of_type::<T>(), lifetime, erase(factory), track_sync::<T>)
    }

    /// Registers a factory whose instances are tracked for [`AsyncDispose`].
    ///
    /// The hooks only run from the `*_async` disposal methods.
    pub fn register_async_disposable_factory<T, F>(
        &self,
        lifetime: Lifetime,
        factory: F,
    ) -> DiResult<()>
    where
        T: AsyncDispose,
        F: Fn(&ResolverContext<'_>) -> DiResult<T> + Send + Sync + 'static,
    {
        self.register_tracked(key_of_type::<T>(), lifetime, erase(factory), track_async::<T>)
    }

    fn register_tracked(
        &self,
        key: Key,
        lifetime: Lifetime,
        ctor: Ctor,
        track: TrackFn,
    ) -> DiResult<()> {
        let registration =
            Registration::new(key, lifetime, ctor, key.display_name()).with_tracking(track);
        self.insert(registration).map(|_| ())
    }

    fn insert(&self, registration: Registration) -> DiResult<Arc<Registration>> {
        self.ensure_running()?;
        let registration = self.inner.registry.write().insert(registration)?;
        debug!(
            service = %registration.key,
            lifetime = %registration.lifetime(),
            "Service registered"
        );
        Ok(registration)
    }

    /// Removes the registration for `key`.
    ///
    /// Instances that were already built are not disposed here: scoped ones
    /// go with their scope and tracked singletons at shutdown.
    pub fn unregister(&self, key: &Key) -> bool {
        let removed = self.inner.registry.write().remove(key).is_some();
        if removed {
            debug!(service = %key, "Service unregistered");
        }
        removed
    }

    pub fn is_registered(&self, key: &Key) -> bool {
        self.inner.registry.read().contains(key)
    }

    pub fn get_lifetime(&self, key: &Key) -> Option<Lifetime> {
        self.inner
            .registry
            .read()
            .get(key)
            .map(|registration| registration.lifetime())
    }

    // ----- Resolution -----

    /// Resolves `T`, using `scope` for scoped services.
    pub fn resolve<T: Send + Sync + 'static>(&self, scope: Option<ScopeId>) -> DiResult<Arc<T>> {
        downcast(self.resolve_key(&key_of_type::<T>(), scope)?)
    }

    /// Resolves the registration of `T` under `name`.
    pub fn resolve_named<T: Send + Sync + 'static>(
        &self,
        name: &'static str,
        scope: Option<ScopeId>,
    ) -> DiResult<Arc<T>> {
        downcast(self.resolve_key(&key_of_named::<T>(name), scope)?)
    }

    /// Resolves a trait-object registration.
    pub fn resolve_trait<T: ?Sized + Send + Sync + 'static>(
        &self,
        scope: Option<ScopeId>,
    ) -> DiResult<Arc<T>> {
        downcast_trait(self.resolve_key(&key_of_type::<T>(), scope)?)
    }

    /// Resolves any registration by key, type-erased.
    ///
    /// An explicit `scope` must be active even when the service itself is
    /// not scoped.
    pub fn resolve_key(
        &self,
        key: &Key,
        scope: Option<ScopeId>,
    ) -> DiResult<Arc<dyn Any + Send + Sync>> {
        self.ensure_running()?;
        if let Some(id) = scope {
            if !self.inner.scopes.contains(id) {
                return Err(DiError::ScopeNotFound(id));
            }
        }
        self.resolve_in(key, scope, None)
    }

    pub(crate) fn resolve_in(
        &self,
        key: &Key,
        scope: Option<ScopeId>,
        parent: Option<&ResolutionChain<'_>>,
    ) -> DiResult<AnyArc> {
        self.ensure_running()?;
        let registration = self.registration(key)?;
        let frame = ResolutionChain::enter(
            parent,
            *key,
            registration.lifetime(),
            self.inner.config.max_depth,
        )?;
        let _span = debug_span!("resolve", service = %key, depth = frame.depth()).entered();

        match &registration.policy {
            Policy::Singleton(slot) => self.init_once(slot, (*key, None), &frame, || {
                // singletons never see an ambient scope
                let instance = self.construct(&registration, None, &frame)?;
                debug!(service = %key, "Singleton materialized");
                self.track_instance(&registration, None, &instance);
                Ok(instance)
            }),
            Policy::Scoped => {
                let id = scope.ok_or(DiError::MissingScope(*key))?;
                let state = self.inner.scopes.get(id)?;
                let slot = state.slot(registration.serial, id)?;
                self.init_once(&slot, (*key, Some(id)), &frame, || {
                    let instance = self.construct(&registration, Some(id), &frame)?;
                    let disposer = registration.track.and_then(|track| track(&instance));
                    if let Err(rejected) = state.admit(*key, disposer) {
                        // the scope closed while the factory ran
                        if let Some(disposer) = rejected {
                            dispose_rejected(*key, disposer);
                        }
                        return Err(DiError::ScopeNotFound(id));
                    }
                    debug!(service = %key, scope = %id, "Scoped instance materialized");
                    Ok(instance)
                })
            }
            Policy::Transient => {
                // root-tracked hooks live until shutdown; only a singleton
                // under construction may own an unscoped disposable
                if scope.is_none() && registration.track.is_some() && !frame.within_singleton() {
                    return Err(DiError::MissingScope(*key));
                }
                let instance = self.construct(&registration, scope, &frame)?;
                self.track_instance(&registration, scope, &instance);
                Ok(instance)
            }
        }
    }

    /// Reads a cached slot, building it at most once.
    ///
    /// Waiting on a slot another thread is building goes through the shared
    /// wait-for graph, so cycles spanning threads fail instead of blocking.
    fn init_once(
        &self,
        slot: &OnceCell<AnyArc>,
        id: SlotId,
        frame: &ResolutionChain<'_>,
        init: impl FnOnce() -> DiResult<AnyArc>,
    ) -> DiResult<AnyArc> {
        let claim = loop {
            if let Some(instance) = slot.get() {
                return Ok(instance.clone());
            }
            if let Some(claim) = self.inner.inits.claim(id, frame)? {
                break claim;
            }
        };
        let instance = slot.get_or_try_init(init).cloned();
        drop(claim);
        instance
    }

    fn registration(&self, key: &Key) -> DiResult<Arc<Registration>> {
        let registry = self.inner.registry.read();
        registry.get(key).ok_or_else(|| DiError::ServiceNotFound {
            service: *key,
            registered: registry.keys(),
        })
    }

    fn construct(
        &self,
        registration: &Registration,
        scope: Option<ScopeId>,
        chain: &ResolutionChain<'_>,
    ) -> DiResult<AnyArc> {
        let ctx = ResolverContext::new(self, scope, chain);
        (registration.ctor)(&ctx)
    }

    fn track_instance(&self, registration: &Registration, scope: Option<ScopeId>, instance: &AnyArc) {
        if let Some(disposer) = registration.track.and_then(|track| track(instance)) {
            self.track(scope, registration.key, disposer);
        }
    }

    /// Attaches a disposal hook to `scope`, or to the root when `None`.
    ///
    /// A hook that arrives after its scope (or the container) is gone runs
    /// immediately.
    pub(crate) fn track(&self, scope: Option<ScopeId>, service: Key, disposer: Disposer) {
        let rejected = match scope {
            Some(id) => match self.inner.scopes.get(id) {
                Ok(state) => state.track(service, disposer).err(),
                Err(_) => Some(disposer),
            },
            None if self.is_shut_down() => Some(disposer),
            None => {
                self.inner.root_disposers.lock().push(service, disposer);
                None
            }
        };

        if let Some(disposer) = rejected {
            dispose_rejected(service, disposer);
        }
    }

    // ----- Scopes -----

    /// Creates an empty scope.
    pub fn create_scope(&self) -> DiResult<ScopeId> {
        self.ensure_running()?;
        let id = self.inner.scopes.create();
        if self.is_shut_down() {
            // lost the race with shutdown
            self.inner.scopes.remove(id);
            return Err(DiError::ShutDown);
        }
        debug!(scope = %id, "Scope created");
        Ok(id)
    }

    /// Creates a scope that is disposed when the returned guard drops.
    pub fn scope(&self) -> DiResult<ScopeGuard> {
        Ok(ScopeGuard::new(self.clone(), self.create_scope()?))
    }

    /// Runs `f` inside a fresh scope and disposes the scope afterwards.
    ///
    /// ```
    /// use tenure_di::{Container, Lifetime, Resolver};
    ///
    /// struct Transaction { id: u32 }
    ///
    /// let container = Container::new();
    /// container.register_factory::<Transaction, _>(Lifetime::Scoped, |_| Ok(Transaction { id: 1 })).unwrap();
    ///
    /// let id = container.with_scope(|scope| scope.get::<Transaction>().map(|tx| tx.id)).unwrap().unwrap();
    /// assert_eq!(id, 1);
    /// assert_eq!(container.scope_count(), 0);
    /// ```
    pub fn with_scope<R>(&self, f: impl FnOnce(&ScopeGuard) -> R) -> DiResult<R> {
        let guard = self.scope()?;
        Ok(f(&guard))
    }

    /// Async counterpart of [`with_scope`](Self::with_scope); the scope is
    /// disposed with async hooks once the future completes.
    pub async fn with_scope_async<F, Fut, R>(&self, f: F) -> DiResult<R>
    where
        F: FnOnce(ScopeId) -> Fut,
        Fut: Future<Output = R>,
    {
        let guard = self.scope()?;
        let result = f(guard.id()).await;
        guard.dispose_async().await;
        Ok(result)
    }

    /// Disposes a scope, running its sync disposal hooks last-created-first.
    ///
    /// Hook failures are collected in the report; the scope is removed
    /// either way. An unknown or already disposed scope is a logged no-op
    /// returning `None`.
    pub fn dispose_scope(&self, scope: ScopeId) -> Option<DisposalReport> {
        let Some(state) = self.inner.scopes.remove(scope) else {
            warn!(scope = %scope, "Dispose of unknown or already disposed scope ignored");
            return None;
        };
        Some(dispose_closed(scope, state.close()))
    }

    /// Disposes a scope, running async hooks then sync hooks.
    pub async fn dispose_scope_async(&self, scope: ScopeId) -> Option<DisposalReport> {
        let Some(state) = self.inner.scopes.remove(scope) else {
            warn!(scope = %scope, "Dispose of unknown or already disposed scope ignored");
            return None;
        };
        Some(dispose_closed_async(scope, state.close()).await)
    }

    /// Disposes every active scope, oldest first.
    pub fn dispose_all_scopes(&self) -> Vec<DisposalReport> {
        self.inner
            .scopes
            .drain()
            .into_iter()
            .map(|(id, state)| dispose_closed(id, state.close()))
            .collect()
    }

    pub async fn dispose_all_scopes_async(&self) -> Vec<DisposalReport> {
        let mut reports = Vec::new();
        for (id, state) in self.inner.scopes.drain() {
            reports.push(dispose_closed_async(id, state.close()).await);
        }
        reports
    }

    // ----- Shutdown -----

    /// Disposes every active scope, then the singletons (last materialized
    /// first), then drops all registrations.
    ///
    /// Afterwards every operation fails with [`DiError::ShutDown`]. Calling
    /// it again returns an empty report.
    pub fn shutdown(&self) -> ShutdownReport {
        let Some(scopes) = self.begin_shutdown() else {
            return ShutdownReport::default();
        };

        let mut report = ShutdownReport::default();
        for (id, state) in scopes {
            report.scopes.push(dispose_closed(id, state.close()));
        }
        let root = self.inner.root_disposers.lock().take();
        root.run_sync(&mut report.singletons);
        self.finish_shutdown(&report);
        report
    }

    /// Async counterpart of [`shutdown`](Self::shutdown) that also runs
    /// [`AsyncDispose`] hooks.
    pub async fn shutdown_async(&self) -> ShutdownReport {
        let Some(scopes) = self.begin_shutdown() else {
            return ShutdownReport::default();
        };

        let mut report = ShutdownReport::default();
        for (id, state) in scopes {
            report.scopes.push(dispose_closed_async(id, state.close()).await);
        }
        let root = self.inner.root_disposers.lock().take();
        root.run_async(&mut report.singletons).await;
        self.finish_shutdown(&report);
        report
    }

    fn begin_shutdown(&self) -> Option<Vec<(ScopeId, Arc<scope::ScopeState>)>> {
        if self.inner.shut_down.swap(true, Ordering::AcqRel) {
            debug!("Container already shut down");
            return None;
        }
        Some(self.inner.scopes.drain())
    }

    fn finish_shutdown(&self, report: &ShutdownReport) {
        self.inner.registry.write().clear();
        info!(
            scopes = report.scopes.len(),
            singletons = report.singletons.attempted,
            failures = report.failure_count(),
            "Container shut down"
        );
    }

    // ----- Introspection -----

    /// Describes every registration, ordered by type name.
    pub fn descriptors(&self) -> Vec<ServiceDescriptor> {
        self.inner
            .registry
            .read()
            .registrations()
            .iter()
            .map(|registration| ServiceDescriptor::from_registration(registration))
            .collect()
    }

    /// Ids of the active scopes, oldest first.
    pub fn active_scopes(&self) -> Vec<ScopeId> {
        self.inner.scopes.ids()
    }

    pub fn scope_count(&self) -> usize {
        self.inner.scopes.len()
    }

    #[cfg(feature = "diagnostics")]
    pub fn to_debug_string(&self) -> String {
        let mut s = String::new();
        s.push_str("=== Container Debug ===\n");
        s.push_str("Registrations:\n");
        for descriptor in self.descriptors() {
            s.push_str(&format!(
                "  {}: {} (impl {}{}{})\n",
                descriptor.key,
                descriptor.lifetime,
                descriptor.impl_type_name,
                if descriptor.disposable { ", disposable" } else { "" },
                if descriptor.materialized { ", materialized" } else { "" },
            ));
        }
        s.push_str("Active scopes:\n");
        for id in self.active_scopes() {
            s.push_str(&format!("  {}\n", id));
        }
        s
    }
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field("registrations", &self.inner.registry.read().len())
            .field("active_scopes", &self.inner.scopes.len())
            .field("shut_down", &self.is_shut_down())
            .finish()
    }
}

impl ResolverCore for Container {
    fn resolve_any(&self, key: &Key) -> DiResult<Arc<dyn Any + Send + Sync>> {
        self.resolve_key(key, None)
    }
}

impl Drop for ContainerInner {
    fn drop(&mut self) {
        if !self.config.warn_on_undisposed || *self.shut_down.get_mut() {
            return;
        }
        let active_scopes = self.scopes.len();
        let tracked = self.root_disposers.get_mut().len();
        if active_scopes > 0 || tracked > 0 {
            warn!(
                active_scopes,
                tracked,
                "Container dropped with undisposed resources. Call shutdown() before dropping."
            );
        }
    }
}

fn named_key<T: ?Sized + 'static>(name: &'static str) -> DiResult<Key> {
    let key = key_of_named::<T>(name);
    if name.is_empty() {
        return Err(DiError::InvalidRegistration {
            service: key,
            reason: "service name must not be empty",
        });
    }
    Ok(key)
}

fn erase<T, F>(factory: F) -> Ctor
where
    T: Send + Sync + 'static,
    F: Fn(&ResolverContext<'_>) -> DiResult<T> + Send + Sync + 'static,
{
    Arc::new(move |ctx: &ResolverContext<'_>| factory(ctx).map(|value| Arc::new(value) as AnyArc))
}

fn dispose_closed(id: ScopeId, closed: ClosedScope) -> DisposalReport {
    let ClosedScope { bag, instances } = closed;
    let mut report = DisposalReport::for_scope(id);
    bag.run_sync(&mut report);
    drop(instances);
    log_disposed(&report);
    report
}

async fn dispose_closed_async(id: ScopeId, closed: ClosedScope) -> DisposalReport {
    let ClosedScope { bag, instances } = closed;
    let mut report = DisposalReport::for_scope(id);
    bag.run_async(&mut report).await;
    drop(instances);
    log_disposed(&report);
    report
}

fn log_disposed(report: &DisposalReport) {
    if let Some(scope) = report.scope {
        debug!(
            scope = %scope,
            attempted = report.attempted,
            failures = report.failures.len(),
            "Scope disposed"
        );
    }
}

fn dispose_rejected(service: Key, disposer: Disposer) {
    warn!(service = %service, "Owner already disposed; disposing instance immediately");
    let mut bag = DisposeBag::default();
    bag.push(service, disposer);
    bag.run_sync(&mut DisposalReport::default());
}
