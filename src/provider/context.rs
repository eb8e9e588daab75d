//! Resolver context for dependency injection.
//!
//! This module contains the ResolverContext type which provides
//! the interface for factory functions to resolve dependencies.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::error::DiResult;
use crate::internal::{Disposer, ResolutionChain};
use crate::key::Key;
use crate::traits::{AsyncDispose, Dispose, ResolverCore};

use super::{Container, ScopeId};

/// Context passed to factory functions for resolving dependencies.
///
/// The context carries the ambient scope of the service being built and the
/// chain of services currently under construction. Dependencies resolved
/// through it inherit both: a scoped dependency lands in the same scope and a
/// dependency that leads back to a service already being built fails with
/// [`DiError::CircularDependency`](crate::DiError::CircularDependency).
///
/// Singleton factories get a context without a scope, so they can only
/// depend on singletons and transients.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use tenure_di::{Container, DiError, Lifetime, Resolver};
///
/// struct RequestId(u64);
/// struct AuditLog { request: Arc<RequestId> }
/// struct Cache { request: Arc<RequestId> }
///
/// let container = Container::new();
/// container.register_factory::<RequestId, _>(Lifetime::Scoped, |ctx| {
///     Ok(RequestId(ctx.scope_id().map(|id| id.as_u64()).unwrap_or(0)))
/// }).unwrap();
/// container.register_factory::<AuditLog, _>(Lifetime::Transient, |ctx| {
///     Ok(AuditLog { request: ctx.get::<RequestId>()? })
/// }).unwrap();
/// container.register_factory::<Cache, _>(Lifetime::Singleton, |ctx| {
///     Ok(Cache { request: ctx.get::<RequestId>()? })
/// }).unwrap();
///
/// let scope = container.create_scope().unwrap();
/// let log = container.resolve::<AuditLog>(Some(scope)).unwrap();
/// let id = container.resolve::<RequestId>(Some(scope)).unwrap();
/// assert!(Arc::ptr_eq(&log.request, &id));
///
/// // A singleton cannot capture a scoped instance
/// assert!(matches!(
///     container.resolve::<Cache>(Some(scope)),
///     Err(DiError::MissingScope(_))
/// ));
/// ```
pub struct ResolverContext<'a> {
    container: &'a Container,
    scope: Option<ScopeId>,
    chain: &'a ResolutionChain<'a>,
}

impl<'a> ResolverContext<'a> {
    pub(crate) fn new(
        container: &'a Container,
        scope: Option<ScopeId>,
        chain: &'a ResolutionChain<'a>,
    ) -> Self {
        Self {
            container,
            scope,
            chain,
        }
    }

    /// The ambient scope, if the service being built has one.
    pub fn scope_id(&self) -> Option<ScopeId> {
        self.scope
    }

    /// Key of the service this factory is building.
    pub fn current_service(&self) -> &Key {
        self.chain.key()
    }

    /// Number of services under construction, this one included.
    pub fn depth(&self) -> usize {
        self.chain.depth()
    }

    /// The container being resolved from.
    pub fn container(&self) -> &Container {
        self.container
    }

    /// Attaches a synchronous disposal hook to the ambient scope, or to the
    /// container root when there is none.
    pub fn register_disposer<T: Dispose>(&self, service: Arc<T>) {
        self.container
            .track(self.scope, *self.chain.key(), Disposer::sync(service));
    }

    /// Attaches an asynchronous disposal hook to the ambient scope, or to the
    /// container root when there is none.
    pub fn register_async_disposer<T: AsyncDispose>(&self, service: Arc<T>) {
        self.container
            .track(self.scope, *self.chain.key(), Disposer::asynchronous(service));
    }
}

impl<'a> ResolverCore for ResolverContext<'a> {
    fn resolve_any(&self, key: &Key) -> DiResult<Arc<dyn Any + Send + Sync>> {
        self.container.resolve_in(key, self.scope, Some(self.chain))
    }
}

impl fmt::Debug for ResolverContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolverContext")
            .field("service", self.chain.key())
            .field("scope", &self.scope)
            .field("depth", &self.chain.depth())
            .finish()
    }
}
