//! Resolver traits for service resolution.

use std::any::{type_name, Any};
use std::sync::Arc;

use crate::error::{DiError, DiResult};
use crate::key::{key_of_named, key_of_type, Key};

/// Core resolver trait for object-safe service resolution.
///
/// Implemented by [`Container`](crate::Container) (root, no scope),
/// [`ResolverContext`](crate::ResolverContext) (ambient scope and the current
/// construction chain) and [`ScopeGuard`](crate::ScopeGuard) (its own scope).
///
/// Most users should use the [`Resolver`] trait instead, which provides
/// typed methods built on top of this trait.
pub trait ResolverCore: Send + Sync {
    /// Resolves the registration for `key` as a type-erased instance.
    fn resolve_any(&self, key: &Key) -> DiResult<Arc<dyn Any + Send + Sync>>;
}

/// Typed resolution on top of [`ResolverCore`].
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use tenure_di::{Container, Resolver};
///
/// trait Clock: Send + Sync {
///     fn now(&self) -> u64;
/// }
///
/// struct FixedClock;
/// impl Clock for FixedClock {
///     fn now(&self) -> u64 { 1_700_000_000 }
/// }
///
/// let container = Container::new();
/// container.register_singleton(42usize).unwrap();
/// container.register_named_singleton("greeting", "hello".to_string()).unwrap();
/// container.register_singleton_trait(Arc::new(FixedClock) as Arc<dyn Clock>).unwrap();
///
/// assert_eq!(*container.get::<usize>().unwrap(), 42);
/// assert_eq!(container.get_named::<String>("greeting").unwrap().as_str(), "hello");
/// assert_eq!(container.get_trait::<dyn Clock>().unwrap().now(), 1_700_000_000);
/// ```
pub trait Resolver: ResolverCore {
    /// Resolves the unnamed registration of `T`.
    fn get<T: Send + Sync + 'static>(&self) -> DiResult<Arc<T>> {
        downcast(self.resolve_any(&key_of_type::<T>())?)
    }

    /// Resolves the registration of `T` under `name`.
    fn get_named<T: Send + Sync + 'static>(&self, name: &'static str) -> DiResult<Arc<T>> {
        downcast(self.resolve_any(&key_of_named::<T>(name))?)
    }

    /// Resolves a trait-object registration.
    fn get_trait<T: ?Sized + Send + Sync + 'static>(&self) -> DiResult<Arc<T>> {
        downcast_trait(self.resolve_any(&key_of_type::<T>())?)
    }
}

impl<R: ResolverCore + ?Sized> Resolver for R {}

pub(crate) fn downcast<T: Send + Sync + 'static>(any: Arc<dyn Any + Send + Sync>) -> DiResult<Arc<T>> {
    any.downcast::<T>()
        .map_err(|_| DiError::TypeMismatch(type_name::<T>()))
}

// Trait objects are stored as Arc<Arc<dyn Trait>>
pub(crate) fn downcast_trait<T: ?Sized + Send + Sync + 'static>(
    any: Arc<dyn Any + Send + Sync>,
) -> DiResult<Arc<T>> {
    any.downcast::<Arc<T>>()
        .map(|stored| (*stored).clone())
        .map_err(|_| DiError::TypeMismatch(type_name::<T>()))
}
