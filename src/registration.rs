//! Service registration types.

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::OnceCell;

use crate::error::{DiError, DiResult};
use crate::internal::Disposer;
use crate::key::Key;
use crate::lifetime::Lifetime;
use crate::provider::ResolverContext;
use crate::traits::{AsyncDispose, Dispose};

// Type-erased Arc for storage
pub(crate) type AnyArc = Arc<dyn Any + Send + Sync>;

/// Type-erased factory.
pub(crate) type Ctor = Arc<dyn for<'a> Fn(&ResolverContext<'a>) -> DiResult<AnyArc> + Send + Sync>;

/// Builds the disposal hook of a freshly materialized instance.
pub(crate) type TrackFn = fn(&AnyArc) -> Option<Disposer>;

pub(crate) fn track_sync<T: Dispose>(instance: &AnyArc) -> Option<Disposer> {
    instance.clone().downcast::<T>().ok().map(Disposer::sync)
}

pub(crate) fn track_async<T: AsyncDispose>(instance: &AnyArc) -> Option<Disposer> {
    instance.clone().downcast::<T>().ok().map(Disposer::asynchronous)
}

/// Lifetime policy with the singleton slot embedded.
pub(crate) enum Policy {
    Singleton(OnceCell<AnyArc>),
    Scoped,
    Transient,
}

/// Service registration with lifetime and constructor
pub(crate) struct Registration {
    /// Unique per registration; scope caches are keyed by it so a
    /// re-registered identity never reuses instances of the old recipe
    pub(crate) serial: u64,
    pub(crate) key: Key,
    pub(crate) policy: Policy,
    pub(crate) ctor: Ctor,
    pub(crate) track: Option<TrackFn>,
    /// Implementation type name for diagnostics
    pub(crate) impl_name: &'static str,
}

impl Registration {
    pub(crate) fn new(key: Key, lifetime: Lifetime, ctor: Ctor, impl_name: &'static str) -> Self {
        let policy = match lifetime {
            Lifetime::Singleton => Policy::Singleton(OnceCell::new()),
            Lifetime::Scoped => Policy::Scoped,
            Lifetime::Transient => Policy::Transient,
        };

        Self {
            serial: 0,
            key,
            policy,
            ctor,
            track: None,
            impl_name,
        }
    }

    /// A singleton whose slot is already populated.
    pub(crate) fn prebuilt(key: Key, instance: AnyArc, impl_name: &'static str) -> Self {
        let stored = instance.clone();
        let ctor: Ctor = Arc::new(move |_: &ResolverContext<'_>| Ok(stored.clone()));
        let mut registration = Self::new(key, Lifetime::Singleton, ctor, impl_name);
        registration.policy = Policy::Singleton(OnceCell::with_value(instance));
        registration
    }

    pub(crate) fn with_tracking(mut self, track: TrackFn) -> Self {
        self.track = Some(track);
        self
    }

    pub(crate) fn lifetime(&self) -> Lifetime {
        match self.policy {
            Policy::Singleton(_) => Lifetime::Singleton,
            Policy::Scoped => Lifetime::Scoped,
            Policy::Transient => Lifetime::Transient,
        }
    }

    /// True once a singleton has been materialized.
    pub(crate) fn is_materialized(&self) -> bool {
        match &self.policy {
            Policy::Singleton(slot) => slot.get().is_some(),
            _ => false,
        }
    }
}

/// Service registry holding all registrations
#[derive(Default)]
pub(crate) struct Registry {
    entries: HashMap<Key, Arc<Registration>>,
    next_serial: u64,
}

impl Registry {
    /// Stores `registration`, refusing to overwrite an existing identity.
    pub(crate) fn insert(&mut self, mut registration: Registration) -> DiResult<Arc<Registration>> {
        if self.entries.contains_key(&registration.key) {
            return Err(DiError::AlreadyRegistered(registration.key));
        }

        self.next_serial += 1;
        registration.serial = self.next_serial;
        let registration = Arc::new(registration);
        self.entries.insert(registration.key, registration.clone());
        Ok(registration)
    }

    pub(crate) fn remove(&mut self, key: &Key) -> Option<Arc<Registration>> {
        self.entries.remove(key)
    }

    /// The registration for `key`, cloned out so no lock is held while its
    /// factory runs.
    pub(crate) fn get(&self, key: &Key) -> Option<Arc<Registration>> {
        self.entries.get(key).cloned()
    }

    pub(crate) fn contains(&self, key: &Key) -> bool {
        self.entries.contains_key(key)
    }

    /// Registered identities, ordered by type name then service name.
    pub(crate) fn keys(&self) -> Vec<Key> {
        let mut keys: Vec<Key> = self.entries.keys().copied().collect();
        keys.sort_by(|a, b| {
            (a.display_name(), a.service_name()).cmp(&(b.display_name(), b.service_name()))
        });
        keys
    }

    /// Registrations in the same order as [`keys`](Self::keys).
    pub(crate) fn registrations(&self) -> Vec<Arc<Registration>> {
        self.keys()
            .iter()
            .filter_map(|key| self.entries.get(key).cloned())
            .collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Drops every registration along with the singletons they hold.
    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }
}
