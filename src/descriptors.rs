//! Service descriptors for introspection and diagnostics.

use crate::key::Key;
use crate::lifetime::Lifetime;
use crate::registration::Registration;

/// Service descriptor for introspection and diagnostics
///
/// A snapshot of one registration, taken by
/// [`Container::descriptors`](crate::Container::descriptors). Useful for
/// startup health checks and for logging what the container holds.
///
/// # Examples
///
/// ```rust
/// use tenure_di::{Container, Lifetime};
///
/// struct Database { url: String }
/// struct Repository { name: String }
///
/// let container = Container::new();
/// container.register_singleton(Database { url: "postgres://localhost".to_string() }).unwrap();
/// container.register_factory::<Repository, _>(Lifetime::Scoped, |_| {
///     Ok(Repository { name: "UserRepo".to_string() })
/// }).unwrap();
/// container.register_named_singleton("config_value", 42u32).unwrap();
///
/// let descriptors = container.descriptors();
///
/// let db = descriptors.iter()
///     .find(|d| d.type_name().contains("Database"))
///     .unwrap();
/// assert_eq!(db.lifetime, Lifetime::Singleton);
/// assert!(db.materialized);
/// assert!(!db.is_named());
///
/// let repo = descriptors.iter()
///     .find(|d| d.type_name().contains("Repository"))
///     .unwrap();
/// assert_eq!(repo.lifetime, Lifetime::Scoped);
/// assert!(!repo.materialized);
///
/// let config = descriptors.iter().find(|d| d.is_named()).unwrap();
/// assert_eq!(config.type_name(), "u32");
/// assert_eq!(config.service_name(), Some("config_value"));
/// ```
#[derive(Debug, Clone)]
pub struct ServiceDescriptor {
    /// The service key (type or trait with optional service name)
    pub key: Key,
    /// Service lifetime
    pub lifetime: Lifetime,
    /// Implementation type name
    pub impl_type_name: &'static str,
    /// Whether instances are tracked for disposal
    pub disposable: bool,
    /// Whether the singleton instance exists; always false for other lifetimes
    pub materialized: bool,
}

impl ServiceDescriptor {
    pub(crate) fn from_registration(registration: &Registration) -> Self {
        Self {
            key: registration.key,
            lifetime: registration.lifetime(),
            impl_type_name: registration.impl_name,
            disposable: registration.track.is_some(),
            materialized: registration.is_materialized(),
        }
    }

    /// Get the service name for named services, or None for unnamed services
    pub fn service_name(&self) -> Option<&'static str> {
        self.key.service_name()
    }

    /// Get the type/trait name
    ///
    /// This is the `std::any::type_name` of the registered contract.
    pub fn type_name(&self) -> &'static str {
        self.key.display_name()
    }

    /// Check if this is a named service
    pub fn is_named(&self) -> bool {
        self.service_name().is_some()
    }
}
