//! Error types for the container.

use std::error::Error as StdError;

use crate::key::Key;
use crate::provider::ScopeId;

/// Boxed error raised by application code (factories, disposers).
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Container errors
///
/// Every variant is a structural problem detected synchronously at the point
/// it happens; the container never retries. The `Display` output is meant
/// for server logs.
///
/// # Examples
///
/// ```rust
/// use tenure_di::{Container, DiError};
///
/// let container = Container::new();
/// container.register_singleton(1u8).unwrap();
///
/// match container.resolve::<String>(None) {
///     Err(DiError::ServiceNotFound { service, registered }) => {
///         assert_eq!(service.display_name(), "alloc::string::String");
///         assert_eq!(registered.len(), 1);
///     }
///     _ => unreachable!(),
/// }
/// ```
#[derive(Debug, thiserror::Error)]
pub enum DiError {
    /// Duplicate registration without an intervening unregister
    #[error("Service already registered: {0}")]
    AlreadyRegistered(Key),
    /// Registration rejected before it reached the registry
    #[error("Invalid registration for {service}: {reason}")]
    InvalidRegistration { service: Key, reason: &'static str },
    /// Service not registered; lists what is registered
    #[error("Service not found: {service} (registered: {})", join_keys(.registered, ", "))]
    ServiceNotFound { service: Key, registered: Vec<Key> },
    /// Identity reappeared in its own construction chain (includes path)
    #[error("Circular dependency: {}", join_keys(.0, " -> "))]
    CircularDependency(Vec<Key>),
    /// Scoped service, or disposable transient outside a singleton, resolved
    /// with neither an explicit nor an ambient scope
    #[error("Missing scope: {0} needs an explicit or ambient scope")]
    MissingScope(Key),
    /// Scope id was never created or is already disposed
    #[error("Scope not found: {0}")]
    ScopeNotFound(ScopeId),
    /// Type downcast failed
    #[error("Type mismatch for: {0}")]
    TypeMismatch(&'static str),
    /// Construction chain longer than the configured maximum depth
    #[error("Max depth {0} exceeded")]
    DepthExceeded(usize),
    /// A factory failed with an application error
    #[error("Factory for {service} failed: {source}")]
    Factory {
        service: Key,
        #[source]
        source: BoxError,
    },
    /// The container was shut down
    #[error("Container has been shut down")]
    ShutDown,
}

impl DiError {
    /// Wraps an application error raised while building `service`.
    ///
    /// ```rust
    /// use tenure_di::{Container, DiError, Lifetime, key_of_type};
    ///
    /// struct Connection;
    ///
    /// let container = Container::new();
    /// container.register_factory::<Connection, _>(Lifetime::Transient, |_| {
    ///     let port: u16 = "not-a-port"
    ///         .parse()
    ///         .map_err(|e| DiError::factory(key_of_type::<Connection>(), e))?;
    ///     let _ = port;
    ///     Ok(Connection)
    /// }).unwrap();
    ///
    /// assert!(matches!(container.resolve::<Connection>(None), Err(DiError::Factory { .. })));
    /// ```
    pub fn factory(service: Key, source: impl Into<BoxError>) -> Self {
        DiError::Factory {
            service,
            source: source.into(),
        }
    }
}

fn join_keys(keys: &[Key], sep: &str) -> String {
    keys.iter()
        .map(|key| key.to_string())
        .collect::<Vec<_>>()
        .join(sep)
}

/// Result type for container operations
pub type DiResult<T> = Result<T, DiError>;
