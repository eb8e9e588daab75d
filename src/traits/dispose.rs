//! Disposal traits for resource cleanup.

use crate::error::BoxError;

/// Outcome of a single disposal hook.
pub type DisposeResult = Result<(), BoxError>;

/// Trait for synchronous resource disposal.
///
/// Implement this for services that need structured teardown (flushing
/// buffers, closing connections) and register them through one of the
/// `register_disposable_*` methods. The hook runs when the owning scope is
/// disposed, or at container shutdown for singletons. A failing or
/// panicking hook is reported and never stops the remaining hooks.
///
/// # Examples
///
/// ```
/// use tenure_di::{Container, Dispose, DisposeResult, Lifetime};
///
/// struct Connection {
///     name: String,
/// }
///
/// impl Dispose for Connection {
///     fn dispose(&self) -> DisposeResult {
///         println!("closing {}", self.name);
///         Ok(())
///     }
/// }
///
/// let container = Container::new();
/// container.register_disposable_factory::<Connection, _>(Lifetime::Scoped, |_| {
///     Ok(Connection { name: "primary".to_string() })
/// }).unwrap();
///
/// let scope = container.create_scope().unwrap();
/// let _conn = container.resolve::<Connection>(Some(scope)).unwrap();
/// let report = container.dispose_scope(scope).unwrap();
/// assert_eq!(report.attempted, 1);
/// assert!(report.is_clean());
/// ```
pub trait Dispose: Send + Sync + 'static {
    /// Perform synchronous cleanup of resources.
    fn dispose(&self) -> DisposeResult;
}

/// Trait for asynchronous resource disposal.
///
/// Async hooks only run from the `*_async` disposal methods; the synchronous
/// ones skip them and count them in the report.
///
/// # Examples
///
/// ```
/// use tenure_di::{AsyncDispose, Container, DisposeResult, Lifetime};
/// use async_trait::async_trait;
///
/// struct Client {
///     endpoint: String,
/// }
///
/// #[async_trait]
/// impl AsyncDispose for Client {
///     async fn dispose(&self) -> DisposeResult {
///         println!("closing session with {}", self.endpoint);
///         Ok(())
///     }
/// }
///
/// # async fn example() {
/// let container = Container::new();
/// container.register_async_disposable_factory::<Client, _>(Lifetime::Singleton, |_| {
///     Ok(Client { endpoint: "https://api.example.com".to_string() })
/// }).unwrap();
///
/// let _client = container.resolve::<Client>(None).unwrap();
/// let report = container.shutdown_async().await;
/// assert_eq!(report.singletons.attempted, 1);
/// # }
/// ```
#[async_trait::async_trait]
pub trait AsyncDispose: Send + Sync + 'static {
    /// Perform asynchronous cleanup of resources.
    async fn dispose(&self) -> DisposeResult;
}
