//! # tenure-di
//!
//! Service lifecycle container: a dependency-injection runtime with lifetime
//! policies, lazy construction, cycle detection and deterministic teardown.
//!
//! ## Features
//!
//! - **Lifetimes**: Singleton, Scoped and Transient services
//! - **Named and trait-object registrations** next to plain types
//! - **Thread-safe**: exactly-once singleton construction under contention
//! - **Circular dependency detection** with the full construction path
//! - **Scopes**: isolated per-unit-of-work caches with best-effort disposal
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use tenure_di::{Container, Lifetime, Resolver};
//!
//! struct Database {
//!     connection_string: String,
//! }
//!
//! struct UserService {
//!     db: Arc<Database>,
//! }
//!
//! let container = Container::new();
//! container.register_singleton(Database {
//!     connection_string: "postgres://localhost".to_string(),
//! }).unwrap();
//! container.register_factory::<UserService, _>(Lifetime::Transient, |ctx| {
//!     Ok(UserService { db: ctx.get::<Database>()? })
//! }).unwrap();
//!
//! let user_service = container.resolve::<UserService>(None).unwrap();
//! assert_eq!(user_service.db.connection_string, "postgres://localhost");
//! ```
//!
//! ## Service Lifetimes
//!
//! - **Singleton**: Created once and shared across the entire application
//! - **Scoped**: Created once per scope (one request, one job)
//! - **Transient**: Created fresh on every resolution
//!
//! ## Scopes and Disposal
//!
//! ```rust
//! use tenure_di::{Container, Dispose, DisposeResult, Lifetime, Resolver};
//!
//! struct Session;
//!
//! impl Dispose for Session {
//!     fn dispose(&self) -> DisposeResult {
//!         Ok(())
//!     }
//! }
//!
//! let container = Container::new();
//! container.register_disposable_factory::<Session, _>(Lifetime::Scoped, |_| Ok(Session)).unwrap();
//!
//! let scope = container.scope().unwrap();
//! let _session = scope.get::<Session>().unwrap();
//! let report = scope.dispose();
//! assert_eq!(report.attempted, 1);
//! assert!(report.failures.is_empty());
//!
//! let shutdown = container.shutdown();
//! assert!(shutdown.is_clean());
//! ```

pub mod config;
pub mod descriptors;
pub mod disposal;
pub mod error;
pub mod key;
pub mod lifetime;
pub mod provider;
pub mod traits;

// Internal modules
mod internal;
mod registration;

pub use config::ContainerConfig;
pub use descriptors::ServiceDescriptor;
pub use disposal::{DisposalFailure, DisposalReport, DisposerPanicked, ShutdownReport};
pub use error::{BoxError, DiError, DiResult};
pub use key::{key_of_named, key_of_type, Key};
pub use lifetime::Lifetime;
pub use provider::{Container, ResolverContext, ScopeGuard, ScopeId};
pub use traits::{AsyncDispose, Dispose, DisposeResult, Resolver, ResolverCore};
