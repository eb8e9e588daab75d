//! Service lifetime definitions.

use std::fmt;

/// Service lifetimes controlling instance sharing
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use tenure_di::{Container, Lifetime, Resolver};
///
/// struct Database { url: String }
/// struct Repository { db: Arc<Database> }
/// struct Command { id: u32 }
///
/// let container = Container::new();
///
/// // Singleton: one instance for the container
/// container.register_singleton(Database { url: "postgres://localhost".to_string() }).unwrap();
///
/// // Scoped: one instance per scope
/// container.register_factory::<Repository, _>(Lifetime::Scoped, |ctx| {
///     Ok(Repository { db: ctx.get::<Database>()? })
/// }).unwrap();
///
/// // Transient: new instance every time
/// container.register_factory::<Command, _>(Lifetime::Transient, |_| Ok(Command { id: 7 })).unwrap();
///
/// let scope1 = container.create_scope().unwrap();
/// let scope2 = container.create_scope().unwrap();
///
/// let repo1a = container.resolve::<Repository>(Some(scope1)).unwrap();
/// let repo1b = container.resolve::<Repository>(Some(scope1)).unwrap();
/// let repo2 = container.resolve::<Repository>(Some(scope2)).unwrap();
/// assert!(Arc::ptr_eq(&repo1a, &repo1b));
/// assert!(!Arc::ptr_eq(&repo1a, &repo2));
/// assert!(Arc::ptr_eq(&repo1a.db, &repo2.db));
///
/// let a = container.resolve::<Command>(None).unwrap();
/// let b = container.resolve::<Command>(None).unwrap();
/// assert!(!Arc::ptr_eq(&a, &b));
/// assert_eq!(a.id, b.id);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "config", serde(rename_all = "snake_case"))]
pub enum Lifetime {
    /// Single instance per container, created on first resolution
    ///
    /// Kept until the container shuts down and shared by every scope and
    /// thread.
    Singleton,
    /// Single instance per scope, cached for the scope lifetime
    ///
    /// Resolving a scoped service needs either an explicit scope id or the
    /// ambient scope of the factory that asks for it.
    Scoped,
    /// New instance per resolution, never cached
    Transient,
}

impl Lifetime {
    /// Returns true for lifetimes that cache their instances.
    pub fn is_cached(&self) -> bool {
        matches!(self, Lifetime::Singleton | Lifetime::Scoped)
    }
}

impl fmt::Display for Lifetime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Lifetime::Singleton => "singleton",
            Lifetime::Scoped => "scoped",
            Lifetime::Transient => "transient",
        };
        f.write_str(name)
    }
}
