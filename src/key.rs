//! Service key types for the container.

use std::any::TypeId;
use std::fmt;

/// Identity under which a service recipe is registered and later requested.
///
/// A key is the `TypeId` of the service contract (a concrete type or a
/// `dyn Trait`) plus an optional name that disambiguates several
/// registrations of the same contract. The type name is carried for
/// diagnostics only: two keys with the same `TypeId` and name are equal
/// regardless of the name string they were built with.
///
/// # Examples
///
/// ```rust
/// use tenure_di::{Container, Key, key_of_type, key_of_named};
///
/// let container = Container::new();
/// container.register_singleton(8080u16).unwrap();
/// container.register_named_singleton("admin_port", 9090u16).unwrap();
///
/// assert!(container.is_registered(&key_of_type::<u16>()));
/// assert!(container.is_registered(&key_of_named::<u16>("admin_port")));
/// assert!(!container.is_registered(&key_of_named::<u16>("metrics_port")));
///
/// let key = key_of_named::<u16>("admin_port");
/// assert_eq!(key.display_name(), "u16");
/// assert_eq!(key.service_name(), Some("admin_port"));
/// assert_eq!(key.to_string(), "u16[admin_port]");
/// ```
#[derive(Debug, Clone, Copy)]
pub enum Key {
    /// Unnamed contract: TypeId and type name for diagnostics
    Type(TypeId, &'static str),
    /// Named contract: TypeId, type name and service name
    Named(TypeId, &'static str, &'static str),
}

impl Key {
    /// Get the type or trait name for display
    ///
    /// This is the `std::any::type_name` of the contract, without the
    /// service name of named keys.
    pub fn display_name(&self) -> &'static str {
        match self {
            Key::Type(_, name) => name,
            Key::Named(_, name, _) => name,
        }
    }

    /// Get the service name for named keys, or None for unnamed keys
    pub fn service_name(&self) -> Option<&'static str> {
        match self {
            Key::Type(_, _) => None,
            Key::Named(_, _, name) => Some(name),
        }
    }

    /// The `TypeId` of the contract this key identifies.
    pub fn type_id(&self) -> TypeId {
        match self {
            Key::Type(id, _) => *id,
            Key::Named(id, _, _) => *id,
        }
    }

    /// Returns true for keys created with a service name.
    pub fn is_named(&self) -> bool {
        matches!(self, Key::Named(..))
    }
}

impl PartialEq for Key {
    #[inline(always)]
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            // Type names are diagnostics only
            (Key::Type(a, _), Key::Type(b, _)) => a == b,
            (Key::Named(a, _, name_a), Key::Named(b, _, name_b)) => a == b && name_a == name_b,
            _ => false,
        }
    }
}

impl Eq for Key {}

impl std::hash::Hash for Key {
    #[inline(always)]
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        match self {
            Key::Type(id, _) => {
                0u8.hash(state);
                id.hash(state);
            }
            Key::Named(id, _, name) => {
                1u8.hash(state);
                id.hash(state);
                name.hash(state);
            }
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Type(_, name) => f.write_str(name),
            Key::Named(_, name, service) => write!(f, "{}[{}]", name, service),
        }
    }
}

/// Key of the unnamed registration for `T`.
///
/// `T` may be unsized, so `key_of_type::<dyn Trait>()` names a trait-object
/// contract.
#[inline(always)]
pub fn key_of_type<T: ?Sized + 'static>() -> Key {
    Key::Type(TypeId::of::<T>(), std::any::type_name::<T>())
}

/// Key of the registration of `T` under `name`.
#[inline(always)]
pub fn key_of_named<T: ?Sized + 'static>(name: &'static str) -> Key {
    Key::Named(TypeId::of::<T>(), std::any::type_name::<T>(), name)
}
