//! Core traits for the container.

mod dispose;
mod resolver;

pub use dispose::{AsyncDispose, Dispose, DisposeResult};
pub use resolver::{Resolver, ResolverCore};
pub(crate) use resolver::{downcast, downcast_trait};
