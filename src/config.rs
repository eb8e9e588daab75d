//! Container configuration.
//!
//! The container loads nothing itself; with the `config` feature these types
//! derive serde traits so applications can embed them in their own files.

/// Default bound on the length of a construction chain.
pub const DEFAULT_MAX_DEPTH: usize = 1024;

/// Runtime knobs of a [`Container`](crate::Container).
///
/// # Examples
///
/// ```
/// use tenure_di::{Container, ContainerConfig};
///
/// let config = ContainerConfig::default()
///     .with_max_depth(64)
///     .with_warn_on_undisposed(false);
///
/// let container = Container::with_config(config);
/// assert_eq!(container.config().max_depth, 64);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct ContainerConfig {
    /// Maximum number of services under construction in one resolution
    pub max_depth: usize,
    /// Log a warning when the container is dropped with active scopes or
    /// undisposed singletons
    pub warn_on_undisposed: bool,
}

impl ContainerConfig {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth.max(1);
        self
    }

    pub fn with_warn_on_undisposed(mut self, warn: bool) -> Self {
        self.warn_on_undisposed = warn;
        self
    }
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            warn_on_undisposed: true,
        }
    }
}
