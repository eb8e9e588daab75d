//! Circular dependency detection infrastructure.

use crate::error::{DiError, DiResult};
use crate::key::Key;
use crate::lifetime::Lifetime;

/// One frame of the identities currently under construction.
///
/// Frames live on the stack of the nested `resolve` calls and point at
/// their parent, so the chain belongs to a single top-level resolution and
/// shrinks automatically on every exit path (return, `?`, or unwind).
/// Concurrent resolutions never see each other's frames.
#[derive(Debug)]
pub(crate) struct ResolutionChain<'a> {
    key: Key,
    lifetime: Lifetime,
    parent: Option<&'a ResolutionChain<'a>>,
    depth: usize,
}

impl<'a> ResolutionChain<'a> {
    /// Pushes `key` on top of `parent` (or starts a new chain).
    ///
    /// Fails with `CircularDependency` if `key` is already under
    /// construction, and with `DepthExceeded` past `max_depth` frames.
    pub(crate) fn enter(
        parent: Option<&'a ResolutionChain<'a>>,
        key: Key,
        lifetime: Lifetime,
        max_depth: usize,
    ) -> DiResult<Self> {
        let depth = match parent {
            Some(parent) => {
                // Circular detection BEFORE pushing the new key
                if parent.contains(&key) {
                    return Err(DiError::CircularDependency(parent.path_to(key)));
                }
                parent.depth + 1
            }
            None => 1,
        };

        if depth > max_depth {
            return Err(DiError::DepthExceeded(max_depth));
        }

        Ok(Self {
            key,
            lifetime,
            parent,
            depth,
        })
    }

    pub(crate) fn key(&self) -> &Key {
        &self.key
    }

    pub(crate) fn depth(&self) -> usize {
        self.depth
    }

    pub(crate) fn contains(&self, key: &Key) -> bool {
        self.frames().any(|frame| frame.key == *key)
    }

    /// True if an enclosing frame is building a singleton.
    pub(crate) fn within_singleton(&self) -> bool {
        self.frames()
            .skip(1)
            .any(|frame| frame.lifetime == Lifetime::Singleton)
    }

    /// Outermost-first keys of the chain.
    pub(crate) fn path(&self) -> Vec<Key> {
        let mut path: Vec<Key> = self.frames().map(|frame| frame.key).collect();
        path.reverse();
        path
    }

    /// Outermost-first path of the chain with `last` appended.
    pub(crate) fn path_to(&self, last: Key) -> Vec<Key> {
        let mut path = self.path();
        path.push(last);
        path
    }

    fn frames(&self) -> impl Iterator<Item = &ResolutionChain<'a>> {
        std::iter::successors(Some(self), |frame| frame.parent)
    }
}
