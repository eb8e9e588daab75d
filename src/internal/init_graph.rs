//! Cross-thread cycle detection for cached instances.
//!
//! A [`ResolutionChain`] only sees its own thread. Two threads that start a
//! singleton cycle from opposite ends each hold one slot and would block on
//! the other's forever. Every cached slot under construction is therefore
//! registered here with its owning thread, and a thread about to wait for
//! another owner first walks the wait-for graph.

use std::collections::HashMap;
use std::thread::{self, ThreadId};

use parking_lot::{Condvar, Mutex};

use crate::error::{DiError, DiResult};
use crate::internal::ResolutionChain;
use crate::key::Key;
use crate::provider::ScopeId;

/// A cacheable slot: the registration key and the scope that caches it
/// (`None` for singletons).
pub(crate) type SlotId = (Key, Option<ScopeId>);

#[derive(Default)]
struct Graph {
    owners: HashMap<SlotId, ThreadId>,
    waiting: HashMap<ThreadId, SlotId>,
}

/// Wait-for graph of slots currently being materialized.
#[derive(Default)]
pub(crate) struct InitGraph {
    graph: Mutex<Graph>,
    released: Condvar,
}

/// Ownership of a slot under construction; released on drop.
pub(crate) struct InitClaim<'a> {
    owner: &'a InitGraph,
    slot: SlotId,
}

impl InitGraph {
    /// Claims `slot` for the current thread.
    ///
    /// Returns `Ok(None)` after waiting for another thread's construction to
    /// finish, in which case the caller re-reads the slot. Fails with
    /// `CircularDependency` if waiting would close a cycle.
    pub(crate) fn claim(
        &self,
        slot: SlotId,
        chain: &ResolutionChain<'_>,
    ) -> DiResult<Option<InitClaim<'_>>> {
        let me = thread::current().id();
        let mut graph = self.graph.lock();

        let Some(&owner) = graph.owners.get(&slot) else {
            graph.owners.insert(slot, me);
            return Ok(Some(InitClaim { owner: self, slot }));
        };

        let mut path = chain.path();
        if owner == me {
            // re-entered on the same thread through a fresh top-level resolve
            path.push(slot.0);
            return Err(DiError::CircularDependency(path));
        }

        // follow owner -> awaited slot -> its owner; reaching us is a cycle
        let mut current = owner;
        for _ in 0..=graph.waiting.len() {
            let Some(&awaited) = graph.waiting.get(&current) else {
                break;
            };
            path.push(awaited.0);
            match graph.owners.get(&awaited) {
                Some(&next) if next == me => return Err(DiError::CircularDependency(path)),
                Some(&next) => current = next,
                None => break,
            }
        }

        graph.waiting.insert(me, slot);
        while graph.owners.get(&slot) == Some(&owner) {
            self.released.wait(&mut graph);
        }
        graph.waiting.remove(&me);
        Ok(None)
    }
}

impl Drop for InitClaim<'_> {
    fn drop(&mut self) {
        self.owner.graph.lock().owners.remove(&self.slot);
        self.owner.released.notify_all();
    }
}
