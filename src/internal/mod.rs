//! Internal implementation details.

pub(crate) mod circular;
pub(crate) mod dispose_bag;
pub(crate) mod init_graph;

pub(crate) use circular::ResolutionChain;
pub(crate) use dispose_bag::{DisposeBag, Disposer};
pub(crate) use init_graph::{InitGraph, SlotId};
