//! The allocator seam between span sets and node storage.

use spanset_core::Span;

use crate::node::{Node, NodeId};
use crate::stats::PoolStats;

/// Storage for the nodes of one span set.
///
/// Implementations hand out [`NodeId`]s and resolve them back to nodes.
/// Every method that takes a `NodeId` treats an id it did not issue, or one
/// already released, as a contract violation and panics.
pub trait NodeAlloc {
    /// Allocate an unlinked node holding `span`. Never fails.
    fn allocate(&mut self, span: Span) -> NodeId;

    /// Return a node's storage to the allocator.
    fn release(&mut self, id: NodeId);

    /// Resolve a live node.
    fn get(&self, id: NodeId) -> &Node;

    /// Resolve a live node mutably.
    fn get_mut(&mut self, id: NodeId) -> &mut Node;

    /// Release every live node at once.
    fn reset(&mut self);

    /// Allocation counters and occupancy.
    fn stats(&self) -> PoolStats;
}
