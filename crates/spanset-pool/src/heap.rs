//! Heap-backed node storage.
//!
//! [`HeapNodes`] boxes every node individually and tracks the boxes in a
//! slot table with per-slot generations. It is the overflow tier of a
//! [`NodePool`](crate::NodePool) and can also back a span set on its own
//! when no slab is wanted.

use spanset_core::Span;

use crate::alloc::NodeAlloc;
use crate::node::{Node, NodeId, Tier};
use crate::stats::PoolStats;

struct HeapSlot {
    generation: u32,
    node: Option<Box<Node>>,
}

/// Generational table of individually boxed nodes.
///
/// Releasing a node frees its box and returns the slot index to a free
/// list. The slot's generation increments on release, so a stale
/// [`NodeId`] no longer resolves. A slot whose generation wraps to zero is
/// retired instead of recycled.
#[derive(Default)]
pub struct HeapNodes {
    slots: Vec<HeapSlot>,
    free_list: Vec<u32>,
    live: usize,
    allocations: u64,
}

impl HeapNodes {
    /// Create an empty table.
    pub const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_list: Vec::new(),
            live: 0,
            allocations: 0,
        }
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.live
    }

    /// Whether no nodes are live.
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    fn slot(&self, id: NodeId) -> &HeapSlot {
        assert!(
            id.tier == Tier::Heap,
            "{id} does not belong to heap node storage"
        );
        let slot = self
            .slots
            .get(id.index as usize)
            .unwrap_or_else(|| panic!("{id} is out of range for heap node storage"));
        assert!(
            slot.generation == id.generation && slot.node.is_some(),
            "{id} is stale (slot generation {})",
            slot.generation
        );
        slot
    }

    fn slot_mut(&mut self, id: NodeId) -> &mut HeapSlot {
        self.slot(id);
        &mut self.slots[id.index as usize]
    }

    fn vacate(slot: &mut HeapSlot, index: u32, free_list: &mut Vec<u32>) {
        slot.node = None;
        slot.generation = slot.generation.wrapping_add(1);
        // A wrapped generation would let a handle from epoch 0 resolve again.
        if slot.generation != 0 {
            free_list.push(index);
        }
    }
}

impl NodeAlloc for HeapNodes {
    fn allocate(&mut self, span: Span) -> NodeId {
        let node = Some(Box::new(Node::new(span)));
        self.live += 1;
        self.allocations += 1;
        if let Some(index) = self.free_list.pop() {
            let slot = &mut self.slots[index as usize];
            slot.node = node;
            NodeId::new(Tier::Heap, index, slot.generation)
        } else {
            let index = u32::try_from(self.slots.len())
                .unwrap_or_else(|_| panic!("heap node storage exceeded u32::MAX slots"));
            self.slots.push(HeapSlot {
                generation: 0,
                node,
            });
            NodeId::new(Tier::Heap, index, 0)
        }
    }

    fn release(&mut self, id: NodeId) {
        self.slot_mut(id);
        let slot = &mut self.slots[id.index as usize];
        Self::vacate(slot, id.index, &mut self.free_list);
        self.live -= 1;
    }

    fn get(&self, id: NodeId) -> &Node {
        match self.slot(id).node.as_deref() {
            Some(node) => node,
            None => unreachable!("slot() rejects vacant slots"),
        }
    }

    fn get_mut(&mut self, id: NodeId) -> &mut Node {
        match self.slot_mut(id).node.as_deref_mut() {
            Some(node) => node,
            None => unreachable!("slot() rejects vacant slots"),
        }
    }

    fn reset(&mut self) {
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.node.is_some() {
                Self::vacate(slot, index as u32, &mut self.free_list);
            }
        }
        self.live = 0;
    }

    fn stats(&self) -> PoolStats {
        PoolStats {
            capacity: 0,
            live_pool: 0,
            live_heap: self.live,
            pool_hits: 0,
            heap_fallbacks: self.allocations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(low: u64) -> Span {
        Span::new(low, low + 1)
    }

    #[test]
    fn allocate_get_round_trip() {
        let mut heap = HeapNodes::new();
        let id = heap.allocate(span(10));
        assert_eq!(id.tier(), Tier::Heap);
        assert_eq!(heap.get(id).span, span(10));
        assert_eq!(heap.len(), 1);
    }

    #[test]
    fn get_mut_modifies_node() {
        let mut heap = HeapNodes::new();
        let id = heap.allocate(span(1));
        heap.get_mut(id).span.high = 50;
        assert_eq!(heap.get(id).span, Span::new(1, 50));
    }

    #[test]
    fn release_recycles_slot_with_new_generation() {
        let mut heap = HeapNodes::new();
        let a = heap.allocate(span(1));
        heap.release(a);
        assert!(heap.is_empty());
        let b = heap.allocate(span(2));
        assert_eq!(a.index(), b.index());
        assert_eq!(b.generation(), a.generation() + 1);
    }

    #[test]
    #[should_panic(expected = "stale")]
    fn stale_id_panics() {
        let mut heap = HeapNodes::new();
        let a = heap.allocate(span(1));
        heap.release(a);
        let _ = heap.get(a);
    }

    #[test]
    #[should_panic(expected = "stale")]
    fn double_release_panics() {
        let mut heap = HeapNodes::new();
        let a = heap.allocate(span(1));
        heap.release(a);
        heap.release(a);
    }

    #[test]
    #[should_panic(expected = "does not belong")]
    fn pool_tier_id_panics() {
        let heap = HeapNodes::new();
        let _ = heap.get(NodeId::new(Tier::Pool, 0, 0));
    }

    #[test]
    fn reset_invalidates_every_live_id() {
        let mut heap = HeapNodes::new();
        let ids: Vec<_> = (0..4).map(|i| heap.allocate(span(i))).collect();
        heap.reset();
        assert!(heap.is_empty());
        let fresh = heap.allocate(span(9));
        assert!(ids.iter().all(|id| id.generation() != fresh.generation()));
        assert_eq!(heap.stats().heap_fallbacks, 5);
        assert_eq!(heap.stats().live_heap, 1);
    }

    #[test]
    fn generation_exhaustion_retires_slot() {
        let mut heap = HeapNodes::new();
        let a = heap.allocate(span(1));
        heap.release(a);

        heap.slots[0].generation = u32::MAX;
        let b = heap.allocate(span(2));
        assert_eq!(b.index(), 0);
        assert_eq!(b.generation(), u32::MAX);

        heap.release(b);
        assert_eq!(heap.slots[0].generation, 0);
        assert!(
            !heap.free_list.contains(&0),
            "slot with wrapped generation must be retired, not recycled"
        );

        let c = heap.allocate(span(3));
        assert_ne!(c.index(), 0, "retired slot must not be reused");
    }
}
