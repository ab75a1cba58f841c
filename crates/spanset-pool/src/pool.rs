//! Fixed-capacity node slab with heap overflow.
//!
//! [`NodePool`] owns `pool_slots` reusable node slots and a used/free
//! bitmap. Allocation takes the first free slot; once every slot is in use
//! it falls through to a [`HeapNodes`] overflow tier. Releasing a
//! slab-backed node only clears its slot and bit.
//!
//! Slots live in [`NodePool::PAGE_ALIGN`]-aligned pages, each a whole
//! number of bytes of that alignment, so no two pools ever touch the same
//! page.

use std::mem::size_of;

use spanset_core::Span;

use crate::alloc::NodeAlloc;
use crate::config::RegistryConfig;
use crate::heap::HeapNodes;
use crate::node::{Node, NodeId, Tier};
use crate::stats::PoolStats;

const WORD_BITS: usize = u64::BITS as usize;

/// Slots held by one [`SlotPage`].
pub(crate) const SLOTS_PER_PAGE: usize = NodePool::PAGE_ALIGN / size_of::<PoolSlot>();

/// One reusable slab slot.
struct PoolSlot {
    generation: u32,
    /// Set once the generation has wrapped; the slot is never handed out
    /// again.
    retired: bool,
    node: Node,
}

impl PoolSlot {
    fn vacant() -> Self {
        Self {
            generation: 0,
            retired: false,
            node: Node::vacant(),
        }
    }
}

/// A page-aligned, page-sized block of slots.
#[repr(C, align(4096))]
struct SlotPage {
    slots: [PoolSlot; SLOTS_PER_PAGE],
}

const _: () = assert!(std::mem::align_of::<SlotPage>() == NodePool::PAGE_ALIGN);
const _: () = assert!(size_of::<SlotPage>() == NodePool::PAGE_ALIGN);

impl SlotPage {
    fn vacant() -> Self {
        Self {
            slots: std::array::from_fn(|_| PoolSlot::vacant()),
        }
    }
}

/// Slab-cached node storage owned by exactly one span set.
///
/// The slab never grows. Its slots are stored in page-aligned blocks, so
/// the slot storage of two pools never shares a page of up to
/// [`PAGE_ALIGN`](Self::PAGE_ALIGN) bytes.
pub struct NodePool {
    pages: Vec<SlotPage>,
    capacity: usize,
    /// Bit `i` set means slot `i` is in use or retired.
    used: Vec<u64>,
    overflow: HeapNodes,
    live: usize,
    retired: usize,
    pool_hits: u64,
    heap_fallbacks: u64,
    overflowed: bool,
}

impl NodePool {
    /// Alignment and size granularity of slot storage, in bytes.
    ///
    /// [`RegistryConfig::page_size`] may not exceed it.
    pub const PAGE_ALIGN: usize = 4096;

    /// Create a pool with `config.pool_slots` slots.
    pub fn new(config: &RegistryConfig) -> Self {
        let capacity = config.pool_slots as usize;
        let pages = (0..config.slot_pages()).map(|_| SlotPage::vacant()).collect();
        Self {
            pages,
            capacity,
            used: vec![0; capacity.div_ceil(WORD_BITS)],
            overflow: HeapNodes::new(),
            live: 0,
            retired: 0,
            pool_hits: 0,
            heap_fallbacks: 0,
            overflowed: false,
        }
    }

    /// Number of slab slots.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Slots permanently withdrawn after their generation wrapped.
    pub fn retired(&self) -> usize {
        self.retired
    }

    fn slot(&self, index: usize) -> &PoolSlot {
        &self.pages[index / SLOTS_PER_PAGE].slots[index % SLOTS_PER_PAGE]
    }

    fn slot_mut(&mut self, index: usize) -> &mut PoolSlot {
        &mut self.pages[index / SLOTS_PER_PAGE].slots[index % SLOTS_PER_PAGE]
    }

    /// Index of the first free slot, scanning the bitmap a word at a time.
    fn first_free(&self) -> Option<usize> {
        self.used
            .iter()
            .enumerate()
            .find(|(_, word)| **word != u64::MAX)
            .map(|(w, word)| w * WORD_BITS + word.trailing_ones() as usize)
            .filter(|&index| index < self.capacity)
    }

    fn is_used(&self, index: usize) -> bool {
        self.used[index / WORD_BITS] & (1 << (index % WORD_BITS)) != 0
    }

    fn set_used(&mut self, index: usize, used: bool) {
        let bit = 1u64 << (index % WORD_BITS);
        if used {
            self.used[index / WORD_BITS] |= bit;
        } else {
            self.used[index / WORD_BITS] &= !bit;
        }
    }

    /// Validate a slab id and return its slot index.
    fn checked_index(&self, id: NodeId) -> usize {
        let index = id.index as usize;
        assert!(
            index < self.capacity,
            "{id} lies outside this pool's {} slots",
            self.capacity
        );
        let slot = self.slot(index);
        assert!(
            self.is_used(index) && !slot.retired && slot.generation == id.generation,
            "{id} is stale (slot generation {})",
            slot.generation
        );
        index
    }

    /// Empty a live slot and bump its generation. A slot whose generation
    /// wraps keeps its used bit and is retired.
    fn vacate(&mut self, index: usize) {
        let slot = self.slot_mut(index);
        slot.node = Node::vacant();
        slot.generation = slot.generation.wrapping_add(1);
        if slot.generation == 0 {
            slot.retired = true;
            self.retired += 1;
            tracing::debug!(slot = index, "pool slot generation wrapped, retiring slot");
        } else {
            self.set_used(index, false);
        }
        self.live -= 1;
    }
}

impl NodeAlloc for NodePool {
    fn allocate(&mut self, span: Span) -> NodeId {
        if let Some(index) = self.first_free() {
            self.set_used(index, true);
            self.live += 1;
            self.pool_hits += 1;
            let slot = self.slot_mut(index);
            slot.node = Node::new(span);
            return NodeId::new(Tier::Pool, index as u32, slot.generation);
        }

        if !self.overflowed {
            self.overflowed = true;
            tracing::warn!(
                capacity = self.capacity,
                "node pool exhausted, spilling to heap"
            );
        }
        self.heap_fallbacks += 1;
        let id = self.overflow.allocate(span);
        tracing::trace!(%span, %id, "heap node allocated");
        id
    }

    fn release(&mut self, id: NodeId) {
        match id.tier {
            Tier::Pool => {
                let index = self.checked_index(id);
                self.vacate(index);
            }
            Tier::Heap => self.overflow.release(id),
        }
    }

    fn get(&self, id: NodeId) -> &Node {
        match id.tier {
            Tier::Pool => &self.slot(self.checked_index(id)).node,
            Tier::Heap => self.overflow.get(id),
        }
    }

    fn get_mut(&mut self, id: NodeId) -> &mut Node {
        match id.tier {
            Tier::Pool => {
                let index = self.checked_index(id);
                &mut self.slot_mut(index).node
            }
            Tier::Heap => self.overflow.get_mut(id),
        }
    }

    fn reset(&mut self) {
        for index in 0..self.capacity {
            if self.is_used(index) && !self.slot(index).retired {
                self.vacate(index);
            }
        }
        self.overflow.reset();
    }

    fn stats(&self) -> PoolStats {
        PoolStats {
            capacity: self.capacity,
            live_pool: self.live,
            live_heap: self.overflow.len(),
            pool_hits: self.pool_hits,
            heap_fallbacks: self.heap_fallbacks,
        }
    }
}
