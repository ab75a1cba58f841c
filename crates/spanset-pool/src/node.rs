//! List nodes and the handles that address them.
//!
//! A [`NodeId`] names a node inside one allocator. It records which tier
//! the node lives in, its slot index, and the slot generation at the time
//! of allocation. Releasing a slot bumps its generation, so a handle kept
//! past its node's release no longer resolves.

use std::fmt;

use spanset_core::Span;

/// Which allocator tier a node lives in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tier {
    /// In the fixed slab of a [`NodePool`](crate::NodePool).
    Pool,
    /// In heap-backed storage ([`HeapNodes`](crate::HeapNodes)).
    Heap,
}

/// Generational handle to a [`Node`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[must_use]
pub struct NodeId {
    pub(crate) tier: Tier,
    pub(crate) index: u32,
    pub(crate) generation: u32,
}

impl NodeId {
    pub(crate) fn new(tier: Tier, index: u32, generation: u32) -> Self {
        Self {
            tier,
            index,
            generation,
        }
    }

    /// The tier this node was allocated from.
    pub fn tier(&self) -> Tier {
        self.tier
    }

    /// Slot index within its tier.
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Slot generation when the node was allocated.
    pub fn generation(&self) -> u32 {
        self.generation
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "NodeId({:?}, idx={}, gen={})",
            self.tier, self.index, self.generation
        )
    }
}

/// One tracked span, doubly linked to its ordered neighbours.
///
/// Links are handles into the same allocator that owns the node; a node
/// never links across span sets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Node {
    /// The span this node tracks.
    pub span: Span,
    /// Predecessor in ascending `low` order.
    pub prev: Option<NodeId>,
    /// Successor in ascending `low` order.
    pub next: Option<NodeId>,
}

impl Node {
    /// An unlinked node holding `span`.
    pub fn new(span: Span) -> Self {
        Self {
            span,
            prev: None,
            next: None,
        }
    }

    /// A cleared node occupying a free slot. Its zero span can never
    /// belong to a live node.
    pub(crate) fn vacant() -> Self {
        Self {
            span: Span { low: 0, high: 0 },
            prev: None,
            next: None,
        }
    }
}
