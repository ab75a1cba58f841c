//! Benchmark fixtures for spanset.
//!
//! - [`fragmented_list`]: a list of `n` disjoint page-sized spans
//! - [`page_span`]: the span covering one page
//! - [`replay`]: apply a recorded operation sequence to a list

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use spanset_core::{ParticipantId, Span};
use spanset_list::SpanList;
use spanset_pool::{NodeAlloc, NodePool, RegistryConfig};
use spanset_test_utils::SpanOp;

/// Page granularity used by the fixtures.
pub const PAGE: u64 = 0x1000;

/// The span covering page `index`.
pub fn page_span(index: u64) -> Span {
    Span::new(index * PAGE, (index + 1) * PAGE)
}

/// A pool with `slots` slab slots and default paging.
pub fn pool(slots: u32) -> NodePool {
    let mut config = RegistryConfig::new(1);
    config.pool_slots = slots;
    NodePool::new(&config)
}

/// A list holding `n` disjoint spans: every even page in `[0, 2n)`.
pub fn fragmented_list<A: NodeAlloc>(n: u64, alloc: A) -> SpanList<A> {
    let mut list = SpanList::new(ParticipantId(0), alloc);
    for i in 0..n {
        list.insert(page_span(i * 2));
    }
    list
}

/// Apply `ops` to `list`, returning how many overlap queries hit.
pub fn replay<A: NodeAlloc>(list: &mut SpanList<A>, ops: &[SpanOp]) -> usize {
    let mut hits = 0;
    for &op in ops {
        match op {
            SpanOp::Insert(span) => list.insert(span),
            SpanOp::Remove(span) => list.remove(span),
            SpanOp::Overlaps(span) => hits += usize::from(list.overlaps(span)),
        }
    }
    hits
}
