//! The non-locking span list core.
//!
//! [`SpanList`] keeps its spans in a doubly linked list of allocator-owned
//! nodes, ordered ascending by `low` and maximally merged: no two
//! neighbours are adjacent or overlapping. Every public mutation
//! re-establishes that invariant before returning.
//!
//! ```text
//!   insert [0x2000, 0x3000)
//!
//!   [0x1000,0x2000) <-> [0x3000,0x4000)        before
//!   [0x1000,0x2000) <-> [0x2000,0x3000) <-> [0x3000,0x4000)   spliced
//!   [0x1000,0x3000) <-> [0x3000,0x4000)        merged backward (once)
//!   [0x1000,0x4000)                            merged forward (until no change)
//! ```

use std::fmt;

use smallvec::SmallVec;
use spanset_core::{ParticipantId, Span};
use spanset_pool::{Node, NodeAlloc, NodeId, NodePool, PoolStats};

use crate::cursor::{Cursor, Iter};
use crate::error::InvariantError;

/// An ordered, maximally merged set of spans without internal locking.
///
/// This is the algorithmic core behind [`SpanSet`](crate::SpanSet). Use it
/// directly when the caller already guarantees exclusive access.
pub struct SpanList<A: NodeAlloc = NodePool> {
    alloc: A,
    head: Option<NodeId>,
    tail: Option<NodeId>,
    len: usize,
    participant: ParticipantId,
}

impl<A: NodeAlloc> SpanList<A> {
    /// Create an empty list whose nodes come from `alloc`.
    pub fn new(participant: ParticipantId, alloc: A) -> Self {
        Self {
            alloc,
            head: None,
            tail: None,
            len: 0,
            participant,
        }
    }

    /// The participant this list tracks spans for.
    pub fn participant(&self) -> ParticipantId {
        self.participant
    }

    /// Number of spans (nodes) in the list.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the list holds no spans.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Allocation counters for this list's node storage.
    pub fn pool_stats(&self) -> PoolStats {
        self.alloc.stats()
    }

    #[inline]
    pub(crate) fn node(&self, id: NodeId) -> &Node {
        self.alloc.get(id)
    }

    #[inline]
    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        self.alloc.get_mut(id)
    }

    #[inline]
    fn span(&self, id: NodeId) -> Span {
        self.node(id).span
    }

    /// First node whose `low` is at or after `span.low`, or `None` if `span`
    /// belongs after the tail.
    fn seek(&self, span: &Span) -> Option<NodeId> {
        let mut cur = self.head;
        while let Some(id) = cur {
            let node = self.node(id);
            if node.span.low >= span.low {
                break;
            }
            cur = node.next;
        }
        cur
    }

    /// Link the unlinked node `id` directly before `successor`, or at the
    /// tail when `successor` is `None`.
    fn link_before(&mut self, id: NodeId, successor: Option<NodeId>) {
        let prev = match successor {
            Some(next) => self.node(next).prev,
            None => self.tail,
        };
        {
            let node = self.node_mut(id);
            node.prev = prev;
            node.next = successor;
        }
        match prev {
            Some(p) => self.node_mut(p).next = Some(id),
            None => self.head = Some(id),
        }
        match successor {
            Some(next) => self.node_mut(next).prev = Some(id),
            None => self.tail = Some(id),
        }
        self.len += 1;
    }

    /// Absorb `b` into its direct predecessor `a`; returns `a`.
    fn merge(&mut self, a: NodeId, b: NodeId) -> NodeId {
        let a_node = *self.node(a);
        let b_node = *self.node(b);
        assert!(
            a_node.next == Some(b) && b_node.prev == Some(a) && a_node.span.low <= b_node.span.low,
            "merge of non-adjacent nodes {} and {}",
            a_node.span,
            b_node.span
        );

        let merged = Span {
            low: a_node.span.low,
            high: a_node.span.high.max(b_node.span.high),
        };
        tracing::debug!(
            participant = %self.participant,
            a = %a_node.span,
            b = %b_node.span,
            %merged,
            "merging spans"
        );

        {
            let node = self.node_mut(a);
            node.span = merged;
            node.next = b_node.next;
        }
        match b_node.next {
            Some(next) => self.node_mut(next).prev = Some(a),
            None => self.tail = Some(a),
        }
        self.alloc.release(b);
        self.len -= 1;
        a
    }

    /// Unlink and free `id`; returns its former successor.
    fn delete(&mut self, id: NodeId) -> Option<NodeId> {
        let node = *self.node(id);
        tracing::debug!(participant = %self.participant, span = %node.span, "deleting span");

        match node.prev {
            Some(p) => self.node_mut(p).next = node.next,
            None => self.head = node.next,
        }
        match node.next {
            Some(n) => self.node_mut(n).prev = node.prev,
            None => self.tail = node.prev,
        }
        self.alloc.release(id);
        self.len -= 1;
        node.next
    }

    /// Add `span`, merging it with every span it touches or overlaps.
    ///
    /// # Panics
    ///
    /// Panics if `span.low >= span.high`.
    pub fn insert(&mut self, span: Span) {
        assert_well_formed(&span);

        let id = self.alloc.allocate(span);
        let successor = self.seek(&span);
        self.link_before(id, successor);

        // A new span can touch at most one predecessor, since predecessors
        // are already maximally merged and start strictly below span.low.
        let mut cur = id;
        if let Some(prev) = self.node(cur).prev {
            if self.span(prev).mergeable(&span) {
                cur = self.merge(prev, cur);
            }
        }

        // It can bridge any number of successors.
        while let Some(next) = self.node(cur).next {
            if !self.span(cur).mergeable(&self.span(next)) {
                break;
            }
            cur = self.merge(cur, next);
        }

        self.debug_validate();
    }

    /// Remove every byte of `span` from the set, trimming or splitting the
    /// spans it intersects.
    ///
    /// # Panics
    ///
    /// Panics if `span.low >= span.high`.
    pub fn remove(&mut self, span: Span) {
        assert_well_formed(&span);
        if self.head.is_none() {
            return;
        }

        let mut cur = self.seek(&span);
        let prev = match cur {
            Some(c) => self.node(c).prev,
            None => self.tail,
        };

        // The predecessor starts strictly below span.low, so it is never
        // wholly inside span: either its tail is cut off or span is an
        // interior hole.
        if let Some(prev) = prev {
            let prev_span = self.span(prev);
            if prev_span.overlaps(&span) {
                if prev_span.high <= span.high {
                    let trimmed = Span::new(prev_span.low, span.low);
                    tracing::debug!(
                        participant = %self.participant,
                        from = %prev_span,
                        to = %trimmed,
                        "trimming span"
                    );
                    self.node_mut(prev).span.high = span.low;
                } else {
                    let left = Span::new(prev_span.low, span.low);
                    let right = Span::new(span.high, prev_span.high);
                    tracing::debug!(
                        participant = %self.participant,
                        from = %prev_span,
                        %left,
                        %right,
                        "splitting span"
                    );
                    self.delete(prev);
                    self.insert(left);
                    self.insert(right);
                }
            }
        }

        // Successors start at or after span.low, so span is never an
        // interior hole of one: it either swallows it or cuts its head.
        while let Some(c) = cur {
            let cur_span = self.span(c);
            if !span.overlaps(&cur_span) {
                break;
            }
            if span.contains(&cur_span) {
                cur = self.delete(c);
            } else {
                let trimmed = Span::new(span.high, cur_span.high);
                tracing::debug!(
                    participant = %self.participant,
                    from = %cur_span,
                    to = %trimmed,
                    "trimming span"
                );
                self.node_mut(c).span.low = span.high;
                break;
            }
        }

        self.debug_validate();
    }

    /// Whether any tracked span shares a byte with `span`.
    ///
    /// Only the seek position's two neighbours can intersect `span`, given
    /// the list is sorted and maximally merged.
    ///
    /// # Panics
    ///
    /// Panics if `span.low >= span.high`.
    pub fn overlaps(&self, span: Span) -> bool {
        assert_well_formed(&span);
        let Some(tail) = self.tail else {
            return false;
        };
        match self.seek(&span) {
            None => self.span(tail).overlaps(&span),
            Some(next) => {
                span.overlaps(&self.span(next))
                    || self
                        .node(next)
                        .prev
                        .is_some_and(|prev| self.span(prev).overlaps(&span))
            }
        }
    }

    /// Drop every span, resetting the node storage in one pass.
    pub fn clear(&mut self) {
        tracing::debug!(participant = %self.participant, spans = self.len, "clearing list");
        self.alloc.reset();
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    /// Cursor at the first span, or [`end()`](Self::end) when empty.
    pub fn begin(&self) -> Cursor {
        Cursor::at(self.head)
    }

    /// Cursor one past `cursor`. Advancing the end cursor stays at the end.
    pub fn next(&self, cursor: Cursor) -> Cursor {
        Cursor::at(cursor.node().and_then(|id| self.node(id).next))
    }

    /// The past-the-end cursor.
    pub fn end(&self) -> Cursor {
        Cursor::END
    }

    /// The span under `cursor`.
    ///
    /// # Panics
    ///
    /// Panics if `cursor` is the end cursor or no longer names a node of
    /// this list.
    pub fn get_span(&self, cursor: Cursor) -> Span {
        match cursor.node() {
            Some(id) => self.span(id),
            None => panic!("get_span() called on the end cursor"),
        }
    }

    /// Iterate the spans in ascending order.
    pub fn iter(&self) -> Iter<'_, A> {
        Iter::new(self)
    }

    /// Copy the spans out in ascending order.
    pub fn spans(&self) -> SmallVec<[Span; 8]> {
        self.iter().collect()
    }

    /// Walk the list and check every structural invariant.
    pub fn validate(&self) -> Result<(), InvariantError> {
        let mut counted = 0usize;
        let mut prev: Option<NodeId> = None;
        let mut cur = self.head;
        while let Some(id) = cur {
            if counted > self.len {
                return Err(InvariantError::SizeMismatch {
                    recorded: self.len,
                    counted,
                });
            }
            let node = self.node(id);
            if node.prev != prev {
                return Err(InvariantError::BrokenLink { span: node.span });
            }
            if node.span.low >= node.span.high {
                return Err(InvariantError::Malformed { span: node.span });
            }
            if let Some(p) = prev {
                let prev_span = self.span(p);
                if prev_span.low >= node.span.low {
                    return Err(InvariantError::Unordered {
                        prev: prev_span,
                        next: node.span,
                    });
                }
                if prev_span.mergeable(&node.span) {
                    return Err(InvariantError::Unmerged {
                        prev: prev_span,
                        next: node.span,
                    });
                }
            }
            counted += 1;
            prev = cur;
            cur = node.next;
        }
        if self.tail != prev {
            return Err(InvariantError::BrokenTail);
        }
        if counted != self.len {
            return Err(InvariantError::SizeMismatch {
                recorded: self.len,
                counted,
            });
        }
        Ok(())
    }

    #[inline]
    fn debug_validate(&self) {
        if cfg!(debug_assertions) {
            if let Err(e) = self.validate() {
                panic!("span list for participant {} corrupted: {e}", self.participant);
            }
        }
    }
}

impl<A: NodeAlloc> fmt::Display for SpanList<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "List for participant {} contains {} span(s)",
            self.participant, self.len
        )?;
        for span in self.iter() {
            writeln!(f, "  {span}")?;
        }
        Ok(())
    }
}

impl<A: NodeAlloc> fmt::Debug for SpanList<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpanList")
            .field("participant", &self.participant)
            .field("spans", &self.spans())
            .finish()
    }
}

#[inline]
fn assert_well_formed(span: &Span) {
    assert!(
        span.low < span.high,
        "invalid span: low 0x{:x} must be below high 0x{:x}",
        span.low,
        span.high
    );
}
