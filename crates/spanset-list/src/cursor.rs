//! Forward traversal over a span list.
//!
//! A [`Cursor`] is a plain position, not a borrow: it stays meaningful only
//! while the list it came from is not mutated. Reaching one requires a
//! `&SpanList`, which [`SpanSet`](crate::SpanSet) only hands out inside an
//! [`AtomicSection`](crate::AtomicSection).

use std::iter::FusedIterator;

use spanset_core::Span;
use spanset_pool::{NodeAlloc, NodeId};

use crate::list::SpanList;

/// A position in a [`SpanList`], or the past-the-end position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cursor(Option<NodeId>);

impl Cursor {
    /// The past-the-end position.
    pub const END: Cursor = Cursor(None);

    pub(crate) fn at(node: Option<NodeId>) -> Self {
        Self(node)
    }

    /// The node under the cursor, if any.
    pub fn node(&self) -> Option<NodeId> {
        self.0
    }

    /// Whether this is the past-the-end position.
    pub fn is_end(&self) -> bool {
        self.0.is_none()
    }
}

/// Iterator over the spans of a [`SpanList`] in ascending order.
pub struct Iter<'a, A: NodeAlloc> {
    list: &'a SpanList<A>,
    cursor: Option<NodeId>,
    remaining: usize,
}

impl<'a, A: NodeAlloc> Iter<'a, A> {
    pub(crate) fn new(list: &'a SpanList<A>) -> Self {
        Self {
            list,
            cursor: list.begin().node(),
            remaining: list.len(),
        }
    }
}

impl<A: NodeAlloc> Iterator for Iter<'_, A> {
    type Item = Span;

    fn next(&mut self) -> Option<Span> {
        let id = self.cursor?;
        let node = self.list.node(id);
        self.cursor = node.next;
        self.remaining = self.remaining.saturating_sub(1);
        Some(node.span)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<A: NodeAlloc> ExactSizeIterator for Iter<'_, A> {}

impl<A: NodeAlloc> FusedIterator for Iter<'_, A> {}

impl<'a, A: NodeAlloc> IntoIterator for &'a SpanList<A> {
    type Item = Span;
    type IntoIter = Iter<'a, A>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
