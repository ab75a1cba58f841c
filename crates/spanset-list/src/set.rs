//! Thread-safe span sets and explicit atomic sections.
//!
//! [`SpanSet`] wraps a [`SpanList`] in a `Mutex`. Each public call locks
//! exactly once and runs the non-locking core, so the interior split in
//! `remove` (which re-enters `insert`) never needs a reentrant lock.
//!
//! A caller that needs several calls to appear as one atomic step takes an
//! [`AtomicSection`] with [`SpanSet::atomic_start`]. The section holds the
//! lock and dereferences to the list, so the bundled calls go straight to
//! the core without relocking:
//!
//! ```
//! use spanset_core::{ParticipantId, Span};
//! use spanset_list::SpanSet;
//! use spanset_pool::HeapNodes;
//!
//! let set = SpanSet::with_allocator(ParticipantId(0), HeapNodes::new());
//! let mut section = set.atomic_start();
//! if !section.overlaps(Span::new(0x1000, 0x2000)) {
//!     section.insert(Span::new(0x1000, 0x2000));
//! }
//! section.atomic_end();
//! assert_eq!(set.size(), 1);
//! ```

use std::fmt;
use std::ops::{Deref, DerefMut};
use std::sync::{Mutex, MutexGuard};

use smallvec::SmallVec;
use spanset_core::{ParticipantId, Span};
use spanset_pool::{NodeAlloc, NodePool, PoolRegistry, PoolStats, RegistryError};

use crate::list::SpanList;

/// A concurrent, self-merging set of spans for one participant.
///
/// All operations on one set are serialized by its lock in acquisition
/// order. Distinct sets share nothing, so no call ever holds two sets'
/// locks.
///
/// # Deadlocks
///
/// The lock is not reentrant. While a thread holds an [`AtomicSection`],
/// it must issue calls through the section, not through the set.
pub struct SpanSet<A: NodeAlloc = NodePool> {
    participant: ParticipantId,
    list: Mutex<SpanList<A>>,
}

// Compile-time assertion: pool-backed sets are shareable across threads.
const _: fn() = || {
    fn assert<T: Send + Sync>() {}
    assert::<SpanSet>();
};

impl SpanSet<NodePool> {
    /// Create an empty set backed by the next pool in `registry`.
    ///
    /// Registry exhaustion means the registry was sized too small for the
    /// system; callers normally treat the error as fatal at boot.
    pub fn new(
        registry: &mut PoolRegistry,
        participant: ParticipantId,
    ) -> Result<Self, RegistryError> {
        let pool = registry.claim(participant)?;
        Ok(Self::with_allocator(participant, pool))
    }
}

impl<A: NodeAlloc> SpanSet<A> {
    /// Create an empty set over caller-supplied node storage.
    pub fn with_allocator(participant: ParticipantId, alloc: A) -> Self {
        Self {
            participant,
            list: Mutex::new(SpanList::new(participant, alloc)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SpanList<A>> {
        // A poisoned lock means a panic interrupted a merge or split; the
        // list can no longer be trusted.
        self.list.lock().unwrap_or_else(|_| {
            panic!(
                "span set for participant {} poisoned by an earlier panic",
                self.participant
            )
        })
    }

    /// The participant this set belongs to.
    pub fn participant(&self) -> ParticipantId {
        self.participant
    }

    /// Add `span`, merging it with everything it touches.
    ///
    /// # Panics
    ///
    /// Panics if `span.low >= span.high`.
    pub fn insert(&self, span: Span) {
        self.lock().insert(span);
    }

    /// Remove every byte of `span`, trimming or splitting tracked spans.
    ///
    /// # Panics
    ///
    /// Panics if `span.low >= span.high`.
    pub fn remove(&self, span: Span) {
        self.lock().remove(span);
    }

    /// Whether any tracked span shares a byte with `span`.
    ///
    /// # Panics
    ///
    /// Panics if `span.low >= span.high`.
    pub fn overlaps(&self, span: Span) -> bool {
        self.lock().overlaps(span)
    }

    /// Number of tracked (maximally merged) spans.
    pub fn size(&self) -> usize {
        self.lock().len()
    }

    /// Whether no spans are tracked.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Drop every tracked span.
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Copy of the tracked spans in ascending order, taken under the lock.
    pub fn spans(&self) -> SmallVec<[Span; 8]> {
        self.lock().spans()
    }

    /// Allocation counters for this set's node storage.
    pub fn pool_stats(&self) -> PoolStats {
        self.lock().pool_stats()
    }

    /// Write the diagnostic dump to stdout under the lock.
    pub fn print(&self) {
        print!("{}", *self.lock());
    }

    /// Lock the set until the returned section is ended or dropped.
    pub fn atomic_start(&self) -> AtomicSection<'_, A> {
        AtomicSection { guard: self.lock() }
    }

    /// Consume the set, returning the list core.
    pub fn into_inner(self) -> SpanList<A> {
        let participant = self.participant;
        self.list.into_inner().unwrap_or_else(|_| {
            panic!("span set for participant {participant} poisoned by an earlier panic")
        })
    }
}

impl<A: NodeAlloc> fmt::Display for SpanSet<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&*self.lock(), f)
    }
}

impl<A: NodeAlloc> fmt::Debug for SpanSet<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.list.try_lock() {
            Ok(list) => fmt::Debug::fmt(&*list, f),
            Err(_) => f
                .debug_struct("SpanSet")
                .field("participant", &self.participant)
                .finish_non_exhaustive(),
        }
    }
}

/// Exclusive access to a [`SpanSet`] spanning several operations.
///
/// Dereferences to the underlying [`SpanList`], which also exposes the
/// cursor API (`begin`/`next`/`end`/`get_span`) and `iter`. The lock is
/// released by [`atomic_end`](Self::atomic_end) or on drop.
#[must_use = "dropping the section immediately releases the lock"]
pub struct AtomicSection<'a, A: NodeAlloc = NodePool> {
    guard: MutexGuard<'a, SpanList<A>>,
}

impl<A: NodeAlloc> AtomicSection<'_, A> {
    /// Release the lock.
    pub fn atomic_end(self) {}
}

impl<A: NodeAlloc> Deref for AtomicSection<'_, A> {
    type Target = SpanList<A>;

    fn deref(&self) -> &SpanList<A> {
        &self.guard
    }
}

impl<A: NodeAlloc> DerefMut for AtomicSection<'_, A> {
    fn deref_mut(&mut self) -> &mut SpanList<A> {
        &mut self.guard
    }
}
