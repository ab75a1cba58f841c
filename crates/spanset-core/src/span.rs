//! Half-open byte ranges and the predicates the span set is built on.
//!
//! A [`Span`] covers `[low, high)`: the high bound is excluded. The three
//! ordered predicates ([`Span::mergeable`], [`Span::overlaps`],
//! [`Span::contains`]) take `self` as the span that sorts first by `low`;
//! calling them the other way round is a contract violation.

use std::fmt;

use crate::error::SpanError;

/// A half-open byte range `[low, high)` with `low < high`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Span {
    /// First byte covered.
    pub low: u64,
    /// One past the last byte covered.
    pub high: u64,
}

impl Span {
    /// Build a span from trusted bounds.
    ///
    /// # Panics
    ///
    /// Panics if `low >= high`.
    #[inline]
    pub fn new(low: u64, high: u64) -> Self {
        assert!(
            low < high,
            "invalid span: low 0x{low:x} must be below high 0x{high:x}"
        );
        Self { low, high }
    }

    /// Build a span from untrusted bounds.
    pub fn try_new(low: u64, high: u64) -> Result<Self, SpanError> {
        if low < high {
            Ok(Self { low, high })
        } else {
            Err(SpanError::Empty { low, high })
        }
    }

    /// Build the span `[base, base + len)`.
    pub fn from_len(base: u64, len: u64) -> Result<Self, SpanError> {
        let high = base
            .checked_add(len)
            .ok_or(SpanError::Overflow { base, len })?;
        Self::try_new(base, high)
    }

    /// Number of bytes covered.
    #[inline]
    pub fn len(&self) -> u64 {
        self.high - self.low
    }

    /// Always false for a well-formed span; present for API symmetry with `len`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.low >= self.high
    }

    /// Whether `addr` lies inside the span.
    #[inline]
    pub fn contains_addr(&self, addr: u64) -> bool {
        self.low <= addr && addr < self.high
    }

    /// Whether `self` and `later` touch or overlap and should be combined.
    ///
    /// `self` must sort at or before `later` by `low`.
    #[inline]
    pub fn mergeable(&self, later: &Span) -> bool {
        debug_assert!(self.low <= later.low, "mergeable() called out of order");
        self.low == later.low || self.high >= later.low
    }

    /// Whether `self` and `later` share at least one byte.
    ///
    /// Touching at the boundary does not count: `[a, b)` and `[b, c)` are
    /// disjoint. `self` must sort at or before `later` by `low`.
    #[inline]
    pub fn overlaps(&self, later: &Span) -> bool {
        debug_assert!(self.low <= later.low, "overlaps() called out of order");
        self.low == later.low || self.high > later.low
    }

    /// Whether `self` covers every byte of `later`.
    ///
    /// `self` must sort at or before `later` by `low`.
    #[inline]
    pub fn contains(&self, later: &Span) -> bool {
        debug_assert!(self.low <= later.low, "contains() called out of order");
        self.low <= later.low && self.high >= later.high
    }

    /// Order-independent overlap test.
    #[inline]
    pub fn intersects(&self, other: &Span) -> bool {
        if self.low <= other.low {
            self.overlaps(other)
        } else {
            other.overlaps(self)
        }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:x} - 0x{:x}", self.low, self.high)
    }
}

impl From<Span> for std::ops::Range<u64> {
    fn from(s: Span) -> Self {
        s.low..s.high
    }
}

impl TryFrom<std::ops::Range<u64>> for Span {
    type Error = SpanError;

    fn try_from(r: std::ops::Range<u64>) -> Result<Self, Self::Error> {
        Self::try_new(r.start, r.end)
    }
}
