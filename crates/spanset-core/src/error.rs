//! Error types for span construction.

use std::error::Error;
use std::fmt;

/// Errors from building a [`Span`](crate::Span) out of untrusted bounds.
///
/// The span-set hot path treats malformed spans as contract violations and
/// panics; this type exists for the policy layer above it, which validates
/// ranges before handing them down.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SpanError {
    /// `low >= high`: the range covers no bytes or is inverted.
    Empty {
        /// Requested low bound.
        low: u64,
        /// Requested high bound.
        high: u64,
    },
    /// `base + len` does not fit in a `u64`.
    Overflow {
        /// Requested base address.
        base: u64,
        /// Requested length in bytes.
        len: u64,
    },
}

impl fmt::Display for SpanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { low, high } => {
                write!(f, "empty span: low 0x{low:x} is not below high 0x{high:x}")
            }
            Self::Overflow { base, len } => {
                write!(f, "span overflows address space: base 0x{base:x}, len {len}")
            }
        }
    }
}

impl Error for SpanError {}
