//! Structural invariant violations reported by [`SpanList::validate`](crate::SpanList::validate).

use std::error::Error;
use std::fmt;

use spanset_core::Span;

/// A broken span list invariant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvariantError {
    /// A node holds a span with `low >= high`.
    Malformed {
        /// The offending span.
        span: Span,
    },
    /// Two neighbours are not strictly ascending by `low`.
    Unordered {
        /// The earlier node's span.
        prev: Span,
        /// The later node's span.
        next: Span,
    },
    /// Two neighbours touch or overlap and should have been merged.
    Unmerged {
        /// The earlier node's span.
        prev: Span,
        /// The later node's span.
        next: Span,
    },
    /// A node's `prev` link does not point at the node before it.
    BrokenLink {
        /// Span of the node with the bad link.
        span: Span,
    },
    /// The tail handle is not the last reachable node.
    BrokenTail,
    /// The recorded size differs from the reachable node count.
    SizeMismatch {
        /// Size stored in the list.
        recorded: usize,
        /// Nodes reached walking from the head.
        counted: usize,
    },
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed { span } => write!(f, "malformed span {span}"),
            Self::Unordered { prev, next } => {
                write!(f, "spans out of order: {prev} before {next}")
            }
            Self::Unmerged { prev, next } => {
                write!(f, "mergeable neighbours left unmerged: {prev} and {next}")
            }
            Self::BrokenLink { span } => write!(f, "broken prev link at {span}"),
            Self::BrokenTail => write!(f, "tail is not the last reachable node"),
            Self::SizeMismatch { recorded, counted } => {
                write!(f, "size {recorded} recorded but {counted} nodes reachable")
            }
        }
    }
}

impl Error for InvariantError {}
