//! Self-merging, self-splitting span sets.
//!
//! A span set tracks the byte ranges a participant currently holds (fetched
//! for read, fetched for write, pending release, ...). It keeps them sorted
//! and maximally merged, answers overlap queries by probing two
//! neighbours, and splits ranges when an interior piece is released.
//!
//! # Layers
//!
//! ```text
//! SpanSet<A>                 Mutex, one lock per set, Send + Sync
//! └── SpanList<A>            non-locking core: seek / insert / remove / overlaps
//!     └── A: NodeAlloc       NodePool (slab + heap overflow) or HeapNodes
//! ```
//!
//! # Contract
//!
//! Callers are trusted. A span with `low >= high`, a stale cursor, or a
//! corrupted list is a contract violation and panics; there is no
//! recoverable error path on the hot operations.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod cursor;
pub mod error;
pub mod list;
pub mod set;

pub use cursor::{Cursor, Iter};
pub use error::InvariantError;
pub use list::SpanList;
pub use set::{AtomicSection, SpanSet};
