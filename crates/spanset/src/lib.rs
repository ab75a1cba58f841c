//! Spanset: ordered, self-merging address-span sets for distributed shared
//! memory prefetch tracking.
//!
//! This is the facade crate that re-exports the public API of the spanset
//! sub-crates. Each participant (a node in the DSM cluster) typically keeps
//! three sets: spans read, spans written and spans pending release.
//!
//! # Quick start
//!
//! ```rust
//! use spanset::prelude::*;
//!
//! let mut registry = PoolRegistry::new(RegistryConfig::new(4)).unwrap();
//! let fetched = SpanSet::new(&mut registry, ParticipantId(0)).unwrap();
//!
//! fetched.insert(Span::new(0x1000, 0x2000));
//! fetched.insert(Span::new(0x3000, 0x4000));
//! fetched.insert(Span::new(0x2000, 0x3000));
//! assert_eq!(fetched.spans().as_slice(), &[Span::new(0x1000, 0x4000)]);
//!
//! fetched.remove(Span::new(0x1500, 0x1800));
//! assert_eq!(fetched.size(), 2);
//! assert!(!fetched.overlaps(Span::new(0x1600, 0x1700)));
//!
//! // Bundle a check and an insert into one atomic step.
//! let mut section = fetched.atomic_start();
//! if !section.overlaps(Span::new(0x8000, 0x9000)) {
//!     section.insert(Span::new(0x8000, 0x9000));
//! }
//! section.atomic_end();
//! assert_eq!(fetched.size(), 3);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `spanset-core` | `Span`, `ParticipantId`, span errors |
//! | [`pool`] | `spanset-pool` | Node pools, heap overflow, pool registry |
//! | [`list`] | `spanset-list` | `SpanList`, `SpanSet`, cursors, atomic sections |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Span and participant value types (`spanset-core`).
pub use spanset_core as types;

/// Node storage (`spanset-pool`).
///
/// [`pool::NodePool`] is the slab-cached allocator with heap overflow;
/// [`pool::PoolRegistry`] hands pools out against a fixed budget.
pub use spanset_pool as pool;

/// The span list and its thread-safe wrapper (`spanset-list`).
///
/// [`list::SpanList`] is the non-locking core; [`list::SpanSet`] adds the
/// per-set lock and [`list::AtomicSection`]s.
pub use spanset_list as list;

/// Common imports for typical spanset usage.
///
/// ```rust
/// use spanset::prelude::*;
/// ```
pub mod prelude {
    // Values
    pub use spanset_core::{ParticipantId, Span};

    // Storage
    pub use spanset_pool::{HeapNodes, NodeAlloc, NodePool, PoolRegistry, PoolStats, RegistryConfig};

    // Sets
    pub use spanset_list::{AtomicSection, Cursor, SpanList, SpanSet};

    // Errors
    pub use spanset_core::SpanError;
    pub use spanset_list::InvariantError;
    pub use spanset_pool::{ConfigError, RegistryError};
}
