//! Slab-cached node allocation for span sets.
//!
//! Every span set links its spans through [`Node`]s addressed by
//! generational [`NodeId`] handles. Nodes come from a [`NodeAlloc`]
//! implementation; the default is a [`NodePool`], a fixed slab that
//! overflows into heap-backed storage once full.
//!
//! # Architecture
//!
//! ```text
//! PoolRegistry (bounded factory, max_participants × sets_per_participant)
//! └── NodePool × N (one per span set, moved into the set on claim)
//!     ├── pages: Vec<SlotPage>      fixed capacity, 4096-byte aligned blocks
//!     ├── used:  Vec<u64>           used/free bitmap
//!     └── overflow: HeapNodes       Box<Node> per entry once the slab is full
//! ```
//!
//! The hot path (allocate/release while merging or splitting spans) stays
//! inside the slab as long as the set holds fewer spans than the pool has
//! slots. Exhaustion is never an error: allocation falls through to the
//! heap tier and the fallback is counted in [`PoolStats`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod alloc;
pub mod config;
pub mod error;
pub mod heap;
pub mod node;
pub mod pool;
pub mod registry;
pub mod stats;

pub use alloc::NodeAlloc;
pub use config::RegistryConfig;
pub use error::{ConfigError, RegistryError};
pub use heap::HeapNodes;
pub use node::{Node, NodeId, Tier};
pub use pool::NodePool;
pub use registry::PoolRegistry;
pub use stats::PoolStats;
