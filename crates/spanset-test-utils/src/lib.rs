//! Test utilities for spanset development.
//!
//! Provides a byte-level [`ReferenceSet`] that answers every span-set
//! question by brute force, plus proptest strategies for spans and
//! insert/remove/overlap operation sequences.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod model;
pub mod ops;

pub use model::ReferenceSet;
pub use ops::{deterministic_ops, op_sequence, span_in, SpanOp};
