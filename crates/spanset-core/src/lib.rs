//! Core types for the spanset workspace.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! half-open byte range [`Span`], the owning [`ParticipantId`], and the
//! error returned when a span is built from untrusted bounds.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod id;
pub mod span;

pub use error::SpanError;
pub use id::ParticipantId;
pub use span::Span;
