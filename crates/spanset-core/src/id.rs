//! Strongly-typed participant identifier.

use std::fmt;

/// Identifies a participant (node or execution context) in the
/// distributed runtime.
///
/// Every span set belongs to exactly one participant. Participants are
/// numbered densely from zero, so `ParticipantId(n)` also indexes
/// per-participant tables sized by the registry configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParticipantId(pub u32);

impl ParticipantId {
    /// The id as a table index.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ParticipantId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}
