//! Pool and registry error types.

use std::error::Error;
use std::fmt;

use spanset_core::ParticipantId;

/// Errors detected by [`RegistryConfig::validate()`](crate::RegistryConfig::validate).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// `pool_slots` is zero.
    ZeroPoolSlots,
    /// `max_participants` is zero.
    ZeroParticipants,
    /// `sets_per_participant` is zero.
    ZeroSetsPerParticipant,
    /// `page_size` is not a non-zero power of two.
    InvalidPageSize {
        /// The configured page size.
        page_size: usize,
    },
    /// `page_size` exceeds the alignment of pool slot storage, so two pools
    /// could share a page.
    PageSizeTooLarge {
        /// The configured page size.
        page_size: usize,
        /// The largest supported page size.
        max: usize,
    },
    /// `max_participants * sets_per_participant` does not fit in `usize`.
    PoolCountOverflow,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroPoolSlots => write!(f, "pool_slots must be at least 1"),
            Self::ZeroParticipants => write!(f, "max_participants must be at least 1"),
            Self::ZeroSetsPerParticipant => {
                write!(f, "sets_per_participant must be at least 1")
            }
            Self::InvalidPageSize { page_size } => {
                write!(f, "page_size {page_size} is not a power of two")
            }
            Self::PageSizeTooLarge { page_size, max } => {
                write!(f, "page_size {page_size} exceeds the supported maximum of {max}")
            }
            Self::PoolCountOverflow => {
                write!(f, "max_participants * sets_per_participant overflows usize")
            }
        }
    }
}

impl Error for ConfigError {}

/// Errors from claiming a node pool out of a [`PoolRegistry`](crate::PoolRegistry).
///
/// Both variants reflect static sizing mistakes rather than runtime
/// conditions; callers are expected to treat them as fatal at boot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RegistryError {
    /// Every pool the registry was sized for has been handed out.
    Exhausted {
        /// Total pools the registry can hand out.
        capacity: usize,
    },
    /// The participant id is outside `0..max_participants`.
    UnknownParticipant {
        /// The rejected participant.
        participant: ParticipantId,
        /// Configured participant limit.
        max_participants: u32,
    },
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exhausted { capacity } => {
                write!(f, "pool registry exhausted: all {capacity} pools claimed")
            }
            Self::UnknownParticipant {
                participant,
                max_participants,
            } => {
                write!(
                    f,
                    "participant {participant} is outside the configured limit of {max_participants}"
                )
            }
        }
    }
}

impl Error for RegistryError {}
