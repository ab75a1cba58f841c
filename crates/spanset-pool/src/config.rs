//! Pool registry configuration parameters.

use crate::error::ConfigError;
use crate::pool::{NodePool, SLOTS_PER_PAGE};

/// Build-time sizing for node pools and the registry that hands them out.
///
/// Validated by [`PoolRegistry::new`](crate::PoolRegistry::new); all values
/// are immutable once the registry exists.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Node slots in each pool's fixed slab.
    ///
    /// Default: 128. A set holding more spans than this spills the excess
    /// into heap-backed storage.
    pub pool_slots: u32,

    /// Number of participants the registry serves.
    ///
    /// Default: 32. Participant ids must lie in `0..max_participants`.
    pub max_participants: u32,

    /// Span sets each participant is expected to create.
    ///
    /// Default: 3 (fetched-for-read, fetched-for-write, pending-release).
    pub sets_per_participant: u32,

    /// Hardware page size, in bytes, that pools must not share.
    ///
    /// Default: 4096. Must be a power of two no larger than
    /// [`NodePool::PAGE_ALIGN`].
    pub page_size: usize,
}

impl RegistryConfig {
    /// Default slab size per pool.
    pub const DEFAULT_POOL_SLOTS: u32 = 128;

    /// Default participant limit.
    pub const DEFAULT_MAX_PARTICIPANTS: u32 = 32;

    /// Default span sets per participant.
    pub const DEFAULT_SETS_PER_PARTICIPANT: u32 = 3;

    /// Default page size.
    pub const DEFAULT_PAGE_SIZE: usize = 4096;

    /// Create a config for `max_participants` participants.
    ///
    /// Uses default values for all other parameters.
    pub fn new(max_participants: u32) -> Self {
        Self {
            pool_slots: Self::DEFAULT_POOL_SLOTS,
            max_participants,
            sets_per_participant: Self::DEFAULT_SETS_PER_PARTICIPANT,
            page_size: Self::DEFAULT_PAGE_SIZE,
        }
    }

    /// Total pools the registry can hand out.
    ///
    /// Saturates on overflow; [`validate()`](Self::validate) rejects such
    /// configs.
    pub fn max_pools(&self) -> usize {
        (self.max_participants as usize).saturating_mul(self.sets_per_participant as usize)
    }

    /// Page-aligned slot blocks each pool allocates.
    pub fn slot_pages(&self) -> usize {
        (self.pool_slots as usize).div_ceil(SLOTS_PER_PAGE)
    }

    /// Slots backed by [`slot_pages()`](Self::slot_pages), of which the
    /// first `pool_slots` are used.
    pub fn reserved_slots(&self) -> usize {
        self.slot_pages() * SLOTS_PER_PAGE
    }

    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pool_slots == 0 {
            return Err(ConfigError::ZeroPoolSlots);
        }
        if self.max_participants == 0 {
            return Err(ConfigError::ZeroParticipants);
        }
        if self.sets_per_participant == 0 {
            return Err(ConfigError::ZeroSetsPerParticipant);
        }
        if !self.page_size.is_power_of_two() {
            return Err(ConfigError::InvalidPageSize {
                page_size: self.page_size,
            });
        }
        if self.page_size > NodePool::PAGE_ALIGN {
            return Err(ConfigError::PageSizeTooLarge {
                page_size: self.page_size,
                max: NodePool::PAGE_ALIGN,
            });
        }
        (self.max_participants as usize)
            .checked_mul(self.sets_per_participant as usize)
            .ok_or(ConfigError::PoolCountOverflow)?;
        Ok(())
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_PARTICIPANTS)
    }
}
