//! Bounded factory of node pools.
//!
//! A [`PoolRegistry`] hands out one [`NodePool`] per span set, up to
//! `max_participants * sets_per_participant` pools in total. Claiming takes
//! `&mut self`, so every claim is serialized by whoever owns the registry;
//! typically all span sets are built at boot before worker threads start.

use indexmap::IndexMap;
use spanset_core::ParticipantId;

use crate::config::RegistryConfig;
use crate::error::{ConfigError, RegistryError};
use crate::pool::NodePool;

/// Hands out node pools against a fixed budget.
///
/// Pools are built on claim and move into the claiming span set. They are
/// never handed back: dropping a set drops its pool, and the registry's
/// budget is not replenished.
pub struct PoolRegistry {
    config: RegistryConfig,
    claimed: usize,
    /// Pools claimed per participant, in first-claim order.
    by_participant: IndexMap<ParticipantId, u32>,
}

impl PoolRegistry {
    /// Create a registry after validating `config`.
    pub fn new(config: RegistryConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            claimed: 0,
            by_participant: IndexMap::new(),
        })
    }

    /// Claim the next pool on behalf of `participant`.
    pub fn claim(&mut self, participant: ParticipantId) -> Result<NodePool, RegistryError> {
        if participant.0 >= self.config.max_participants {
            return Err(RegistryError::UnknownParticipant {
                participant,
                max_participants: self.config.max_participants,
            });
        }
        if self.claimed >= self.capacity() {
            return Err(RegistryError::Exhausted {
                capacity: self.capacity(),
            });
        }

        self.claimed += 1;
        let sets = self.by_participant.entry(participant).or_insert(0);
        *sets += 1;
        if *sets > self.config.sets_per_participant {
            tracing::warn!(
                %participant,
                sets = *sets,
                expected = self.config.sets_per_participant,
                "participant claimed more pools than it was sized for"
            );
        }
        tracing::info!(
            %participant,
            pool = self.claimed - 1,
            slots = self.config.pool_slots,
            "node pool claimed"
        );
        Ok(NodePool::new(&self.config))
    }

    /// The configuration this registry was built with.
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Total pools this registry can hand out.
    pub fn capacity(&self) -> usize {
        self.config.max_pools()
    }

    /// Pools handed out so far.
    pub fn claimed(&self) -> usize {
        self.claimed
    }

    /// Pools still available.
    pub fn remaining(&self) -> usize {
        self.capacity() - self.claimed
    }

    /// Pools claimed by `participant`.
    pub fn sets_for(&self, participant: ParticipantId) -> u32 {
        self.by_participant.get(&participant).copied().unwrap_or(0)
    }

    /// Participants that have claimed at least one pool, in first-claim order.
    pub fn participants(&self) -> impl Iterator<Item = ParticipantId> + '_ {
        self.by_participant.keys().copied()
    }
}

impl Default for PoolRegistry {
    fn default() -> Self {
        Self {
            config: RegistryConfig::default(),
            claimed: 0,
            by_participant: IndexMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alloc::NodeAlloc;

    fn small(participants: u32, sets: u32) -> PoolRegistry {
        let mut config = RegistryConfig::new(participants);
        config.sets_per_participant = sets;
        config.pool_slots = 8;
        PoolRegistry::new(config).unwrap()
    }

    #[test]
    fn invalid_config_rejected() {
        assert_eq!(
            PoolRegistry::new(RegistryConfig::new(0)).err(),
            Some(ConfigError::ZeroParticipants)
        );
    }

    #[test]
    fn claims_count_down_to_exhaustion() {
        let mut reg = small(2, 1);
        assert_eq!(reg.capacity(), 2);
        reg.claim(ParticipantId(0)).unwrap();
        reg.claim(ParticipantId(1)).unwrap();
        assert_eq!(reg.remaining(), 0);
        assert_eq!(
            reg.claim(ParticipantId(0)).err(),
            Some(RegistryError::Exhausted { capacity: 2 })
        );
        assert_eq!(reg.claimed(), 2);
    }

    #[test]
    fn out_of_range_participant_rejected() {
        let mut reg = small(2, 3);
        assert_eq!(
            reg.claim(ParticipantId(2)).err(),
            Some(RegistryError::UnknownParticipant {
                participant: ParticipantId(2),
                max_participants: 2,
            })
        );
        assert_eq!(reg.claimed(), 0);
    }

    #[test]
    fn per_participant_counts_tracked_in_claim_order() {
        let mut reg = small(4, 3);
        reg.claim(ParticipantId(3)).unwrap();
        reg.claim(ParticipantId(1)).unwrap();
        reg.claim(ParticipantId(3)).unwrap();
        assert_eq!(reg.sets_for(ParticipantId(3)), 2);
        assert_eq!(reg.sets_for(ParticipantId(1)), 1);
        assert_eq!(reg.sets_for(ParticipantId(0)), 0);
        let order: Vec<_> = reg.participants().collect();
        assert_eq!(order, vec![ParticipantId(3), ParticipantId(1)]);
    }

    #[test]
    fn claimed_pool_uses_configured_slots() {
        let mut reg = small(1, 1);
        let pool = reg.claim(ParticipantId(0)).unwrap();
        assert_eq!(pool.capacity(), 8);
        assert_eq!(pool.stats().capacity, 8);
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            RegistryError::Exhausted { capacity: 6 }.to_string(),
            "pool registry exhausted: all 6 pools claimed"
        );
    }
}
