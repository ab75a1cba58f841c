//! Allocation counters for node storage.

/// Occupancy and allocation counters for one span set's node storage.
///
/// Counters are cumulative over the allocator's lifetime; live counts
/// reflect the moment the snapshot was taken.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PoolStats {
    /// Number of slots in the fixed slab (0 for heap-only storage).
    pub capacity: usize,
    /// Nodes currently occupying slab slots.
    pub live_pool: usize,
    /// Nodes currently living in heap-backed storage.
    pub live_heap: usize,
    /// Allocations served from the slab.
    pub pool_hits: u64,
    /// Allocations that fell through to the heap.
    pub heap_fallbacks: u64,
}

impl PoolStats {
    /// Total live nodes across both tiers.
    pub fn live(&self) -> usize {
        self.live_pool + self.live_heap
    }

    /// Fraction of allocations served from the slab, or `None` before the
    /// first allocation.
    pub fn hit_rate(&self) -> Option<f64> {
        let total = self.pool_hits + self.heap_fallbacks;
        if total == 0 {
            None
        } else {
            Some(self.pool_hits as f64 / total as f64)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_stats_are_zero() {
        let s = PoolStats::default();
        assert_eq!(s.live(), 0);
        assert_eq!(s.hit_rate(), None);
    }

    #[test]
    fn hit_rate_counts_both_tiers() {
        let s = PoolStats {
            capacity: 4,
            live_pool: 3,
            live_heap: 1,
            pool_hits: 3,
            heap_fallbacks: 1,
        };
        assert_eq!(s.live(), 4);
        assert_eq!(s.hit_rate(), Some(0.75));
    }
}
