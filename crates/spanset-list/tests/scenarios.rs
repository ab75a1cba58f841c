//! Integration test: the fetch/merge/split/clear walk-through on a
//! registry-backed set.

use spanset_core::{ParticipantId, Span};
use spanset_list::SpanSet;
use spanset_pool::{PoolRegistry, RegistryConfig};

fn s(low: u64, high: u64) -> Span {
    Span::new(low, high)
}

fn fresh_set() -> SpanSet {
    let mut registry = PoolRegistry::new(RegistryConfig::new(4)).unwrap();
    SpanSet::new(&mut registry, ParticipantId(1)).unwrap()
}

#[test]
fn fetch_merge_split_clear_walkthrough() {
    let set = fresh_set();

    // Two disjoint fetches.
    set.insert(s(0x1000, 0x2000));
    set.insert(s(0x3000, 0x4000));
    assert_eq!(set.size(), 2);

    // The gap is fetched: everything collapses into one span.
    set.insert(s(0x2000, 0x3000));
    assert_eq!(set.size(), 1);
    assert_eq!(set.spans().as_slice(), &[s(0x1000, 0x4000)]);

    // Releasing an interior piece splits it.
    set.remove(s(0x1500, 0x1800));
    assert_eq!(set.size(), 2);
    assert_eq!(
        set.spans().as_slice(),
        &[s(0x1000, 0x1500), s(0x1800, 0x4000)]
    );

    assert!(!set.overlaps(s(0x1600, 0x1700)));
    assert!(set.overlaps(s(0x1000, 0x1100)));

    set.clear();
    assert_eq!(set.size(), 0);
    assert!(!set.overlaps(s(0x1000, 0x1100)));
    assert!(!set.overlaps(s(0, u64::MAX)));
}

#[test]
fn clear_at_every_stage_empties_the_set() {
    let stages: [&[(bool, Span)]; 3] = [
        &[(true, s(0x1000, 0x2000)), (true, s(0x3000, 0x4000))],
        &[(true, s(0x1000, 0x2000)), (true, s(0x3000, 0x4000)), (true, s(0x2000, 0x3000))],
        &[
            (true, s(0x1000, 0x2000)),
            (true, s(0x3000, 0x4000)),
            (true, s(0x2000, 0x3000)),
            (false, s(0x1500, 0x1800)),
        ],
    ];
    for stage in stages {
        let set = fresh_set();
        for &(insert, span) in stage {
            if insert {
                set.insert(span);
            } else {
                set.remove(span);
            }
        }
        set.clear();
        assert_eq!(set.size(), 0);
        assert!(!set.overlaps(s(0x1000, 0x4000)));
    }
}

#[test]
fn three_sets_per_participant_are_independent() {
    let mut registry = PoolRegistry::new(RegistryConfig::new(2)).unwrap();
    let read = SpanSet::new(&mut registry, ParticipantId(0)).unwrap();
    let write = SpanSet::new(&mut registry, ParticipantId(0)).unwrap();
    let release = SpanSet::new(&mut registry, ParticipantId(0)).unwrap();
    assert_eq!(registry.sets_for(ParticipantId(0)), 3);

    read.insert(s(0, 0x1000));
    write.insert(s(0x1000, 0x2000));
    release.insert(s(0x800, 0x1800));
    release.remove(s(0x800, 0x1800));

    assert_eq!(read.spans().as_slice(), &[s(0, 0x1000)]);
    assert_eq!(write.spans().as_slice(), &[s(0x1000, 0x2000)]);
    assert!(release.is_empty());
}

#[test]
fn slab_overflow_is_transparent() {
    let mut config = RegistryConfig::new(1);
    config.pool_slots = 4;
    let mut registry = PoolRegistry::new(config).unwrap();
    let set = SpanSet::new(&mut registry, ParticipantId(0)).unwrap();

    for i in 0..32u64 {
        set.insert(s(i * 0x2000, i * 0x2000 + 0x1000));
    }
    assert_eq!(set.size(), 32);
    let stats = set.pool_stats();
    assert_eq!(stats.live_pool, 4);
    assert_eq!(stats.live_heap, 28);

    // Filling every gap merges the whole run down to one slab-backed node.
    for i in 0..31u64 {
        set.insert(s(i * 0x2000 + 0x1000, (i + 1) * 0x2000));
    }
    assert_eq!(set.spans().as_slice(), &[s(0, 31 * 0x2000 + 0x1000)]);
    assert_eq!(set.pool_stats().live(), 1);
}

#[test]
fn print_does_not_disturb_state() {
    let set = fresh_set();
    set.insert(s(0x10, 0x20));
    set.print();
    assert_eq!(set.size(), 1);
}
