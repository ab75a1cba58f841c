//! Integration test: the prelude covers a full registry-to-dump workflow.

use spanset::prelude::*;

#[test]
fn prelude_workflow() {
    let mut config = RegistryConfig::default();
    config.pool_slots = 2;
    let mut registry = PoolRegistry::new(config).unwrap();
    let set = SpanSet::new(&mut registry, ParticipantId(3)).unwrap();

    for i in 0..4u64 {
        set.insert(Span::new(i * 10, i * 10 + 5));
    }
    let stats: PoolStats = set.pool_stats();
    assert_eq!(stats.live_pool, 2);
    assert_eq!(stats.live_heap, 2);

    assert_eq!(
        set.to_string(),
        "List for participant 3 contains 4 span(s)\n  \
         0x0 - 0x5\n  0xa - 0xf\n  0x14 - 0x19\n  0x1e - 0x23\n"
    );

    let list: SpanList = set.into_inner();
    assert_eq!(list.validate(), Ok(()));
    let mut cursor: Cursor = list.begin();
    let mut lows = Vec::new();
    while cursor != list.end() {
        lows.push(list.get_span(cursor).low);
        cursor = list.next(cursor);
    }
    assert_eq!(lows, vec![0, 10, 20, 30]);
}

#[test]
fn prelude_errors_render() {
    assert_eq!(
        PoolRegistry::new(RegistryConfig::new(0)).err(),
        Some(ConfigError::ZeroParticipants)
    );
    assert!(matches!(Span::try_new(4, 4), Err(SpanError::Empty { .. })));

    let mut registry = PoolRegistry::new(RegistryConfig::new(1)).unwrap();
    assert!(matches!(
        SpanSet::new(&mut registry, ParticipantId(1)),
        Err(RegistryError::UnknownParticipant { .. })
    ));
}
