//! Property tests: long random insert/remove/overlap sequences checked
//! against a byte-level reference model after every step.

use proptest::prelude::*;
use spanset_core::{ParticipantId, Span};
use spanset_list::SpanList;
use spanset_pool::{HeapNodes, NodeAlloc, NodePool, RegistryConfig};
use spanset_test_utils::{op_sequence, span_in, ReferenceSet, SpanOp};

fn pooled(slots: u32) -> SpanList {
    let mut config = RegistryConfig::new(1);
    config.pool_slots = slots;
    SpanList::new(ParticipantId(0), NodePool::new(&config))
}

fn check_against_model<A: NodeAlloc>(
    list: &mut SpanList<A>,
    ops: &[SpanOp],
) -> Result<(), TestCaseError> {
    let mut model = ReferenceSet::new();
    for &op in ops {
        match op {
            SpanOp::Insert(span) => {
                list.insert(span);
                model.insert(span);
            }
            SpanOp::Remove(span) => {
                list.remove(span);
                model.remove(span);
            }
            SpanOp::Overlaps(span) => {
                prop_assert_eq!(list.overlaps(span), model.overlaps(span), "query {}", span);
            }
        }
        prop_assert_eq!(list.validate(), Ok(()));
        prop_assert_eq!(list.iter().collect::<Vec<_>>(), model.spans());
        prop_assert_eq!(list.len(), list.iter().count());
        prop_assert_eq!(list.pool_stats().live(), list.len());
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn pooled_list_matches_model(ops in op_sequence(256, 1..300)) {
        check_against_model(&mut pooled(8), &ops)?;
    }

    #[test]
    fn heap_list_matches_model(ops in op_sequence(64, 1..200)) {
        let mut list = SpanList::new(ParticipantId(0), HeapNodes::new());
        check_against_model(&mut list, &ops)?;
    }

    #[test]
    fn insert_is_union_idempotent(
        spans in proptest::collection::vec(span_in(512), 1..40),
    ) {
        let mut forward = pooled(16);
        for &span in &spans {
            forward.insert(span);
        }
        let mut twice = pooled(16);
        for &span in spans.iter().rev().chain(spans.iter()) {
            twice.insert(span);
        }
        prop_assert_eq!(forward.spans(), twice.spans());
    }

    #[test]
    fn interior_remove_yields_two_spans(
        base in 0u64..1 << 40,
        left in 1u64..4096,
        hole in 1u64..4096,
        right in 1u64..4096,
    ) {
        let outer = Span::new(base, base + left + hole + right);
        let inner = Span::new(base + left, base + left + hole);
        let mut list = pooled(4);
        list.insert(outer);
        list.remove(inner);
        let spans = list.spans();
        prop_assert_eq!(
            spans.as_slice(),
            &[Span::new(outer.low, inner.low), Span::new(inner.high, outer.high)]
        );
    }

    #[test]
    fn overlaps_agrees_with_full_scan(
        inserts in proptest::collection::vec(span_in(1024), 0..30),
        removes in proptest::collection::vec(span_in(1024), 0..10),
        query in span_in(1024),
    ) {
        let mut list = pooled(8);
        for span in inserts {
            list.insert(span);
        }
        for span in removes {
            list.remove(span);
        }
        let scanned = list.iter().any(|tracked| tracked.intersects(&query));
        prop_assert_eq!(list.overlaps(query), scanned);
    }
}

#[test]
fn long_deterministic_run_keeps_invariants() {
    let ops = spanset_test_utils::deterministic_ops(5_000, 1024);
    let mut list = pooled(32);
    let mut model = ReferenceSet::new();
    for op in ops {
        match op {
            SpanOp::Insert(span) => {
                list.insert(span);
                model.insert(span);
            }
            SpanOp::Remove(span) => {
                list.remove(span);
                model.remove(span);
            }
            SpanOp::Overlaps(span) => assert_eq!(list.overlaps(span), model.overlaps(span)),
        }
    }
    assert_eq!(list.validate(), Ok(()));
    assert_eq!(list.iter().collect::<Vec<_>>(), model.spans());
}
