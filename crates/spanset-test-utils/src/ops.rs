//! Operation generators.

use proptest::prelude::*;
use proptest::strategy::ValueTree;
use proptest::test_runner::TestRunner;

use spanset_core::Span;

/// One call against a span set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpanOp {
    Insert(Span),
    Remove(Span),
    Overlaps(Span),
}

/// Spans lying inside `[0, universe)`.
///
/// # Panics
///
/// Panics if `universe < 2`.
pub fn span_in(universe: u64) -> impl Strategy<Value = Span> {
    assert!(universe >= 2, "universe must hold at least one span");
    (0..universe - 1)
        .prop_flat_map(move |low| (Just(low), low + 1..=universe))
        .prop_map(|(low, high)| Span::new(low, high))
}

/// Insert-heavy mixes of operations over `[0, universe)`.
pub fn op_sequence(
    universe: u64,
    len: impl Into<proptest::collection::SizeRange>,
) -> impl Strategy<Value = Vec<SpanOp>> {
    let op = prop_oneof![
        3 => span_in(universe).prop_map(SpanOp::Insert),
        2 => span_in(universe).prop_map(SpanOp::Remove),
        1 => span_in(universe).prop_map(SpanOp::Overlaps),
    ];
    proptest::collection::vec(op, len)
}

/// A fixed, reproducible operation sequence for benches and stress tests.
pub fn deterministic_ops(count: usize, universe: u64) -> Vec<SpanOp> {
    let mut runner = TestRunner::deterministic();
    op_sequence(universe, count)
        .new_tree(&mut runner)
        .map(|tree| tree.current())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic_ops_are_reproducible() {
        let a = deterministic_ops(64, 1 << 16);
        let b = deterministic_ops(64, 1 << 16);
        assert_eq!(a.len(), 64);
        assert_eq!(a, b);
    }

    proptest! {
        #[test]
        fn spans_stay_inside_universe(span in span_in(100)) {
            prop_assert!(span.low < span.high);
            prop_assert!(span.high <= 100);
        }
    }
}
