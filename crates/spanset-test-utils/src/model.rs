//! Brute-force span set over individual bytes.

use std::collections::BTreeSet;

use spanset_core::Span;

/// Tracks covered bytes one by one.
///
/// Only suitable for small address universes; every operation is linear in
/// the bytes it touches.
#[derive(Clone, Debug, Default)]
pub struct ReferenceSet {
    bytes: BTreeSet<u64>,
}

impl ReferenceSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, span: Span) {
        self.bytes.extend(span.low..span.high);
    }

    pub fn remove(&mut self, span: Span) {
        for b in span.low..span.high {
            self.bytes.remove(&b);
        }
    }

    pub fn overlaps(&self, span: Span) -> bool {
        self.bytes.range(span.low..span.high).next().is_some()
    }

    pub fn clear(&mut self) {
        self.bytes.clear();
    }

    /// Covered bytes as maximal runs, which is exactly what a correctly
    /// merged span set must hold.
    pub fn spans(&self) -> Vec<Span> {
        let mut out: Vec<Span> = Vec::new();
        for &b in &self.bytes {
            match out.last_mut() {
                Some(last) if last.high == b => last.high = b + 1,
                _ => out.push(Span::new(b, b + 1)),
            }
        }
        out
    }

    /// Number of maximal runs.
    pub fn len(&self) -> usize {
        self.spans().len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adjacent_inserts_form_one_run() {
        let mut r = ReferenceSet::new();
        r.insert(Span::new(0, 4));
        r.insert(Span::new(4, 8));
        assert_eq!(r.spans(), vec![Span::new(0, 8)]);
    }

    #[test]
    fn interior_remove_splits_run() {
        let mut r = ReferenceSet::new();
        r.insert(Span::new(0, 10));
        r.remove(Span::new(3, 5));
        assert_eq!(r.spans(), vec![Span::new(0, 3), Span::new(5, 10)]);
        assert!(!r.overlaps(Span::new(3, 5)));
        assert!(r.overlaps(Span::new(4, 6)));
    }
}
