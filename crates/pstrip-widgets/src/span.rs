#![forbid(unsafe_code)]

//! Run-length compression of per-partition states into spans.
//!
//! # Invariants
//!
//! For a sequence of `n > 0` partitions the produced spans:
//! 1. start at index 0 and end at index `n - 1`,
//! 2. are contiguous: each span starts one past the previous span's end,
//! 3. never have `end_idx < start_idx`,
//! 4. (compressed form only) never repeat a status in adjacent spans.
//!
//! An empty sequence yields no spans.

use ahash::AHashMap;

use crate::partition::PartitionState;

/// A contiguous run of partitions, `start_idx..=end_idx`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span<S = PartitionState> {
    pub start_idx: usize,
    pub end_idx: usize,
    pub status: S,
}

impl<S> Span<S> {
    /// Number of partitions covered.
    #[inline]
    pub const fn len(&self) -> usize {
        self.end_idx - self.start_idx + 1
    }

    /// Spans always cover at least one partition.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        false
    }

    #[inline]
    pub const fn contains(&self, idx: usize) -> bool {
        idx >= self.start_idx && idx <= self.end_idx
    }
}

/// Compress `len` statuses into maximal runs of equal status.
pub fn spans_by<S, F>(len: usize, mut status_at: F) -> Vec<Span<S>>
where
    S: PartialEq,
    F: FnMut(usize) -> S,
{
    let mut spans: Vec<Span<S>> = Vec::new();
    for idx in 0..len {
        let status = status_at(idx);
        match spans.last_mut() {
            Some(last) if last.status == status => last.end_idx = idx,
            _ => spans.push(Span {
                start_idx: idx,
                end_idx: idx,
                status,
            }),
        }
    }
    spans
}

/// One span per partition, regardless of neighbouring statuses.
pub fn split_spans<S, F>(len: usize, mut status_at: F) -> Vec<Span<S>>
where
    F: FnMut(usize) -> S,
{
    (0..len)
        .map(|idx| Span {
            start_idx: idx,
            end_idx: idx,
            status: status_at(idx),
        })
        .collect()
}

/// Compress named partitions using a name-to-state map.
///
/// Names absent from the map count as [`PartitionState::Missing`].
pub fn partitions_to_spans<N: AsRef<str>>(
    names: &[N],
    states: &AHashMap<String, PartitionState>,
) -> Vec<Span> {
    spans_by(names.len(), |idx| {
        states
            .get(names[idx].as_ref())
            .copied()
            .unwrap_or_default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use PartitionState::*;

    fn span(start_idx: usize, end_idx: usize, status: PartitionState) -> Span {
        Span {
            start_idx,
            end_idx,
            status,
        }
    }

    #[test]
    fn empty_sequence_has_no_spans() {
        let names: [&str; 0] = [];
        assert!(partitions_to_spans(&names, &AHashMap::new()).is_empty());
    }

    #[test]
    fn runs_are_merged() {
        let names = ["a", "b", "c", "d", "e"];
        let states: AHashMap<String, PartitionState> = [
            ("a", Success),
            ("b", Success),
            ("c", Failure),
            ("d", Failure),
            ("e", Success),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_owned(), v))
        .collect();
        assert_eq!(
            partitions_to_spans(&names, &states),
            vec![span(0, 1, Success), span(2, 3, Failure), span(4, 4, Success)]
        );
    }

    #[test]
    fn unmapped_names_are_missing() {
        let names = ["a", "b", "c"];
        let states: AHashMap<String, PartitionState> =
            [("c".to_owned(), Queued)].into_iter().collect();
        assert_eq!(
            partitions_to_spans(&names, &states),
            vec![span(0, 1, Missing), span(2, 2, Queued)]
        );
    }

    #[test]
    fn split_keeps_equal_neighbours_apart() {
        let spans = split_spans(3, |_| Success);
        assert_eq!(
            spans,
            vec![span(0, 0, Success), span(1, 1, Success), span(2, 2, Success)]
        );
    }

    #[test]
    fn spans_by_works_for_membership() {
        let selected = [false, true, true, false];
        let spans = spans_by(selected.len(), |i| selected[i]);
        assert_eq!(spans.len(), 3);
        assert_eq!((spans[1].start_idx, spans[1].end_idx, spans[1].status), (1, 2, true));
    }

    #[test]
    fn span_helpers() {
        let s = span(2, 5, Started);
        assert_eq!(s.len(), 4);
        assert!(!s.is_empty());
        assert!(s.contains(2) && s.contains(5));
        assert!(!s.contains(6));
    }
}
