//! Property-based invariant tests for span compression and column mapping.
//!
//! 1. Spans cover `[0, n)` exactly: sorted, contiguous, non-overlapping.
//! 2. Adjacent compressed spans never share a status.
//! 3. Split mode yields exactly `n` spans.
//! 4. Compression is deterministic.
//! 5. The midpoint of each partition's region maps back to that partition.
//! 6. Columns painted for a span that owns column centres hit-test back into that span.
//! 7. Selection operations: `Add` is a duplicate-free superset, `Subtract` is disjoint from the range.

use ahash::{AHashMap, AHashSet};
use proptest::prelude::*;
use pstrip_core::geometry::Rect;
use pstrip_widgets::coords::{column_index, index_at, span_columns};
use pstrip_widgets::span::{split_spans, spans_by};
use pstrip_widgets::{PartitionState, SelectionOp, Span, partitions_to_spans};

// ── Helpers ─────────────────────────────────────────────────────────────

fn state_strategy() -> impl Strategy<Value = PartitionState> {
    prop::sample::select(PartitionState::ALL.to_vec())
}

fn names(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("2024-01-{i:04}")).collect()
}

fn assert_covering(spans: &[Span], n: usize) -> Result<(), TestCaseError> {
    if n == 0 {
        prop_assert!(spans.is_empty());
        return Ok(());
    }
    prop_assert_eq!(spans.first().map(|s| s.start_idx), Some(0));
    prop_assert_eq!(spans.last().map(|s| s.end_idx), Some(n - 1));
    for span in spans {
        prop_assert!(span.start_idx <= span.end_idx);
    }
    for pair in spans.windows(2) {
        prop_assert_eq!(pair[1].start_idx, pair[0].end_idx + 1);
    }
    Ok(())
}

// ── Compression ─────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn spans_partition_the_index_range(states in prop::collection::vec(state_strategy(), 0..200)) {
        let spans = spans_by(states.len(), |i| states[i]);
        assert_covering(&spans, states.len())?;
        for pair in spans.windows(2) {
            prop_assert_ne!(pair[0].status, pair[1].status);
        }
        for span in &spans {
            for idx in span.start_idx..=span.end_idx {
                prop_assert_eq!(states[idx], span.status);
            }
        }
    }

    #[test]
    fn split_mode_has_one_span_per_partition(states in prop::collection::vec(state_strategy(), 0..200)) {
        let spans = split_spans(states.len(), |i| states[i]);
        prop_assert_eq!(spans.len(), states.len());
        assert_covering(&spans, states.len())?;
    }

    #[test]
    fn named_compression_is_deterministic(
        states in prop::collection::vec(prop::option::of(state_strategy()), 0..120)
    ) {
        let names = names(states.len());
        let map: AHashMap<String, PartitionState> = names
            .iter()
            .zip(&states)
            .filter_map(|(name, state)| state.map(|s| (name.clone(), s)))
            .collect();
        let first = partitions_to_spans(&names, &map);
        let second = partitions_to_spans(&names, &map);
        prop_assert_eq!(&first, &second);
        assert_covering(&first, names.len())?;
        for span in &first {
            let expected = states[span.start_idx].unwrap_or_default();
            prop_assert_eq!(span.status, expected);
        }
    }
}

// ── Coordinates ─────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn midpoint_maps_back(count in 1usize..2000, left in -500.0f64..500.0, width in 1.0f64..4000.0) {
        for idx in [0, count / 2, count - 1] {
            let mid = left + (idx as f64 + 0.5) * width / count as f64;
            prop_assert_eq!(index_at(mid, left, width, count), Some(idx));
        }
    }

    #[test]
    fn owned_columns_hit_back(count in 1usize..300, width in 1u16..240, x in 0u16..50) {
        let area = Rect::new(x, 0, width, 1);
        let mut painted = 0u32;
        for idx in 0..count {
            let cols = span_columns(idx, idx, count, width);
            prop_assert!(cols.start < cols.end);
            prop_assert!(cols.end <= width);
            let owns_centre = (cols.start..cols.end)
                .any(|c| column_index(area, x + c, count) == Some(idx));
            if owns_centre {
                painted += u32::from(cols.end - cols.start);
                for c in cols {
                    prop_assert_eq!(column_index(area, x + c, count), Some(idx));
                }
            }
        }
        prop_assert!(painted <= u32::from(width));
    }

    #[test]
    fn column_index_is_monotonic(count in 1usize..500, width in 1u16..200) {
        let area = Rect::new(0, 0, width, 1);
        let indices: Vec<usize> = (0..width)
            .map(|c| column_index(area, c, count).unwrap())
            .collect();
        for pair in indices.windows(2) {
            prop_assert!(pair[0] <= pair[1]);
        }
        prop_assert!(indices.iter().all(|&i| i < count));
    }
}

// ── Selection ───────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn selection_ops_respect_membership(
        selected in prop::collection::vec(0usize..20, 0..12),
        lo in 0usize..20,
        len in 1usize..8,
    ) {
        let selected: Vec<String> = {
            let mut seen = AHashSet::new();
            selected.into_iter().filter(|i| seen.insert(*i)).map(|i| format!("p{i}")).collect()
        };
        let range: Vec<String> = (lo..lo + len).map(|i| format!("p{i}")).collect();

        let added = SelectionOp::Add.apply(&selected, &range);
        let unique: AHashSet<&String> = added.iter().collect();
        prop_assert_eq!(unique.len(), added.len());
        prop_assert!(selected.iter().all(|s| added.contains(s)));
        prop_assert!(range.iter().all(|r| added.contains(r)));
        prop_assert_eq!(&added[..selected.len()], &selected[..]);

        let subtracted = SelectionOp::Subtract.apply(&selected, &range);
        prop_assert!(subtracted.iter().all(|s| !range.contains(s)));
        prop_assert!(subtracted.iter().all(|s| selected.contains(s)));

        let op = SelectionOp::decide(&range, &selected, true);
        let all_selected = range.iter().all(|r| selected.contains(r));
        prop_assert_eq!(op == SelectionOp::Subtract, all_selected);
        prop_assert_eq!(SelectionOp::decide(&range, &selected, false), SelectionOp::Replace);
    }
}
