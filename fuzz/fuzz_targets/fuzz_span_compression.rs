#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use pstrip_core::geometry::Rect;
use pstrip_widgets::PartitionState;
use pstrip_widgets::coords::{column_index, midpoint_column, span_columns};
use pstrip_widgets::span::{spans_by, split_spans};

#[derive(Debug, Arbitrary)]
struct Input {
    states: Vec<u8>,
    width: u16,
    split: bool,
}

fuzz_target!(|input: Input| {
    if input.states.len() > 4096 || input.width > 2048 {
        return;
    }
    let all = PartitionState::ALL;
    let states: Vec<PartitionState> = input
        .states
        .iter()
        .map(|b| all[*b as usize % all.len()])
        .collect();
    let n = states.len();

    let spans = if input.split {
        split_spans(n, |idx| states[idx])
    } else {
        spans_by(n, |idx| states[idx])
    };

    // Spans tile 0..n exactly.
    let mut next = 0;
    for span in &spans {
        assert_eq!(span.start_idx, next);
        assert!(span.end_idx >= span.start_idx);
        assert!(span.contains(span.start_idx) && span.contains(span.end_idx));
        next = span.end_idx + 1;
    }
    assert_eq!(next, n);
    if !input.split {
        for pair in spans.windows(2) {
            assert_ne!(pair[0].status, pair[1].status);
        }
    }

    let width = input.width;
    if n == 0 || width == 0 {
        return;
    }
    let area = Rect::from_size(width, 1);

    // Drawn ranges stay on screen; a span at least one column wide owns
    // every column it draws.
    for span in &spans {
        let cols = span_columns(span.start_idx, span.end_idx, n, width);
        assert!(!cols.is_empty());
        assert!(cols.end <= width);
        if span.len() * width as usize >= n {
            for col in cols {
                let idx = column_index(area, col, n).expect("column inside area");
                assert!(span.contains(idx));
            }
        }
    }

    // Every column belongs to exactly one partition, in non-decreasing order.
    let mut prev = 0;
    for col in 0..width {
        let idx = column_index(area, col, n).expect("column inside area");
        assert!(idx < n && idx >= prev);
        prev = idx;
    }

    for idx in [0, n / 2, n - 1] {
        let col = midpoint_column(idx, n, width).expect("valid index");
        assert!(col < width);
    }
});
