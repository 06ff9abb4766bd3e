#![forbid(unsafe_code)]

//! Mapping between partition indices and horizontal positions.
//!
//! Spans are placed at `idx / count` of the strip width, and pointer
//! positions are mapped back with the inverse formula. A terminal column is
//! owned by the partition under its centre; [`span_columns`] and
//! [`column_index`] use exact integer arithmetic for that rule, so what is
//! drawn in a column and what a click on it hits always agree.

use std::ops::Range;

use pstrip_core::geometry::Rect;

/// Left offset of `idx` as a percentage of the strip width.
#[inline]
pub fn index_to_pct(idx: usize, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    idx as f64 * 100.0 / count as f64
}

/// Partition under a continuous horizontal position.
///
/// `floor(((client_x - left) / width) * count)`; positions left of the strip,
/// at or past its right edge, or on a degenerate strip map to `None`.
pub fn index_at(client_x: f64, left: f64, width: f64, count: usize) -> Option<usize> {
    if count == 0 || width.is_nan() || width <= 0.0 {
        return None;
    }
    let pos = ((client_x - left) * count as f64 / width).floor();
    if !pos.is_finite() || pos < 0.0 {
        return None;
    }
    let idx = pos as usize;
    (idx < count).then_some(idx)
}

/// Partition owning absolute column `column` of `area`.
pub fn column_index(area: Rect, column: u16, count: usize) -> Option<usize> {
    if count == 0 || area.width == 0 || !area.contains_x(column) {
        return None;
    }
    let rel = (column - area.x) as u64;
    let idx = ((2 * rel + 1) * count as u64) / (2 * area.width as u64);
    Some(idx as usize)
}

/// First relative column whose centre lies at or right of partition
/// boundary `boundary` (the left edge of index `boundary`).
fn first_column_from(boundary: usize, count: usize, width: u16) -> u16 {
    let lhs = 2 * boundary as u64 * width as u64;
    let n = count as u64;
    if lhs <= n {
        return 0;
    }
    let col = (lhs - n).div_ceil(2 * n);
    col.min(width as u64) as u16
}

/// Relative columns covered by `start..=end`.
///
/// Covers the columns whose centres fall inside the span. A span narrower
/// than a column still gets one column at its left edge, and the left edge is
/// clamped so the rightmost partition always stays on screen.
pub fn span_columns(start: usize, end: usize, count: usize, width: u16) -> Range<u16> {
    if count == 0 || width == 0 {
        return 0..0;
    }
    let x0 = first_column_from(start, count, width);
    let x1 = first_column_from(end + 1, count, width);
    if x0 < x1 {
        return x0..x1;
    }
    let left = (start as u64 * width as u64 / count as u64).min(width as u64 - 1) as u16;
    left..left + 1
}

/// Relative column closest to the midpoint of partition `idx`.
pub fn midpoint_column(idx: usize, count: usize, width: u16) -> Option<u16> {
    if count == 0 || width == 0 || idx >= count {
        return None;
    }
    let col = ((2 * idx as u64 + 1) * width as u64) / (2 * count as u64);
    Some(col.min(width as u64 - 1) as u16)
}
