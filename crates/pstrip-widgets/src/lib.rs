#![forbid(unsafe_code)]

//! Partition status strip widget.
//!
//! # Role in pstrip
//! `pstrip-widgets` turns a sequence of partition names plus a per-partition
//! state into a horizontal strip: runs of equal state are compressed into
//! [`span::Span`]s, painted as colored blocks, and made clickable and
//! drag-selectable through the hit grid and the shared pointer capture.
//!
//! # Modules
//! - [`partition`]: run statuses and the display-state classifier.
//! - [`span`]: run-length compression.
//! - [`coords`]: index/percentage/column mapping.
//! - [`selection`]: drag state machine and `Replace | Add | Subtract`.
//! - [`tooltip`]: hover text.
//! - [`status_strip`]: the widget and its state.
//! - `config`: file-loadable layout and theme (feature `strip-config`).

pub mod coords;
pub mod partition;
pub mod selection;
pub mod span;
pub mod status_strip;
pub mod tooltip;

#[cfg(feature = "strip-config")]
pub mod config;

pub use partition::{PartitionState, RunStatus};
pub use selection::{DragSelection, SelectionChange, SelectionOp};
pub use span::{Span, partitions_to_spans};
pub use status_strip::{StatusStrip, StatusStripState, StripLayout, StripResult};

use pstrip_core::geometry::Rect;
use pstrip_render::cell::Cell;
use pstrip_render::frame::Frame;
use pstrip_style::Style;
use unicode_width::UnicodeWidthChar;

/// A `Widget` is a renderable component.
///
/// Widgets render themselves into a `Frame` within a given `Rect`.
pub trait Widget {
    /// Render the widget into the frame at the given area.
    fn render(&self, area: Rect, frame: &mut Frame);
}

/// A `StatefulWidget` is a widget that renders based on mutable state.
pub trait StatefulWidget {
    type State;
    /// Render the widget into the frame with mutable state.
    fn render(&self, area: Rect, frame: &mut Frame, state: &mut Self::State);
}

/// Draw `text` starting at `(x, y)`, clipped at `max_x`.
///
/// Wide characters that would straddle the clip edge are dropped, and
/// zero-width characters are skipped. Returns the column after the last
/// drawn glyph.
pub(crate) fn draw_text_span(
    frame: &mut Frame,
    mut x: u16,
    y: u16,
    text: &str,
    style: Style,
    max_x: u16,
) -> u16 {
    for ch in text.chars() {
        let width = ch.width().unwrap_or(0) as u16;
        if width == 0 {
            continue;
        }
        if x.saturating_add(width) > max_x {
            break;
        }
        let mut cell = Cell::from_char(ch);
        style.apply_to(&mut cell);
        frame.buffer.set(x, y, cell);
        // Continuation columns of a wide glyph keep the style, blank glyph.
        for offset in 1..width {
            let mut tail = Cell::default();
            style.apply_to(&mut tail);
            frame.buffer.set(x + offset, y, tail);
        }
        x += width;
    }
    x
}
