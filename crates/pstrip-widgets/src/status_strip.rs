#![forbid(unsafe_code)]

//! Partition status strip.
//!
//! ```text
//!   ▄▄▄▄▄▄    ▄▄▄        marker row: selected partitions, or the window top edge
//!   ██████▚▚▚▚██████     status rows: one block per span
//!     Partition p7 is completed       tooltip row: hovered span
//! ```
//!
//! Spans are placed at `idx / count` of the width and painted in z-order:
//! missing filler first, then real statuses, then the first and last span
//! (end caps). A span too narrow to own a column still gets one, so the end
//! caps stay visible at any partition count.
//!
//! # Hit data convention
//!
//! With a `hit_id`, every column registers `HitRegion::Content` on the status
//! rows and `HitRegion::Marker` on the marker row, with
//! `data = partition_index as u64`. The index is the partition owning the
//! column centre, which is also what [`StatusStripState::handle_mouse`]
//! resolves a pointer position to.

use std::fmt;

use ahash::{AHashMap, AHashSet};
use pstrip_core::capture::{CaptureGuard, CaptureOwner, PointerCapture};
use pstrip_core::event::{Event, MouseButton, MouseEvent, MouseEventKind};
use pstrip_core::geometry::Rect;
use pstrip_render::cell::{Cell, CellFlags};
use pstrip_render::frame::{Frame, HitId, HitRegion};
use pstrip_style::{PackedRgba, StripTheme};
use unicode_width::UnicodeWidthStr;

#[cfg(feature = "tracing")]
use web_time::Instant;

use crate::coords::{column_index, index_at, midpoint_column, span_columns};
use crate::partition::PartitionState;
use crate::selection::{DragSelection, SelectionChange};
use crate::span::{Span, spans_by, split_spans};
use crate::tooltip::{TooltipMode, tooltip_text};
use crate::{StatefulWidget, Widget, draw_text_span};

/// Columns per partition below which split-mode separators are omitted.
pub const MIN_SPAN_WIDTH: u16 = 2;
/// Status rows of a normal strip.
pub const STRIP_HEIGHT: u16 = 2;
/// Status rows of a `small` strip.
pub const SMALL_STRIP_HEIGHT: u16 = 1;

const HATCH: char = '▚';
const SEPARATOR: char = '▏';
const SELECTED_MARK: char = '▄';
const DRAG_MARK: char = '░';
const WINDOW_TOP: char = '▁';
const WINDOW_LEFT: char = '▏';
const WINDOW_RIGHT: char = '▕';
const FADE_AMOUNT: f32 = 0.6;

/// Size knobs for the strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StripLayout {
    pub min_span_width: u16,
    pub strip_height: u16,
    pub small_strip_height: u16,
    /// Reserve a row below the strip for the hovered span's tooltip.
    pub tooltip_row: bool,
}

impl Default for StripLayout {
    fn default() -> Self {
        Self {
            min_span_width: MIN_SPAN_WIDTH,
            strip_height: STRIP_HEIGHT,
            small_strip_height: SMALL_STRIP_HEIGHT,
            tooltip_row: true,
        }
    }
}

enum StateSource<'a> {
    Missing,
    Map(&'a AHashMap<String, PartitionState>),
    Classifier(Box<dyn Fn(&str, usize) -> PartitionState + 'a>),
}

/// Horizontal strip of partition states with click and drag selection.
///
/// # Example
///
/// ```
/// use pstrip_core::geometry::Rect;
/// use pstrip_render::frame::Frame;
/// use pstrip_widgets::{PartitionState, StatusStrip, Widget};
///
/// let names: Vec<String> = (0..4).map(|i| format!("p{i}")).collect();
/// let strip = StatusStrip::new(&names).state_for(|_, idx| {
///     if idx < 2 { PartitionState::Success } else { PartitionState::Failure }
/// });
/// let mut frame = Frame::new(8, strip.height());
/// strip.render(Rect::new(0, 0, 8, strip.height()), &mut frame);
/// assert_eq!(strip.spans().len(), 2);
/// ```
pub struct StatusStrip<'a> {
    names: &'a [String],
    source: StateSource<'a>,
    selected: Option<&'a [String]>,
    clickable: bool,
    split: bool,
    small: bool,
    window_size: Option<usize>,
    hide_tooltip: bool,
    tooltip_message: Option<&'a str>,
    layout: StripLayout,
    theme: StripTheme,
    hit_id: Option<HitId>,
}

impl fmt::Debug for StatusStrip<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StatusStrip")
            .field("partitions", &self.names.len())
            .field("selected", &self.selected.map(<[String]>::len))
            .field("clickable", &self.clickable)
            .field("split", &self.split)
            .field("small", &self.small)
            .field("window_size", &self.window_size)
            .field("layout", &self.layout)
            .finish_non_exhaustive()
    }
}

impl<'a> StatusStrip<'a> {
    /// Strip over `names`; every partition is `Missing` until a state source is set.
    pub fn new(names: &'a [String]) -> Self {
        Self {
            names,
            source: StateSource::Missing,
            selected: None,
            clickable: false,
            split: false,
            small: false,
            window_size: None,
            hide_tooltip: false,
            tooltip_message: None,
            layout: StripLayout::default(),
            theme: StripTheme::default(),
            hit_id: None,
        }
    }

    /// Classify each partition by name and index. Called once per partition per render.
    #[must_use]
    pub fn state_for<F>(mut self, classify: F) -> Self
    where
        F: Fn(&str, usize) -> PartitionState + 'a,
    {
        self.source = StateSource::Classifier(Box::new(classify));
        self
    }

    /// Look states up by name; absent names are `Missing`.
    #[must_use]
    pub fn states(mut self, states: &'a AHashMap<String, PartitionState>) -> Self {
        self.source = StateSource::Map(states);
        self
    }

    /// Enable selection rendering and drag selection against `selected`.
    #[must_use]
    pub fn selected(mut self, selected: &'a [String]) -> Self {
        self.selected = Some(selected);
        self
    }

    /// Report plain clicks on release.
    #[must_use]
    pub fn clickable(mut self, clickable: bool) -> Self {
        self.clickable = clickable;
        self
    }

    /// One span per partition instead of one per run.
    #[must_use]
    pub fn split(mut self, split: bool) -> Self {
        self.split = split;
        self
    }

    #[must_use]
    pub fn small(mut self, small: bool) -> Self {
        self.small = small;
        self
    }

    /// Draw `selected` as a bounded window instead of free markers.
    #[must_use]
    pub fn selection_window_size(mut self, size: usize) -> Self {
        self.window_size = Some(size);
        self
    }

    #[must_use]
    pub fn hide_status_tooltip(mut self, hide: bool) -> Self {
        self.hide_tooltip = hide;
        self
    }

    /// Show `message` for every span instead of the status sentence.
    #[must_use]
    pub fn tooltip_message(mut self, message: &'a str) -> Self {
        self.tooltip_message = Some(message);
        self
    }

    #[must_use]
    pub fn layout(mut self, layout: StripLayout) -> Self {
        self.layout = layout;
        self
    }

    #[must_use]
    pub fn theme(mut self, theme: StripTheme) -> Self {
        self.theme = theme;
        self
    }

    /// Register hit regions under `id` while rendering.
    #[must_use]
    pub fn hit_id(mut self, id: HitId) -> Self {
        self.hit_id = Some(id);
        self
    }

    pub fn names(&self) -> &'a [String] {
        self.names
    }

    pub fn tooltip_mode(&self) -> TooltipMode<'a> {
        match (self.tooltip_message, self.hide_tooltip) {
            (Some(message), _) => TooltipMode::Message(message),
            (None, true) => TooltipMode::Hidden,
            (None, false) => TooltipMode::Status,
        }
    }

    fn is_interactive(&self) -> bool {
        self.selected.is_some() || self.clickable
    }

    /// Per-partition states, in sequence order.
    pub fn partition_states(&self) -> Vec<PartitionState> {
        self.names
            .iter()
            .enumerate()
            .map(|(idx, name)| match &self.source {
                StateSource::Missing => PartitionState::Missing,
                StateSource::Map(states) => states.get(name).copied().unwrap_or_default(),
                StateSource::Classifier(classify) => classify(name, idx),
            })
            .collect()
    }

    /// Spans as they will be painted.
    pub fn spans(&self) -> Vec<Span> {
        let states = self.partition_states();
        if self.split {
            split_spans(states.len(), |idx| states[idx])
        } else {
            spans_by(states.len(), |idx| states[idx])
        }
    }

    fn status_rows(&self) -> u16 {
        let rows = if self.small {
            self.layout.small_strip_height
        } else {
            self.layout.strip_height
        };
        rows.max(1)
    }

    fn has_marker_row(&self) -> bool {
        self.selected.is_some()
    }

    /// Rows needed to show everything the strip can draw.
    pub fn height(&self) -> u16 {
        u16::from(self.has_marker_row()) + self.status_rows() + u16::from(self.layout.tooltip_row)
    }

    /// Whether split-mode separators fit at `width`.
    pub fn separators_visible(&self, width: u16) -> bool {
        u64::from(width) > u64::from(self.layout.min_span_width) * (self.names.len() as u64 + 1)
    }

    fn regions(&self, area: Rect) -> Option<Regions> {
        if area.is_empty() {
            return None;
        }
        let mut rest = area;
        let marker = if self.has_marker_row() && rest.height > 1 {
            let (top, below) = rest.split_top(1);
            rest = below;
            Some(top)
        } else {
            None
        };
        let (status, below) = rest.split_top(self.status_rows());
        let tooltip = if self.layout.tooltip_row {
            below.row(0)
        } else {
            None
        };
        Some(Regions {
            marker,
            status,
            tooltip,
        })
    }

    /// Inclusive index bounds of the selection window.
    ///
    /// The window runs between the first and last `selected` members. With an
    /// empty selection it covers the trailing `size` partitions.
    pub fn window_bounds(&self) -> Option<(usize, usize)> {
        let size = self.window_size?;
        let selected = self.selected?;
        let count = self.names.len();
        let position = |name: &String| self.names.iter().position(|n| n == name);
        match (selected.first(), selected.last()) {
            (Some(first), Some(last)) => {
                let a = position(first)?;
                let b = position(last)?;
                Some((a.min(b), a.max(b)))
            }
            _ if size > 0 && count > 0 => Some((count.saturating_sub(size), count - 1)),
            _ => None,
        }
    }

    fn paint(&self, regions: &Regions, frame: &mut Frame, state: Option<&StatusStripState>) -> usize {
        let count = self.names.len();
        if count == 0 {
            return 0;
        }
        let status_area = regions.status;
        let spans = self.spans();

        for span in paint_order(&spans) {
            self.paint_span(frame, status_area, span, count);
        }

        if self.split && self.separators_visible(status_area.width) {
            for span in spans.iter().skip(1) {
                let col = status_area.x + span_columns(span.start_idx, span.end_idx, count, status_area.width).start;
                for y in status_area.y..status_area.bottom() {
                    overlay_glyph(frame, col, y, SEPARATOR, self.theme.separator);
                }
            }
        }

        if let Some(selected) = self.selected {
            if self.window_size.is_some() {
                self.paint_window(frame, regions);
            } else {
                self.paint_markers(frame, regions.marker, selected);
                if let Some(range) = state.and_then(|s| s.drag.range()) {
                    if let Some(indices) = range.indices(self.names) {
                        self.paint_drag(frame, status_area, *indices.start(), *indices.end());
                    }
                }
            }
        }

        if let Some(id) = self.hit_id {
            for col in status_area.x..status_area.right() {
                let Some(idx) = column_index(status_area, col, count) else {
                    continue;
                };
                let column = Rect::new(col, status_area.y, 1, status_area.height);
                frame.register_hit(column, id, HitRegion::Content, idx as u64);
                if let Some(marker) = regions.marker {
                    frame.register_hit(Rect::new(col, marker.y, 1, 1), id, HitRegion::Marker, idx as u64);
                }
            }
        }

        if let (Some(row), Some(state)) = (regions.tooltip, state) {
            if let Some(idx) = state.hovered.filter(|&idx| idx < count) {
                if let Some(span) = spans.iter().find(|span| span.contains(idx)) {
                    self.paint_tooltip(frame, status_area, row, span, idx);
                }
            }
        }

        spans.len()
    }

    fn paint_span(&self, frame: &mut Frame, area: Rect, span: &Span, count: usize) {
        let cols = span_columns(span.start_idx, span.end_idx, count, area.width);
        let rect = Rect::new(area.x + cols.start, area.y, cols.end - cols.start, area.height);
        let color = span.status.color(&self.theme);
        let cell = if span.status.is_partial() {
            Cell::from_char(HATCH).with_fg(color).with_bg(self.theme.missing)
        } else {
            Cell::default().with_bg(color)
        };
        frame.buffer.fill(rect, cell);
    }

    fn paint_markers(&self, frame: &mut Frame, marker: Option<Rect>, selected: &[String]) {
        let Some(marker) = marker else {
            return;
        };
        let members: AHashSet<&str> = selected.iter().map(String::as_str).collect();
        let runs = spans_by(self.names.len(), |idx| members.contains(self.names[idx].as_str()));
        let cell = Cell::from_char(SELECTED_MARK).with_fg(self.theme.selected);
        for run in runs.iter().filter(|run| run.status) {
            let cols = span_columns(run.start_idx, run.end_idx, self.names.len(), marker.width);
            frame.buffer.fill(
                Rect::new(marker.x + cols.start, marker.y, cols.end - cols.start, 1),
                cell,
            );
        }
    }

    fn paint_drag(&self, frame: &mut Frame, area: Rect, lo: usize, hi: usize) {
        let cols = span_columns(lo, hi, self.names.len(), area.width);
        for y in area.y..area.bottom() {
            for col in cols.clone() {
                overlay_glyph(frame, area.x + col, y, DRAG_MARK, self.theme.drag_highlight);
            }
        }
    }

    fn paint_window(&self, frame: &mut Frame, regions: &Regions) {
        let Some((lo, hi)) = self.window_bounds() else {
            return;
        };
        let area = regions.status;
        let cols = span_columns(lo, hi, self.names.len(), area.width);
        let (left, right) = (area.x + cols.start, area.x + cols.end - 1);
        for y in area.y..area.bottom() {
            for x in area.x..area.right() {
                if x < left || x > right {
                    if let Some(cell) = frame.buffer.get_mut(x, y) {
                        fade(cell, self.theme.fade);
                    }
                }
            }
            overlay_glyph(frame, left, y, WINDOW_LEFT, self.theme.window_border);
            if right > left {
                overlay_glyph(frame, right, y, WINDOW_RIGHT, self.theme.window_border);
            }
        }
        if let Some(marker) = regions.marker {
            let edge = Cell::from_char(WINDOW_TOP).with_fg(self.theme.window_border);
            frame.buffer.fill(Rect::new(left, marker.y, right - left + 1, 1), edge);
        }
    }

    fn paint_tooltip(&self, frame: &mut Frame, status: Rect, row: Rect, span: &Span, idx: usize) {
        let Some(text) = tooltip_text(self.tooltip_mode(), span, self.names) else {
            return;
        };
        let width = u16::try_from(text.width()).unwrap_or(u16::MAX);
        let anchor = midpoint_column(idx, self.names.len(), status.width).map_or(row.x, |col| status.x + col);
        let max_start = row.right().saturating_sub(width).max(row.x);
        let start = anchor.saturating_sub(width / 2).max(row.x).min(max_start);
        draw_text_span(frame, start, row.y, &text, self.theme.tooltip_style(), row.right());
    }

    fn render_with(&self, area: Rect, frame: &mut Frame, state: Option<&mut StatusStripState>) {
        #[cfg(feature = "tracing")]
        let render_start = Instant::now();
        #[cfg(feature = "tracing")]
        let render_span = tracing::debug_span!(
            "strip.render",
            partitions = self.names.len(),
            spans = tracing::field::Empty,
            split = self.split,
            render_duration_us = tracing::field::Empty
        );
        #[cfg(feature = "tracing")]
        let _render_guard = render_span.enter();

        let Some(regions) = self.regions(area) else {
            return;
        };
        let state = state.map(|state| {
            state.geometry = Some(regions.interactive());
            &*state
        });
        let _span_count = self.paint(&regions, frame, state);

        #[cfg(feature = "tracing")]
        {
            render_span.record("spans", _span_count);
            render_span.record("render_duration_us", render_start.elapsed().as_micros() as u64);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Regions {
    marker: Option<Rect>,
    status: Rect,
    tooltip: Option<Rect>,
}

impl Regions {
    fn interactive(&self) -> StripGeometry {
        let top = self.marker.map_or(self.status.y, |marker| marker.y);
        StripGeometry {
            band: Rect::new(
                self.status.x,
                top,
                self.status.width,
                self.status.bottom() - top,
            ),
            status: self.status,
        }
    }
}

/// Missing filler, then real statuses, then the end caps.
fn paint_order(spans: &[Span]) -> impl Iterator<Item = &Span> + '_ {
    let last = spans.len().saturating_sub(1);
    let is_cap = move |idx: usize| idx == 0 || idx == last;
    let filler = spans
        .iter()
        .enumerate()
        .filter(move |(idx, span)| !is_cap(*idx) && span.status.is_missing());
    let real = spans
        .iter()
        .enumerate()
        .filter(move |(idx, span)| !is_cap(*idx) && !span.status.is_missing());
    let caps = spans.iter().enumerate().filter(move |(idx, _)| is_cap(*idx));
    filler.chain(real).chain(caps).map(|(_, span)| span)
}

fn overlay_glyph(frame: &mut Frame, x: u16, y: u16, ch: char, fg: PackedRgba) {
    if let Some(cell) = frame.buffer.get_mut(x, y) {
        cell.ch = ch;
        cell.fg = fg;
    }
}

fn fade(cell: &mut Cell, toward: PackedRgba) {
    if !cell.bg.is_transparent() {
        cell.bg = cell.bg.mix(toward, FADE_AMOUNT);
    }
    if !cell.fg.is_transparent() {
        cell.fg = cell.fg.mix(toward, FADE_AMOUNT);
    }
    cell.flags |= CellFlags::DIM;
}

impl Widget for StatusStrip<'_> {
    fn render(&self, area: Rect, frame: &mut Frame) {
        self.render_with(area, frame, None);
    }
}

impl StatefulWidget for StatusStrip<'_> {
    type State = StatusStripState;

    fn render(&self, area: Rect, frame: &mut Frame, state: &mut Self::State) {
        self.render_with(area, frame, Some(state));
    }
}

/// Outcome of one pointer event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StripResult {
    /// Event not consumed.
    Ignored,
    /// Left button pressed over the partition at this index; the pointer is captured.
    Pressed(usize),
    /// The free end of the drag moved to another partition.
    RangeChanged,
    HoverChanged,
    /// Button released after a press on the strip; the capture is gone.
    Released {
        selection: Option<SelectionChange>,
        click: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct StripGeometry {
    /// Marker row plus status rows: where a press starts a drag.
    band: Rect,
    status: Rect,
}

/// Interaction state for a [`StatusStrip`].
///
/// Holds the transient drag range and, while the button is down, the
/// pointer capture guard. Dropping the state mid-drag releases the capture.
#[derive(Debug)]
pub struct StatusStripState {
    capture: PointerCapture,
    owner: CaptureOwner,
    drag: DragSelection,
    guard: Option<CaptureGuard>,
    pressed: Option<usize>,
    hovered: Option<usize>,
    geometry: Option<StripGeometry>,
}

impl StatusStripState {
    /// State bound to the shared `capture` registry.
    pub fn new(capture: &PointerCapture) -> Self {
        Self {
            capture: capture.clone(),
            owner: capture.register_owner(),
            drag: DragSelection::default(),
            guard: None,
            pressed: None,
            hovered: None,
            geometry: None,
        }
    }

    pub fn owner(&self) -> CaptureOwner {
        self.owner
    }

    pub fn drag(&self) -> &DragSelection {
        &self.drag
    }

    /// Partition under the pointer, if any.
    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    /// Whether a press is in progress (the capture is held).
    pub fn is_pressed(&self) -> bool {
        self.guard.is_some()
    }

    /// Abandon any drag and release the capture.
    pub fn cancel(&mut self) {
        self.drag.cancel();
        self.pressed = None;
        self.guard = None;
    }

    /// Route a canonical event; focus loss cancels a drag in progress.
    pub fn handle_event(&mut self, strip: &StatusStrip<'_>, event: &Event) -> StripResult {
        match event {
            Event::Mouse(mouse) => self.handle_mouse(strip, mouse),
            Event::Focus(false) => {
                self.cancel();
                StripResult::Ignored
            }
            Event::Focus(true) | Event::Resize { .. } => StripResult::Ignored,
        }
    }

    /// Handle a mouse event against the geometry of the last render.
    pub fn handle_mouse(&mut self, strip: &StatusStrip<'_>, event: &MouseEvent) -> StripResult {
        let Some(geometry) = self.geometry else {
            return StripResult::Ignored;
        };
        let inside = geometry.band.contains(event.x, event.y);
        if !self.capture.delivers_to(self.owner, inside) {
            // Pointer is elsewhere, or another widget holds the capture.
            return if self.set_hover(None) {
                StripResult::HoverChanged
            } else {
                StripResult::Ignored
            };
        }
        let count = strip.names.len();
        let column = index_at(
            event.center_x(),
            f64::from(geometry.status.x),
            f64::from(geometry.status.width),
            count,
        );

        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let Some(idx) = column.filter(|_| inside && strip.is_interactive()) else {
                    return StripResult::Ignored;
                };
                if self.guard.is_none() {
                    self.guard = self.capture.acquire(self.owner);
                }
                if self.guard.is_none() {
                    return StripResult::Ignored;
                }
                self.pressed = Some(idx);
                if strip.selected.is_some() {
                    self.drag.begin(strip.names[idx].as_str());
                }
                StripResult::Pressed(idx)
            }
            MouseEventKind::Drag(MouseButton::Left) | MouseEventKind::Moved => {
                let hover_changed = self.set_hover(if inside { column } else { None });
                if self.guard.is_some() {
                    let end = column.and_then(|idx| strip.names.get(idx)).map(String::as_str);
                    if self.drag.update(end) {
                        return StripResult::RangeChanged;
                    }
                }
                if hover_changed {
                    StripResult::HoverChanged
                } else {
                    StripResult::Ignored
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let Some(guard) = self.guard.take() else {
                    return StripResult::Ignored;
                };
                let released_on = column.filter(|_| inside);
                let collapsed = self
                    .drag
                    .range()
                    .is_none_or(|range| range.start == range.end);
                let selection = match strip.selected {
                    Some(selected) => self.drag.finish(strip.names, selected, event.shift()),
                    None => {
                        self.drag.cancel();
                        None
                    }
                };
                let click = match (self.pressed.take(), released_on) {
                    (Some(pressed), Some(released))
                        if strip.clickable && collapsed && pressed == released =>
                    {
                        strip.names.get(released).cloned()
                    }
                    _ => None,
                };
                drop(guard);

                #[cfg(feature = "tracing")]
                log_release(selection.as_ref(), click.as_deref());

                StripResult::Released { selection, click }
            }
            _ => StripResult::Ignored,
        }
    }

    fn set_hover(&mut self, idx: Option<usize>) -> bool {
        let changed = self.hovered != idx;
        self.hovered = idx;
        changed
    }
}

#[cfg(feature = "tracing")]
fn log_release(selection: Option<&SelectionChange>, click: Option<&str>) {
    if let Some(change) = selection {
        tracing::debug!(
            message = "strip.selection",
            op = change.op.as_str(),
            range_len = change.range.len(),
            selected_count = change.selection.len()
        );
    }
    if let Some(partition) = click {
        tracing::debug!(message = "strip.click", partition);
    }
}
