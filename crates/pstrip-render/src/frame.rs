#![forbid(unsafe_code)]

//! Frame = Buffer + hit grid for a render pass.
//!
//! Widgets draw cells into [`Frame::buffer`] and, when hit testing is
//! enabled, tag the cells they own so the caller can route mouse input back
//! to the widget that drew under the pointer.
//!
//! ```
//! use pstrip_core::geometry::Rect;
//! use pstrip_render::frame::{Frame, HitId, HitRegion};
//!
//! let mut frame = Frame::with_hit_grid(20, 3);
//! frame.register_hit(Rect::new(0, 1, 20, 1), HitId::new(7), HitRegion::Content, 3);
//! assert_eq!(frame.hit_test(4, 1), Some((HitId::new(7), HitRegion::Content, 3)));
//! ```

use crate::buffer::Buffer;
use pstrip_core::geometry::Rect;

/// Identifier for a clickable region in the hit grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct HitId(pub u32);

impl HitId {
    #[inline]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[inline]
    pub const fn id(self) -> u32 {
        self.0
    }
}

/// Opaque user data attached to a hit cell.
///
/// The status strip stores the partition index under the cell centre.
pub type HitData = u64;

/// Regions within a widget for mouse interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HitRegion {
    /// No interactive region.
    #[default]
    None,
    /// Main content area.
    Content,
    /// Secondary row attached to the content (markers, selection bars).
    Marker,
}

/// A single hit cell in the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HitCell {
    pub widget_id: Option<HitId>,
    pub region: HitRegion,
    pub data: HitData,
}

/// Hit testing grid mapping screen cells to widget regions.
///
/// Later registrations overwrite earlier ones.
#[derive(Debug, Clone)]
pub struct HitGrid {
    width: u16,
    height: u16,
    cells: Vec<HitCell>,
}

impl HitGrid {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![HitCell::default(); width as usize * height as usize],
        }
    }

    #[inline]
    fn index(&self, x: u16, y: u16) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y as usize * self.width as usize + x as usize)
    }

    /// Tag every cell of `rect` (clipped to the grid).
    pub fn register(&mut self, rect: Rect, widget_id: HitId, region: HitRegion, data: HitData) {
        let x_end = (rect.x as usize + rect.width as usize).min(self.width as usize) as u16;
        let y_end = (rect.y as usize + rect.height as usize).min(self.height as usize) as u16;
        let hit = HitCell {
            widget_id: Some(widget_id),
            region,
            data,
        };
        for y in rect.y..y_end {
            for x in rect.x..x_end {
                if let Some(i) = self.index(x, y) {
                    self.cells[i] = hit;
                }
            }
        }
    }

    pub fn hit_test(&self, x: u16, y: u16) -> Option<(HitId, HitRegion, HitData)> {
        let cell = self.cells.get(self.index(x, y)?)?;
        cell.widget_id.map(|id| (id, cell.region, cell.data))
    }

    pub fn clear(&mut self) {
        self.cells.fill(HitCell::default());
    }
}

/// Render target for one pass.
#[derive(Debug, Clone)]
pub struct Frame {
    /// The cell grid for this render pass.
    pub buffer: Buffer,

    /// Optional hit grid; `None` disables hit registration.
    pub hit_grid: Option<HitGrid>,
}

impl Frame {
    /// Frame without hit testing.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            buffer: Buffer::new(width, height),
            hit_grid: None,
        }
    }

    /// Frame with hit testing enabled.
    pub fn with_hit_grid(width: u16, height: u16) -> Self {
        Self {
            buffer: Buffer::new(width, height),
            hit_grid: Some(HitGrid::new(width, height)),
        }
    }

    #[inline]
    pub fn width(&self) -> u16 {
        self.buffer.width()
    }

    #[inline]
    pub fn height(&self) -> u16 {
        self.buffer.height()
    }

    #[inline]
    pub fn bounds(&self) -> Rect {
        self.buffer.bounds()
    }

    /// Reset buffer and hit grid for the next pass.
    pub fn clear(&mut self) {
        self.buffer.clear();
        if let Some(grid) = self.hit_grid.as_mut() {
            grid.clear();
        }
    }

    /// Register a hit region; returns `false` when hit testing is disabled.
    pub fn register_hit(&mut self, rect: Rect, id: HitId, region: HitRegion, data: HitData) -> bool {
        match self.hit_grid.as_mut() {
            Some(grid) => {
                grid.register(rect, id, region, data);
                true
            }
            None => false,
        }
    }

    pub fn hit_test(&self, x: u16, y: u16) -> Option<(HitId, HitRegion, HitData)> {
        self.hit_grid.as_ref().and_then(|grid| grid.hit_test(x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::Cell;

    #[test]
    fn register_without_grid_is_refused() {
        let mut frame = Frame::new(10, 2);
        assert!(!frame.register_hit(Rect::new(0, 0, 5, 1), HitId::new(1), HitRegion::Content, 0));
        assert_eq!(frame.hit_test(0, 0), None);
    }

    #[test]
    fn later_registration_wins() {
        let mut frame = Frame::with_hit_grid(10, 2);
        frame.register_hit(Rect::new(0, 0, 10, 1), HitId::new(1), HitRegion::Content, 1);
        frame.register_hit(Rect::new(4, 0, 1, 1), HitId::new(1), HitRegion::Content, 9);
        assert_eq!(frame.hit_test(3, 0), Some((HitId::new(1), HitRegion::Content, 1)));
        assert_eq!(frame.hit_test(4, 0), Some((HitId::new(1), HitRegion::Content, 9)));
        assert_eq!(frame.hit_test(4, 1), None);
    }

    #[test]
    fn registration_is_clipped() {
        let mut grid = HitGrid::new(4, 4);
        grid.register(Rect::new(2, 2, 10, 10), HitId::new(2), HitRegion::Marker, 0);
        assert_eq!(grid.hit_test(3, 3), Some((HitId::new(2), HitRegion::Marker, 0)));
        assert_eq!(grid.hit_test(4, 4), None);
    }

    #[test]
    fn clear_resets_both_layers() {
        let mut frame = Frame::with_hit_grid(4, 1);
        frame.buffer.set(0, 0, Cell::from_char('x'));
        frame.register_hit(Rect::new(0, 0, 1, 1), HitId::new(3), HitRegion::Content, 0);
        frame.clear();
        assert!(frame.buffer.get(0, 0).unwrap().is_empty());
        assert_eq!(frame.hit_test(0, 0), None);
    }
}
