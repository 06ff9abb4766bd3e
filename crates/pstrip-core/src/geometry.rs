#![forbid(unsafe_code)]

//! Geometric primitives.

/// A rectangle for layout bounds and hit testing.
///
/// Uses terminal coordinates (0-indexed, origin at top-left).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    /// Left edge (inclusive).
    pub x: u16,
    /// Top edge (inclusive).
    pub y: u16,
    /// Width in cells.
    pub width: u16,
    /// Height in cells.
    pub height: u16,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle from origin with given size.
    #[inline]
    pub const fn from_size(width: u16, height: u16) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Right edge (exclusive).
    #[inline]
    pub const fn right(&self) -> u16 {
        self.x.saturating_add(self.width)
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub const fn bottom(&self) -> u16 {
        self.y.saturating_add(self.height)
    }

    /// Check if the rectangle has zero area.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Check if a point is inside the rectangle.
    #[inline]
    pub const fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Check if a column falls within the horizontal extent, ignoring rows.
    #[inline]
    pub const fn contains_x(&self, x: u16) -> bool {
        x >= self.x && x < self.right()
    }

    /// A single row of this rectangle, clipped to its height.
    ///
    /// Returns `None` when `offset` is past the bottom edge.
    pub fn row(&self, offset: u16) -> Option<Rect> {
        if offset >= self.height {
            return None;
        }
        Some(Rect::new(self.x, self.y + offset, self.width, 1))
    }

    /// Split off `rows` rows from the top, returning `(top, rest)`.
    ///
    /// The top part is clamped to the available height.
    pub fn split_top(&self, rows: u16) -> (Rect, Rect) {
        let taken = rows.min(self.height);
        let top = Rect::new(self.x, self.y, self.width, taken);
        let rest = Rect::new(
            self.x,
            self.y.saturating_add(taken),
            self.width,
            self.height - taken,
        );
        (top, rest)
    }

    /// Compute the intersection with another rectangle, returning `None` if no overlap.
    #[inline]
    pub fn intersection_opt(&self, other: &Rect) -> Option<Rect> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if x < right && y < bottom {
            Some(Rect::new(x, y, right - x, bottom - y))
        } else {
            None
        }
    }
}
