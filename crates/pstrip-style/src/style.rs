#![forbid(unsafe_code)]

use bitflags::bitflags;
use pstrip_render::cell::{Cell, CellFlags, PackedRgba};

bitflags! {
    /// Text attribute flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct StyleFlags: u16 {
        const BOLD      = 1 << 0;
        const DIM       = 1 << 1;
        const ITALIC    = 1 << 2;
        const UNDERLINE = 1 << 3;
        const REVERSE   = 1 << 4;
    }
}

impl From<StyleFlags> for CellFlags {
    fn from(flags: StyleFlags) -> Self {
        let mut out = CellFlags::empty();
        for (style, cell) in [
            (StyleFlags::BOLD, CellFlags::BOLD),
            (StyleFlags::DIM, CellFlags::DIM),
            (StyleFlags::ITALIC, CellFlags::ITALIC),
            (StyleFlags::UNDERLINE, CellFlags::UNDERLINE),
            (StyleFlags::REVERSE, CellFlags::REVERSE),
        ] {
            if flags.contains(style) {
                out |= cell;
            }
        }
        out
    }
}

/// Optional foreground, background, and attributes.
///
/// Unset fields leave the target cell untouched when applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Style {
    pub fg: Option<PackedRgba>,
    pub bg: Option<PackedRgba>,
    pub attrs: Option<StyleFlags>,
}

impl Style {
    pub const fn new() -> Self {
        Self {
            fg: None,
            bg: None,
            attrs: None,
        }
    }

    #[must_use]
    pub const fn fg(mut self, color: PackedRgba) -> Self {
        self.fg = Some(color);
        self
    }

    #[must_use]
    pub const fn bg(mut self, color: PackedRgba) -> Self {
        self.bg = Some(color);
        self
    }

    /// Add attribute flags to any already set.
    #[must_use]
    pub fn add_attrs(mut self, flags: StyleFlags) -> Self {
        self.attrs = Some(self.attrs.unwrap_or_default() | flags);
        self
    }

    #[must_use]
    pub fn bold(self) -> Self {
        self.add_attrs(StyleFlags::BOLD)
    }

    #[must_use]
    pub fn dim(self) -> Self {
        self.add_attrs(StyleFlags::DIM)
    }

    /// Overlay `other` on `self`; every field `other` sets wins.
    #[must_use]
    pub fn patch(&self, other: &Style) -> Style {
        Style {
            fg: other.fg.or(self.fg),
            bg: other.bg.or(self.bg),
            attrs: other.attrs.or(self.attrs),
        }
    }

    /// Apply the set fields to a cell.
    pub fn apply_to(&self, cell: &mut Cell) {
        if let Some(fg) = self.fg {
            cell.fg = fg;
        }
        if let Some(bg) = self.bg {
            cell.bg = bg;
        }
        if let Some(attrs) = self.attrs {
            cell.flags = attrs.into();
        }
    }
}
