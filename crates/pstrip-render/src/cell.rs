#![forbid(unsafe_code)]

//! Cell primitives: packed colors, attribute flags, and the cell itself.

use bitflags::bitflags;

/// RGBA color packed as `0xRRGGBBAA`.
///
/// Alpha 0 means "terminal default": the presenter emits no color sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PackedRgba(pub u32);

impl PackedRgba {
    /// Fully transparent; renders as the terminal default color.
    pub const TRANSPARENT: Self = Self(0);
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Opaque color from channels.
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    /// Color from channels including alpha.
    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self(((r as u32) << 24) | ((g as u32) << 16) | ((b as u32) << 8) | a as u32)
    }

    #[inline]
    pub const fn r(self) -> u8 {
        (self.0 >> 24) as u8
    }

    #[inline]
    pub const fn g(self) -> u8 {
        (self.0 >> 16) as u8
    }

    #[inline]
    pub const fn b(self) -> u8 {
        (self.0 >> 8) as u8
    }

    #[inline]
    pub const fn a(self) -> u8 {
        self.0 as u8
    }

    /// Whether the presenter should leave this color to the terminal.
    #[inline]
    pub const fn is_transparent(self) -> bool {
        self.a() == 0
    }

    /// Linear interpolation toward `other`; `t` is clamped to `[0, 1]`.
    ///
    /// Alpha is taken from `self`.
    #[must_use]
    pub fn mix(self, other: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let lerp = |a: u8, b: u8| -> u8 {
            let v = f32::from(a) + (f32::from(b) - f32::from(a)) * t;
            v.round().clamp(0.0, 255.0) as u8
        };
        Self::rgba(
            lerp(self.r(), other.r()),
            lerp(self.g(), other.g()),
            lerp(self.b(), other.b()),
            self.a(),
        )
    }
}

bitflags! {
    /// Text attributes stored per cell.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct CellFlags: u8 {
        const BOLD      = 0b0000_0001;
        const DIM       = 0b0000_0010;
        const ITALIC    = 0b0000_0100;
        const UNDERLINE = 0b0000_1000;
        const REVERSE   = 0b0001_0000;
    }
}

/// A single terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    /// Displayed glyph. Always a single-column character.
    pub ch: char,
    pub fg: PackedRgba,
    pub bg: PackedRgba,
    pub flags: CellFlags,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: PackedRgba::TRANSPARENT,
            bg: PackedRgba::TRANSPARENT,
            flags: CellFlags::empty(),
        }
    }
}

impl Cell {
    /// A default-colored cell showing `ch`.
    #[inline]
    pub fn from_char(ch: char) -> Self {
        Self {
            ch,
            ..Self::default()
        }
    }

    #[inline]
    #[must_use]
    pub const fn with_fg(mut self, fg: PackedRgba) -> Self {
        self.fg = fg;
        self
    }

    #[inline]
    #[must_use]
    pub const fn with_bg(mut self, bg: PackedRgba) -> Self {
        self.bg = bg;
        self
    }

    #[inline]
    #[must_use]
    pub const fn with_flags(mut self, flags: CellFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Blank glyph with no colors or attributes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packed_rgba_channels() {
        let packed = PackedRgba::rgba(12, 34, 56, 78);
        assert_eq!(packed.r(), 12);
        assert_eq!(packed.g(), 34);
        assert_eq!(packed.b(), 56);
        assert_eq!(packed.a(), 78);
        assert_eq!(PackedRgba::rgb(1, 2, 3).a(), 255);
    }

    #[test]
    fn transparent_default() {
        assert!(PackedRgba::default().is_transparent());
        assert!(!PackedRgba::BLACK.is_transparent());
    }

    #[test]
    fn mix_endpoints_and_midpoint() {
        let a = PackedRgba::rgb(0, 0, 0);
        let b = PackedRgba::rgb(200, 100, 50);
        assert_eq!(a.mix(b, 0.0), a);
        assert_eq!(a.mix(b, 1.0), b);
        assert_eq!(a.mix(b, 0.5), PackedRgba::rgb(100, 50, 25));
        assert_eq!(a.mix(b, 7.0), b);
    }

    #[test]
    fn cell_builders() {
        let cell = Cell::from_char('x')
            .with_fg(PackedRgba::WHITE)
            .with_bg(PackedRgba::BLACK)
            .with_flags(CellFlags::BOLD);
        assert_eq!(cell.ch, 'x');
        assert_eq!(cell.fg, PackedRgba::WHITE);
        assert_eq!(cell.bg, PackedRgba::BLACK);
        assert!(cell.flags.contains(CellFlags::BOLD));
        assert!(!cell.is_empty());
        assert!(Cell::default().is_empty());
    }
}
