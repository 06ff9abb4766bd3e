#![forbid(unsafe_code)]

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use pstrip_render::cell::PackedRgba;

use crate::style::Style;

/// Semantic color slots for the partition status strip.
///
/// With the `serde` feature every slot (de)serializes as `#rrggbb`, and
/// missing slots fall back to [`StripTheme::default`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct StripTheme {
    #[cfg_attr(feature = "serde", serde(with = "crate::color::hex"))]
    pub success: PackedRgba,
    #[cfg_attr(feature = "serde", serde(with = "crate::color::hex"))]
    pub failure: PackedRgba,
    #[cfg_attr(feature = "serde", serde(with = "crate::color::hex"))]
    pub queued: PackedRgba,
    #[cfg_attr(feature = "serde", serde(with = "crate::color::hex"))]
    pub started: PackedRgba,
    #[cfg_attr(feature = "serde", serde(with = "crate::color::hex"))]
    pub missing: PackedRgba,
    /// Marker row bars for selected partitions.
    #[cfg_attr(feature = "serde", serde(with = "crate::color::hex"))]
    pub selected: PackedRgba,
    /// Hatch drawn over the live drag range.
    #[cfg_attr(feature = "serde", serde(with = "crate::color::hex"))]
    pub drag_highlight: PackedRgba,
    /// Edges of the selection window box.
    #[cfg_attr(feature = "serde", serde(with = "crate::color::hex"))]
    pub window_border: PackedRgba,
    /// Color faded toward outside the selection window.
    #[cfg_attr(feature = "serde", serde(with = "crate::color::hex"))]
    pub fade: PackedRgba,
    #[cfg_attr(feature = "serde", serde(with = "crate::color::hex"))]
    pub separator: PackedRgba,
    #[cfg_attr(feature = "serde", serde(with = "crate::color::hex"))]
    pub tooltip_fg: PackedRgba,
    #[cfg_attr(feature = "serde", serde(with = "crate::color::hex"))]
    pub tooltip_bg: PackedRgba,
}

impl Default for StripTheme {
    fn default() -> Self {
        Self {
            success: PackedRgba::rgb(0x2f, 0xb4, 0x66),
            failure: PackedRgba::rgb(0xde, 0x35, 0x30),
            queued: PackedRgba::rgb(0x9f, 0xbc, 0xd8),
            started: PackedRgba::rgb(0x4c, 0x86, 0xc7),
            missing: PackedRgba::rgb(0xc9, 0xce, 0xd4),
            selected: PackedRgba::rgb(0x3e, 0x70, 0xb2),
            drag_highlight: PackedRgba::rgb(0xff, 0xd3, 0x5c),
            window_border: PackedRgba::rgb(0x8a, 0x94, 0xa6),
            fade: PackedRgba::rgb(0x1c, 0x1e, 0x22),
            separator: PackedRgba::rgb(0x1c, 0x1e, 0x22),
            tooltip_fg: PackedRgba::rgb(0xe6, 0xe8, 0xeb),
            tooltip_bg: PackedRgba::rgb(0x2b, 0x2f, 0x36),
        }
    }
}

impl StripTheme {
    /// Style for tooltip text.
    pub fn tooltip_style(&self) -> Style {
        Style::new().fg(self.tooltip_fg).bg(self.tooltip_bg)
    }
}
