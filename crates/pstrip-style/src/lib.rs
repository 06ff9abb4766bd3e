#![forbid(unsafe_code)]

//! Style types for pstrip.
//!
//! # Role in pstrip
//! `pstrip-style` is the shared vocabulary for colors and styling. The status
//! strip resolves every partition state, selection overlay, and tooltip
//! through a [`StripTheme`], and applies the result to cells as a [`Style`].
//!
//! # This crate provides
//! - [`Style`] with patch semantics (the overlay wins for every field it sets).
//! - `#rrggbb` parsing and formatting for [`PackedRgba`].
//! - [`StripTheme`], the semantic color slots used by the status strip.

/// Hex color parsing and formatting.
pub mod color;
/// Style type with patch semantics.
pub mod style;
/// Semantic color slots for the status strip.
pub mod theme;

pub use color::{ParseColorError, parse_hex, to_hex};
pub use pstrip_render::cell::PackedRgba;
pub use style::{Style, StyleFlags};
pub use theme::StripTheme;
