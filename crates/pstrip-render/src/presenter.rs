#![forbid(unsafe_code)]

//! Buffer-to-text presentation.
//!
//! Unlike a live terminal presenter this emits a whole buffer at once, one
//! line per row, with SGR state reset at the end of every row so each line
//! can be printed or diffed in isolation.

use std::fmt::Write as _;

use crate::buffer::Buffer;
use crate::cell::{Cell, CellFlags, PackedRgba};

/// How colors are emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// 24-bit SGR sequences.
    #[default]
    TrueColor,
    /// Glyphs only; trailing blanks trimmed.
    Plain,
}

const RESET: &str = "\x1b[0m";

/// Render `buffer` to a string.
pub fn present(buffer: &Buffer, mode: ColorMode) -> String {
    let mut out = String::with_capacity(buffer.width() as usize * buffer.height() as usize * 4);
    for y in 0..buffer.height() {
        match mode {
            ColorMode::Plain => {
                out.push_str(buffer.row_text(y).trim_end());
            }
            ColorMode::TrueColor => present_row(buffer, y, &mut out),
        }
        out.push('\n');
    }
    out
}

fn present_row(buffer: &Buffer, y: u16, out: &mut String) {
    let mut current: Option<(PackedRgba, PackedRgba, CellFlags)> = None;
    for x in 0..buffer.width() {
        let Some(cell) = buffer.get(x, y) else {
            continue;
        };
        let key = (cell.fg, cell.bg, cell.flags);
        if current != Some(key) {
            out.push_str(RESET);
            write_sgr(cell, out);
            current = Some(key);
        }
        out.push(cell.ch);
    }
    out.push_str(RESET);
}

fn write_sgr(cell: &Cell, out: &mut String) {
    let mut params: Vec<String> = Vec::with_capacity(4);
    for (flag, code) in [
        (CellFlags::BOLD, "1"),
        (CellFlags::DIM, "2"),
        (CellFlags::ITALIC, "3"),
        (CellFlags::UNDERLINE, "4"),
        (CellFlags::REVERSE, "7"),
    ] {
        if cell.flags.contains(flag) {
            params.push(code.to_owned());
        }
    }
    if !cell.fg.is_transparent() {
        params.push(format!("38;2;{};{};{}", cell.fg.r(), cell.fg.g(), cell.fg.b()));
    }
    if !cell.bg.is_transparent() {
        params.push(format!("48;2;{};{};{}", cell.bg.r(), cell.bg.g(), cell.bg.b()));
    }
    if !params.is_empty() {
        let _ = write!(out, "\x1b[{}m", params.join(";"));
    }
}
