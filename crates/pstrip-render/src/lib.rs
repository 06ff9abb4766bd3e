#![forbid(unsafe_code)]

//! Render kernel: cells, buffers, hit-testable frames, and ANSI presentation.
//!
//! # Role in pstrip
//! `pstrip-render` is the deterministic rendering surface. Widgets draw into a
//! [`frame::Frame`], which bundles a [`buffer::Buffer`] of cells with an
//! optional hit grid for mouse routing. [`presenter::present`] turns a buffer
//! into text, either with truecolor SGR sequences or as plain glyphs.
//!
//! # Primary responsibilities
//! - **Cell/Buffer**: 2D grid of fixed-size cells.
//! - **Frame**: render target plus hit testing metadata.
//! - **Presenter**: stateless ANSI emitter used by the harness and tests.

pub mod buffer;
pub mod cell;
pub mod frame;
pub mod presenter;
