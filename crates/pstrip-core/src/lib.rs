#![forbid(unsafe_code)]

//! Core: geometry, canonical input events, and pointer capture.
//!
//! # Role in pstrip
//! `pstrip-core` is the input layer. It owns the normalized mouse event types
//! that widgets consume and the pointer-capture registry that decides which
//! widget receives pointer motion while a drag is in progress.
//!
//! # Primary responsibilities
//! - **Rect**: terminal-space rectangles used for layout and hit testing.
//! - **Event**: canonical input events (mouse, resize, focus).
//! - **PointerCapture**: single-owner capture with an RAII release guard.
//!
//! # How it fits in the system
//! The render kernel (`pstrip-render`) is independent of input. Widgets in
//! `pstrip-widgets` take `pstrip-core` events and a shared [`capture::PointerCapture`]
//! and report semantic results back to the caller.

pub mod capture;
pub mod event;
pub mod geometry;
pub mod logging;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, error, info, trace, trace_span, warn};
