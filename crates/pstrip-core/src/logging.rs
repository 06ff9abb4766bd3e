#![forbid(unsafe_code)]

//! Logging facade.
//!
//! Library crates never install a subscriber. With the `tracing` feature the
//! macros below are the `tracing` macros; without it every call site is
//! compiled out behind `#[cfg(feature = "tracing")]`.
//!
//! Span and event names follow a dotted `component.action` convention:
//!
//! | Name              | Kind  | Fields                                  |
//! |-------------------|-------|-----------------------------------------|
//! | `strip.render`    | span  | `partitions`, `spans`, `split`, `render_duration_us` |
//! | `strip.selection` | event | `op`, `range_len`, `selected_count`     |
//! | `strip.click`     | event | `partition`                             |
//! | `capture.acquire` | event | `owner`                                 |
//! | `capture.release` | event | `owner`                                 |
//! | `harness.render`  | event | `partitions`, `width`, `plain`          |
//! | `harness.step`    | event | `step`, `result`                        |

#[cfg(feature = "tracing")]
pub use tracing::{debug, debug_span, error, info, trace, trace_span, warn};
