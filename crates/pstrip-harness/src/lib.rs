#![forbid(unsafe_code)]

//! Scenario-driven harness for the partition status strip.
//!
//! A scenario file names the partitions, their states, the strip options and
//! an optional mouse script. `render` draws the strip once; `replay` feeds the
//! script through a live [`pstrip_widgets::StatusStripState`] and reports what
//! each button release selected or clicked.

pub mod cli;
pub mod error;
pub mod fixture;
pub mod render;
pub mod replay;
pub mod scenario;

pub use cli::run_from_env;
pub use error::{HarnessError, Result};
pub use fixture::Fixture;
pub use render::render_scenario;
pub use replay::{ReleaseOutcome, replay};
pub use scenario::Scenario;
