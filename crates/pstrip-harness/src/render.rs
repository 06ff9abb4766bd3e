use std::path::{Path, PathBuf};

use clap::Args;
use pstrip_render::presenter::{ColorMode, present};

use crate::error::Result;
use crate::fixture::Fixture;
use crate::scenario::{EventKind, EventSpec, Scenario};

#[derive(Debug, Clone, Args)]
pub struct RenderArgs {
    /// Scenario file (.toml or .json).
    pub scenario: PathBuf,

    /// Strip width in columns; overrides the scenario.
    #[arg(long)]
    pub width: Option<u16>,

    /// Glyphs only, without color sequences.
    #[arg(long)]
    pub plain: bool,

    /// Hover this partition so its tooltip is drawn.
    #[arg(long)]
    pub hover: Option<String>,
}

pub fn run_render(args: RenderArgs) -> Result<()> {
    print!("{}", render_scenario(&args)?);
    Ok(())
}

/// Render the scenario's initial state to ANSI text.
pub fn render_scenario(args: &RenderArgs) -> Result<String> {
    let scenario = Scenario::load(&args.scenario)?;
    let base_dir = args.scenario.parent().unwrap_or(Path::new("."));
    let fixture = Fixture::from_scenario(&scenario, base_dir, args.width)?;
    let selected = fixture.initial_selection();
    let (_capture, mut state) = fixture.new_state();

    let mut frame = fixture.render(&selected, &mut state);
    if let Some(name) = &args.hover {
        let hover = fixture.mouse_event(&EventSpec {
            kind: EventKind::Move,
            partition: Some(name.clone()),
            x: None,
            y: None,
            shift: false,
        })?;
        state.handle_mouse(&fixture.strip(&selected), &hover);
        frame = fixture.render(&selected, &mut state);
    }

    let mode = if args.plain {
        ColorMode::Plain
    } else {
        ColorMode::TrueColor
    };
    tracing::debug!(
        message = "harness.render",
        partitions = fixture.names.len(),
        width = fixture.width,
        plain = args.plain
    );
    Ok(present(&frame.buffer, mode))
}
