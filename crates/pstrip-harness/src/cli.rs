use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::error::Result;
use crate::render::{RenderArgs, run_render};
use crate::replay::{ReplayArgs, run_replay};

#[derive(Debug, Parser)]
#[command(
    name = "pstrip",
    about = "Render and replay partition status strip scenarios",
    version
)]
pub struct Cli {
    /// Log strip spans and events to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Draw the scenario's strip once and print it.
    Render(RenderArgs),

    /// Run the scenario's mouse script and print each release.
    Replay(ReplayArgs),
}

pub fn run_from_env() -> Result<()> {
    let cli = Cli::parse();
    run(cli)
}

pub fn run(cli: Cli) -> Result<()> {
    init_logging(cli.verbose);
    match cli.command {
        Commands::Render(args) => run_render(args),
        Commands::Replay(args) => run_replay(args),
    }
}

/// `PSTRIP_LOG` wins over `RUST_LOG`; without either, only warnings unless verbose.
pub fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("PSTRIP_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use clap::Parser;

    use crate::error::HarnessError;

    use super::{Cli, Commands, run};

    #[test]
    fn replay_flags_parse() {
        let cli = Cli::try_parse_from(["pstrip", "-v", "replay", "s.toml", "--json", "--width", "30"])
            .unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Replay(args) => {
                assert_eq!(args.scenario, PathBuf::from("s.toml"));
                assert!(args.json);
                assert_eq!(args.width, Some(30));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn render_flags_parse() {
        let cli = Cli::try_parse_from(["pstrip", "render", "s.json", "--plain", "--hover", "p3"])
            .unwrap();
        match cli.command {
            Commands::Render(args) => {
                assert!(args.plain);
                assert_eq!(args.hover.as_deref(), Some("p3"));
                assert_eq!(args.width, None);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn missing_scenario_is_an_io_error() {
        let cli = Cli::try_parse_from(["pstrip", "render", "/nonexistent/pstrip/scenario.toml"])
            .unwrap();
        let err = run(cli).unwrap_err();
        assert!(matches!(err, HarnessError::Io(_)));
        assert_eq!(err.exit_code(), 1);
    }
}
