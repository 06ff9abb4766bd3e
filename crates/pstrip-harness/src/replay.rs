use std::fmt;
use std::path::{Path, PathBuf};

use clap::Args;
use pstrip_widgets::StripResult;
use serde::Serialize;

use crate::error::Result;
use crate::fixture::Fixture;
use crate::scenario::{EventSpec, Scenario};

#[derive(Debug, Clone, Args)]
pub struct ReplayArgs {
    /// Scenario file (.toml or .json).
    pub scenario: PathBuf,

    /// Strip width in columns; overrides the scenario.
    #[arg(long)]
    pub width: Option<u16>,

    /// Print one JSON object per release.
    #[arg(long)]
    pub json: bool,
}

/// What one button release reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReleaseOutcome {
    /// Index of the release in the event script.
    pub step: usize,
    pub op: Option<&'static str>,
    /// Selection after applying the reported change.
    pub selection: Option<Vec<String>>,
    pub click: Option<String>,
}

impl fmt::Display for ReleaseOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "step {}: ", self.step)?;
        match (self.op, &self.selection) {
            (Some(op), Some(selection)) => write!(f, "{op} -> [{}]", selection.join(", "))?,
            _ => f.write_str("no selection change")?,
        }
        if let Some(click) = &self.click {
            write!(f, "; click {click}")?;
        }
        Ok(())
    }
}

pub fn run_replay(args: ReplayArgs) -> Result<()> {
    let scenario = Scenario::load(&args.scenario)?;
    let base_dir = args.scenario.parent().unwrap_or(Path::new("."));
    let fixture = Fixture::from_scenario(&scenario, base_dir, args.width)?;
    for outcome in replay(&fixture, &scenario.events)? {
        if args.json {
            println!("{}", serde_json::to_string(&outcome)?);
        } else {
            println!("{outcome}");
        }
    }
    Ok(())
}

/// Feed `events` through a fresh strip state, rendering before each one the
/// way a UI loop would, and apply every reported selection.
pub fn replay(fixture: &Fixture, events: &[EventSpec]) -> Result<Vec<ReleaseOutcome>> {
    let (_capture, mut state) = fixture.new_state();
    let mut selected = fixture.initial_selection();
    let mut outcomes = Vec::new();

    for (step, spec) in events.iter().enumerate() {
        let event = fixture.mouse_event(spec)?;
        fixture.render(&selected, &mut state);
        let result = state.handle_mouse(&fixture.strip(&selected), &event);
        tracing::trace!(message = "harness.step", step, result = ?result);

        if let StripResult::Released { selection, click } = result {
            let op = selection.as_ref().map(|change| change.op.as_str());
            let selection = selection.map(|change| change.selection);
            if let Some(next) = &selection {
                selected.clone_from(next);
            }
            outcomes.push(ReleaseOutcome {
                step,
                op,
                selection,
                click,
            });
        }
    }
    Ok(outcomes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_display() {
        let outcome = ReleaseOutcome {
            step: 3,
            op: Some("add"),
            selection: Some(vec!["a".to_owned(), "b".to_owned()]),
            click: Some("b".to_owned()),
        };
        assert_eq!(outcome.to_string(), "step 3: add -> [a, b]; click b");
        let empty = ReleaseOutcome {
            step: 0,
            op: None,
            selection: None,
            click: None,
        };
        assert_eq!(empty.to_string(), "step 0: no selection change");
    }

    #[test]
    fn outcome_json_shape() {
        let outcome = ReleaseOutcome {
            step: 1,
            op: Some("subtract"),
            selection: Some(Vec::new()),
            click: None,
        };
        assert_eq!(
            serde_json::to_string(&outcome).unwrap(),
            r#"{"step":1,"op":"subtract","selection":[],"click":null}"#
        );
    }
}
