//! Scenario files: a partition sequence, strip options, and a mouse script.
//!
//! ```toml
//! config = "strip.toml"          # optional, relative to the scenario file
//!
//! [strip]
//! width = 48
//! selected = ["2024-01-02"]
//!
//! [[partitions]]
//! name = "2024-01-01"
//! status = "SUCCESS"
//!
//! [[partitions]]
//! name = "2024-01-02"
//! state = "FAILURE_MISSING"
//!
//! [[events]]
//! kind = "down"
//! partition = "2024-01-01"
//! ```

use std::path::{Path, PathBuf};

use ahash::AHashSet;
use pstrip_widgets::{PartitionState, RunStatus};
use serde::Deserialize;

use crate::error::{HarnessError, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StripOptions {
    pub width: Option<u16>,
    pub split: bool,
    pub small: bool,
    pub clickable: bool,
    /// Initial selection; its presence enables drag selection.
    pub selected: Option<Vec<String>>,
    pub selection_window_size: Option<usize>,
    pub hide_status_tooltip: bool,
    pub tooltip_message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PartitionSpec {
    pub name: String,
    /// Latest run status, classified into a display state.
    #[serde(default)]
    pub status: Option<RunStatus>,
    /// Display state given directly (needed for the partial states).
    #[serde(default)]
    pub state: Option<PartitionState>,
}

impl PartitionSpec {
    pub fn resolved_state(&self) -> Result<PartitionState> {
        match (self.status, self.state) {
            (Some(_), Some(_)) => Err(HarnessError::invalid(format!(
                "partition {:?} sets both status and state",
                self.name
            ))),
            (status, None) => Ok(PartitionState::from_run_status(status)),
            (None, Some(state)) => Ok(state),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Down,
    Drag,
    Move,
    Up,
}

/// One scripted pointer event, targeting a partition's midpoint or a raw column.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EventSpec {
    pub kind: EventKind,
    #[serde(default)]
    pub partition: Option<String>,
    #[serde(default)]
    pub x: Option<u16>,
    /// Row; defaults to the first status row.
    #[serde(default)]
    pub y: Option<u16>,
    #[serde(default)]
    pub shift: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Scenario {
    pub config: Option<PathBuf>,
    pub strip: StripOptions,
    pub partitions: Vec<PartitionSpec>,
    pub events: Vec<EventSpec>,
}

impl Scenario {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let scenario: Self = toml::from_str(s)?;
        scenario.validated()
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        let scenario: Self = serde_json::from_str(s)?;
        scenario.validated()
    }

    /// Load a `.toml` or `.json` scenario.
    pub fn load(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        let parse: fn(&str) -> Result<Self> = match ext.as_deref() {
            Some("toml") => Self::from_toml_str,
            Some("json") => Self::from_json_str,
            _ => {
                return Err(HarnessError::UnsupportedFormat {
                    path: path.to_path_buf(),
                });
            }
        };
        let content = std::fs::read_to_string(path)?;
        parse(&content)
    }

    fn validated(self) -> Result<Self> {
        let mut seen = AHashSet::with_capacity(self.partitions.len());
        for partition in &self.partitions {
            if partition.name.trim().is_empty() {
                return Err(HarnessError::invalid("partition names must not be empty"));
            }
            if !seen.insert(partition.name.as_str()) {
                return Err(HarnessError::invalid(format!(
                    "duplicate partition {:?}",
                    partition.name
                )));
            }
            partition.resolved_state()?;
        }
        for (step, event) in self.events.iter().enumerate() {
            if event.partition.is_some() == event.x.is_some() {
                return Err(HarnessError::invalid(format!(
                    "event {step}: set exactly one of `partition` or `x`"
                )));
            }
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOML: &str = r#"
[strip]
width = 20
selected = []

[[partitions]]
name = "a"
status = "SUCCESS"

[[partitions]]
name = "b"
state = "SUCCESS_MISSING"

[[partitions]]
name = "c"

[[events]]
kind = "down"
partition = "a"

[[events]]
kind = "up"
x = 19
shift = true
"#;

    #[test]
    fn toml_scenario_parses() {
        let scenario = Scenario::from_toml_str(TOML).unwrap();
        assert_eq!(scenario.strip.width, Some(20));
        assert_eq!(scenario.strip.selected, Some(Vec::new()));
        let states: Vec<_> = scenario
            .partitions
            .iter()
            .map(|p| p.resolved_state().unwrap())
            .collect();
        assert_eq!(
            states,
            vec![
                PartitionState::Success,
                PartitionState::SuccessMissing,
                PartitionState::Missing
            ]
        );
        assert_eq!(scenario.events[1].kind, EventKind::Up);
        assert!(scenario.events[1].shift);
    }

    #[test]
    fn json_scenario_parses() {
        let scenario = Scenario::from_json_str(
            r#"{"partitions": [{"name": "x", "status": "CANCELED"}], "events": [{"kind": "move", "x": 0}]}"#,
        )
        .unwrap();
        assert_eq!(
            scenario.partitions[0].resolved_state().unwrap(),
            PartitionState::Failure
        );
        assert_eq!(scenario.strip, StripOptions::default());
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let err = Scenario::from_json_str(r#"{"partitions": [{"name": "x"}, {"name": "x"}]}"#)
            .unwrap_err();
        assert!(matches!(err, HarnessError::InvalidScenario { .. }));
    }

    #[test]
    fn events_need_one_target() {
        let err = Scenario::from_json_str(
            r#"{"partitions": [{"name": "x"}], "events": [{"kind": "down", "x": 1, "partition": "x"}]}"#,
        )
        .unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn status_and_state_conflict() {
        let err = Scenario::from_json_str(
            r#"{"partitions": [{"name": "x", "status": "SUCCESS", "state": "FAILURE"}]}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("both status and state"));
    }

    #[test]
    fn unknown_status_is_a_parse_error() {
        let err = Scenario::from_json_str(r#"{"partitions": [{"name": "x", "status": "EXPLODED"}]}"#)
            .unwrap_err();
        assert!(matches!(err, HarnessError::Json(_)));
    }

    #[test]
    fn unknown_extension_is_unsupported() {
        let err = Scenario::load(Path::new("scenario.yaml")).unwrap_err();
        assert!(matches!(err, HarnessError::UnsupportedFormat { .. }));
    }
}
