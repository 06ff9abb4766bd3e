#![forbid(unsafe_code)]

//! Partition states and the run-status classifier.

use std::fmt;
use std::str::FromStr;

use pstrip_style::{PackedRgba, StripTheme};

/// Status of the most recent run that targeted a partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "strip-config", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "strip-config", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum RunStatus {
    Queued,
    NotStarted,
    Managed,
    Starting,
    Started,
    Success,
    Failure,
    Canceling,
    Canceled,
}

impl RunStatus {
    pub const ALL: [RunStatus; 9] = [
        Self::Queued,
        Self::NotStarted,
        Self::Managed,
        Self::Starting,
        Self::Started,
        Self::Success,
        Self::Failure,
        Self::Canceling,
        Self::Canceled,
    ];

    /// Upper snake case name, as run storage reports it.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Queued => "QUEUED",
            Self::NotStarted => "NOT_STARTED",
            Self::Managed => "MANAGED",
            Self::Starting => "STARTING",
            Self::Started => "STARTED",
            Self::Success => "SUCCESS",
            Self::Failure => "FAILURE",
            Self::Canceling => "CANCELING",
            Self::Canceled => "CANCELED",
        }
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for an unrecognized run status name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRunStatus(pub String);

impl fmt::Display for UnknownRunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown run status {:?}", self.0)
    }
}

impl std::error::Error for UnknownRunStatus {}

impl FromStr for RunStatus {
    type Err = UnknownRunStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownRunStatus(s.to_owned()))
    }
}

/// Display state of one partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "strip-config", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "strip-config", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum PartitionState {
    #[default]
    Missing,
    Success,
    /// Succeeded for part of the partition; the rest is missing.
    SuccessMissing,
    Failure,
    /// Failed for part of the partition; the rest is missing.
    FailureMissing,
    Queued,
    Started,
}

impl PartitionState {
    pub const ALL: [PartitionState; 7] = [
        Self::Missing,
        Self::Success,
        Self::SuccessMissing,
        Self::Failure,
        Self::FailureMissing,
        Self::Queued,
        Self::Started,
    ];

    /// Classify the status of a partition's latest run.
    ///
    /// Partitions with no run, and runs that have not started executing,
    /// are `Missing`.
    pub const fn from_run_status(status: Option<RunStatus>) -> Self {
        match status {
            Some(RunStatus::Canceled | RunStatus::Canceling | RunStatus::Failure) => Self::Failure,
            Some(RunStatus::Started) => Self::Started,
            Some(RunStatus::Success) => Self::Success,
            Some(RunStatus::Queued) => Self::Queued,
            _ => Self::Missing,
        }
    }

    /// Human-readable label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Missing => "Missing",
            Self::Success => "Completed",
            Self::SuccessMissing => "Partially completed",
            Self::Failure => "Failed",
            Self::FailureMissing => "Partially failed",
            Self::Queued => "Queued",
            Self::Started => "In progress",
        }
    }

    pub const fn is_missing(self) -> bool {
        matches!(self, Self::Missing)
    }

    /// States drawn hatched: the status color over the missing color.
    pub const fn is_partial(self) -> bool {
        matches!(self, Self::SuccessMissing | Self::FailureMissing)
    }

    /// Solid color for this state.
    pub fn color(self, theme: &StripTheme) -> PackedRgba {
        match self {
            Self::Missing => theme.missing,
            Self::Success | Self::SuccessMissing => theme.success,
            Self::Failure | Self::FailureMissing => theme.failure,
            Self::Queued => theme.queued,
            Self::Started => theme.started,
        }
    }
}

impl fmt::Display for PartitionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
