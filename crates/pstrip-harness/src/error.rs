use std::path::PathBuf;

use pstrip_widgets::config::StripConfigError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, HarnessError>;

#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("strip config: {0}")]
    Config(#[from] StripConfigError),

    #[error("unknown partition: {name}")]
    UnknownPartition { name: String },

    #[error("invalid scenario: {message}")]
    InvalidScenario { message: String },

    #[error("unsupported scenario format: {path} (expected .toml or .json)")]
    UnsupportedFormat { path: PathBuf },
}

impl HarnessError {
    /// Process exit code: 2 for bad scenario input, 1 for everything else.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::UnknownPartition { .. }
            | Self::InvalidScenario { .. }
            | Self::UnsupportedFormat { .. } => 2,
            _ => 1,
        }
    }

    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidScenario {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn unknown_partition(name: impl Into<String>) -> Self {
        Self::UnknownPartition { name: name.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::HarnessError;

    #[test]
    fn scenario_errors_exit_with_two() {
        let error = HarnessError::invalid("no partitions");
        assert_eq!(error.exit_code(), 2);
        assert_eq!(error.to_string(), "invalid scenario: no partitions");
        assert_eq!(HarnessError::unknown_partition("p9").exit_code(), 2);
    }

    #[test]
    fn io_errors_exit_with_one() {
        let error = HarnessError::from(std::io::Error::other("disk gone"));
        assert_eq!(error.exit_code(), 1);
        assert!(error.to_string().starts_with("I/O error: "));
    }
}
