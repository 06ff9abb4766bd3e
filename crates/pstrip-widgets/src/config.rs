#![forbid(unsafe_code)]

//! File-loadable layout and theme for the status strip.
//!
//! ```toml
//! # pstrip.toml
//! min_span_width = 3
//! small_strip_height = 1
//!
//! [theme]
//! success = "#2fb466"
//! failure = "#de3530"
//! ```
//!
//! Every field defaults to the built-in constants, so an empty file yields
//! [`StripConfig::default`].

use std::path::Path;

use pstrip_style::StripTheme;
use serde::{Deserialize, Serialize};

use crate::status_strip::{MIN_SPAN_WIDTH, SMALL_STRIP_HEIGHT, STRIP_HEIGHT, StripLayout};

/// Layout knobs plus theme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StripConfig {
    /// Columns per partition needed before split separators are drawn.
    pub min_span_width: u16,
    pub strip_height: u16,
    pub small_strip_height: u16,
    pub tooltip_row: bool,
    pub theme: StripTheme,
}

impl Default for StripConfig {
    fn default() -> Self {
        Self {
            min_span_width: MIN_SPAN_WIDTH,
            strip_height: STRIP_HEIGHT,
            small_strip_height: SMALL_STRIP_HEIGHT,
            tooltip_row: true,
            theme: StripTheme::default(),
        }
    }
}

impl StripConfig {
    /// Load from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, StripConfigError> {
        let config: Self = toml::from_str(s).map_err(StripConfigError::Toml)?;
        config.validated()
    }

    /// Load from a TOML file on disk.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, StripConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(StripConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    pub fn from_json_str(s: &str) -> Result<Self, StripConfigError> {
        let config: Self = serde_json::from_str(s).map_err(StripConfigError::Json)?;
        config.validated()
    }

    /// Load from a JSON file on disk.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, StripConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(StripConfigError::Io)?;
        Self::from_json_str(&content)
    }

    /// Load from a file, picking the format by extension (`.json`, else TOML).
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, StripConfigError> {
        let path = path.as_ref();
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::from_json_file(path),
            _ => Self::from_toml_file(path),
        }
    }

    /// Check parameter ranges. An empty list means the config is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.min_span_width == 0 {
            errors.push("min_span_width must be at least 1".to_owned());
        }
        if self.strip_height == 0 {
            errors.push("strip_height must be at least 1".to_owned());
        }
        if self.small_strip_height == 0 {
            errors.push("small_strip_height must be at least 1".to_owned());
        }
        if self.small_strip_height > self.strip_height {
            errors.push(format!(
                "small_strip_height ({}) exceeds strip_height ({})",
                self.small_strip_height, self.strip_height
            ));
        }
        errors
    }

    fn validated(self) -> Result<Self, StripConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(StripConfigError::Validation(errors))
        }
    }

    /// Layout part, for [`crate::StatusStrip::layout`].
    pub fn layout(&self) -> StripLayout {
        StripLayout {
            min_span_width: self.min_span_width,
            strip_height: self.strip_height,
            small_strip_height: self.small_strip_height,
            tooltip_row: self.tooltip_row,
        }
    }
}

/// Errors that can occur when loading a strip configuration.
#[derive(Debug)]
pub enum StripConfigError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error, including malformed theme colors.
    Toml(toml::de::Error),
    /// JSON parse error, including malformed theme colors.
    Json(serde_json::Error),
    /// Values out of range.
    Validation(Vec<String>),
}

impl std::fmt::Display for StripConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Validation(errors) => {
                write!(f, "validation errors: {}", errors.join("; "))
            }
        }
    }
}

impl std::error::Error for StripConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Toml(e) => Some(e),
            Self::Json(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pstrip_style::PackedRgba;
    use std::io::Write;

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(StripConfig::from_toml_str("").unwrap(), StripConfig::default());
    }

    #[test]
    fn toml_overrides_layout_and_theme() {
        let config = StripConfig::from_toml_str(
            r##"
min_span_width = 4
tooltip_row = false

[theme]
success = "#00ff00"
"##,
        )
        .unwrap();
        assert_eq!(config.min_span_width, 4);
        assert!(!config.tooltip_row);
        assert_eq!(config.theme.success, PackedRgba::rgb(0, 255, 0));
        assert_eq!(config.theme.failure, StripTheme::default().failure);
        assert_eq!(config.layout().strip_height, STRIP_HEIGHT);
    }

    #[test]
    fn json_loads() {
        let config = StripConfig::from_json_str(r#"{"strip_height": 3}"#).unwrap();
        assert_eq!(config.strip_height, 3);
    }

    #[test]
    fn unknown_field_is_rejected() {
        let err = StripConfig::from_toml_str("stripe_height = 3").unwrap_err();
        assert!(matches!(err, StripConfigError::Toml(_)));
    }

    #[test]
    fn bad_color_is_a_parse_error() {
        let err = StripConfig::from_json_str(r#"{"theme": {"queued": "blue"}}"#).unwrap_err();
        assert!(matches!(err, StripConfigError::Json(_)));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn zero_heights_fail_validation() {
        let err = StripConfig::from_toml_str("strip_height = 0").unwrap_err();
        let StripConfigError::Validation(errors) = &err else {
            panic!("expected validation error, got {err}");
        };
        assert_eq!(errors.len(), 2);
        assert!(err.to_string().starts_with("validation errors: "));
    }

    #[test]
    fn file_format_follows_extension() {
        let dir = tempfile::tempdir().unwrap();
        let json = dir.path().join("strip.json");
        std::fs::File::create(&json)
            .unwrap()
            .write_all(br#"{"min_span_width": 5}"#)
            .unwrap();
        assert_eq!(StripConfig::from_file(&json).unwrap().min_span_width, 5);

        let toml = dir.path().join("strip.toml");
        std::fs::write(&toml, "min_span_width = 6\n").unwrap();
        assert_eq!(StripConfig::from_file(&toml).unwrap().min_span_width, 6);

        let missing = dir.path().join("absent.toml");
        assert!(matches!(
            StripConfig::from_file(missing),
            Err(StripConfigError::Io(_))
        ));
    }
}
