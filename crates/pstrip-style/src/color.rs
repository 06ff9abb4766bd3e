#![forbid(unsafe_code)]

use std::fmt;

use pstrip_render::cell::PackedRgba;

/// Error returned when a string is not a `#rrggbb` color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseColorError {
    input: String,
}

impl ParseColorError {
    /// The rejected input.
    pub fn input(&self) -> &str {
        &self.input
    }
}

impl fmt::Display for ParseColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid color {:?}: expected #rrggbb", self.input)
    }
}

impl std::error::Error for ParseColorError {}

/// Parse `#rrggbb` (the leading `#` is optional).
pub fn parse_hex(input: &str) -> Result<PackedRgba, ParseColorError> {
    let err = || ParseColorError {
        input: input.to_owned(),
    };
    let trimmed = input.trim();
    let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(err());
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16);
    match (channel(0..2), channel(2..4), channel(4..6)) {
        (Ok(r), Ok(g), Ok(b)) => Ok(PackedRgba::rgb(r, g, b)),
        _ => Err(err()),
    }
}

/// Format as lowercase `#rrggbb`; alpha is dropped.
pub fn to_hex(color: PackedRgba) -> String {
    format!("#{:02x}{:02x}{:02x}", color.r(), color.g(), color.b())
}

/// Serde adapter storing colors as `#rrggbb` strings.
///
/// Use with `#[serde(with = "pstrip_style::color::hex")]`.
#[cfg(feature = "serde")]
pub mod hex {
    use pstrip_render::cell::PackedRgba;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(color: &PackedRgba, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::to_hex(*color))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<PackedRgba, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_hex(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_with_and_without_hash() {
        assert_eq!(parse_hex("#2fb466"), Ok(PackedRgba::rgb(0x2f, 0xb4, 0x66)));
        assert_eq!(parse_hex("FF0000"), Ok(PackedRgba::rgb(255, 0, 0)));
    }

    #[test]
    fn rejects_malformed() {
        for bad in [
            "", "#fff", "#12345g", "#1234567", "#ééé", "##aabbcc", "#+1+2+3", "+a+b+c",
        ] {
            let err = parse_hex(bad).unwrap_err();
            assert_eq!(err.input(), bad);
            assert!(err.to_string().contains("#rrggbb"));
        }
    }

    #[test]
    fn hex_round_trip() {
        let color = PackedRgba::rgb(0x0a, 0xbc, 0xde);
        assert_eq!(to_hex(color), "#0abcde");
        assert_eq!(parse_hex(&to_hex(color)), Ok(color));
    }
}
