//! Event code - the short human-enterable identifier printed on QR cards
//!
//! Six uppercase alphanumeric characters, generated server-side. A code is
//! immutable once issued; collisions are resolved by regenerating until the
//! store accepts the insert.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Characters an event code may contain
const CODE_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Fixed length of every event code
pub const CODE_LENGTH: usize = 6;

/// Validated 6-character event code
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct EventCode(String);

impl EventCode {
    /// Parse and normalize a user-entered code
    ///
    /// Input is upper-cased before validation so guests can type codes in
    /// either case.
    pub fn parse(input: &str) -> Result<Self, EventCodeError> {
        let normalized = input.trim().to_ascii_uppercase();

        if normalized.len() != CODE_LENGTH {
            return Err(EventCodeError::WrongLength(normalized.len()));
        }
        if !normalized
            .bytes()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
        {
            return Err(EventCodeError::InvalidCharacter);
        }

        Ok(Self(normalized))
    }

    /// Generate a random candidate code
    ///
    /// Uniqueness is not checked here; the caller retries on a storage-layer
    /// unique violation.
    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();
        let code = (0..CODE_LENGTH)
            .map(|_| {
                let idx = rng.gen_range(0..CODE_CHARSET.len());
                CODE_CHARSET[idx] as char
            })
            .collect();
        Self(code)
    }

    /// The code as a string slice
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EventCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for EventCode {
    type Err = EventCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventCode::parse(s)
    }
}

impl<'de> Deserialize<'de> for EventCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        EventCode::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// Error when parsing an event code
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum EventCodeError {
    #[error("event code must be exactly {CODE_LENGTH} characters, got {0}")]
    WrongLength(usize),

    #[error("event code may only contain A-Z and 0-9")]
    InvalidCharacter,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_code() {
        let code = EventCode::parse("AB12CD").unwrap();
        assert_eq!(code.as_str(), "AB12CD");
    }

    #[test]
    fn test_parse_normalizes_case_and_whitespace() {
        let code = EventCode::parse("  ab12cd ").unwrap();
        assert_eq!(code.as_str(), "AB12CD");
    }

    #[test]
    fn test_parse_rejects_wrong_length() {
        assert_eq!(
            EventCode::parse("AB12C"),
            Err(EventCodeError::WrongLength(5))
        );
        assert_eq!(
            EventCode::parse("AB12CDE"),
            Err(EventCodeError::WrongLength(7))
        );
    }

    #[test]
    fn test_parse_rejects_symbols() {
        assert_eq!(
            EventCode::parse("AB-2CD"),
            Err(EventCodeError::InvalidCharacter)
        );
    }

    #[test]
    fn test_generate_is_valid() {
        for _ in 0..100 {
            let code = EventCode::generate();
            assert!(EventCode::parse(code.as_str()).is_ok());
        }
    }

    #[test]
    fn test_serde_roundtrip() {
        let code = EventCode::parse("XY99ZZ").unwrap();
        let json = serde_json::to_string(&code).unwrap();
        assert_eq!(json, "\"XY99ZZ\"");

        let back: EventCode = serde_json::from_str(&json).unwrap();
        assert_eq!(back, code);

        let err: Result<EventCode, _> = serde_json::from_str("\"nope\"");
        assert!(err.is_err());
    }
}
