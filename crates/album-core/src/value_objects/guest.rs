//! Guest identity - ephemeral per-session participant identifier
//!
//! Guests never hold an account. A browsing session synthesizes one identity
//! on first use, keeps it in memory, and loses it on reload. Every reaction
//! issued in that session carries the same identifier, which is how
//! "has this participant reacted" is scoped.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// Ephemeral session-scoped participant identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GuestIdentity(String);

impl GuestIdentity {
    /// Maximum accepted length when an identity arrives over the wire
    pub const MAX_LEN: usize = 64;

    /// Issue a fresh identity from the current time and a random factor
    ///
    /// Two concurrent guests collide with negligible probability; a reloaded
    /// session gets a brand new identity with no memory of prior reactions.
    pub fn issue() -> Self {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or(0);
        let nonce: u64 = rand::thread_rng().gen();
        Self(format!("g-{millis:x}-{nonce:016x}"))
    }

    /// Accept an identity a client minted for itself
    ///
    /// Only shape is checked; the value is opaque to the server.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.len() > Self::MAX_LEN {
            return None;
        }
        if !trimmed.bytes().all(|b| b.is_ascii_graphic()) {
            return None;
        }
        Some(Self(trimmed.to_string()))
    }

    /// The identity as a string slice
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the inner string
    #[inline]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for GuestIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_produces_distinct_identities() {
        let a = GuestIdentity::issue();
        let b = GuestIdentity::issue();
        assert_ne!(a, b);
    }

    #[test]
    fn test_parse_accepts_issued_identity() {
        let id = GuestIdentity::issue();
        assert_eq!(GuestIdentity::parse(id.as_str()), Some(id));
    }

    #[test]
    fn test_parse_rejects_empty_and_oversized() {
        assert!(GuestIdentity::parse("").is_none());
        assert!(GuestIdentity::parse("   ").is_none());
        assert!(GuestIdentity::parse(&"x".repeat(65)).is_none());
    }

    #[test]
    fn test_parse_rejects_control_characters() {
        assert!(GuestIdentity::parse("abc\ndef").is_none());
    }
}
