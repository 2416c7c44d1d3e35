//! Time-ordered 64-bit identifiers
//!
//! Ids sort by creation time, which is what makes them usable as the
//! tie-breaker in newest-first media ordering. Layout, high to low:
//! 42 bits of milliseconds since the service epoch, 10 bits of worker id,
//! 12 bits of per-millisecond sequence.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

/// Milliseconds between the Unix epoch and 2024-01-01T00:00:00Z
const SERVICE_EPOCH_MS: i64 = 1_704_067_200_000;

const WORKER_BITS: u8 = 10;
const SEQUENCE_BITS: u8 = 12;
const TIMESTAMP_SHIFT: u8 = WORKER_BITS + SEQUENCE_BITS;
const MAX_WORKER_ID: u16 = (1 << WORKER_BITS) - 1;
const SEQUENCE_MASK: i64 = (1 << SEQUENCE_BITS) - 1;

/// Identifier for owners, events, media items, and reactions
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Snowflake(i64);

impl Snowflake {
    /// Wrap a raw database value
    #[inline]
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// The raw value, for binding into queries
    #[inline]
    pub const fn into_inner(self) -> i64 {
        self.0
    }

    /// Parse the decimal string form used on the wire
    pub fn parse(s: &str) -> Result<Self, SnowflakeParseError> {
        s.parse::<i64>()
            .map(Self)
            .map_err(|_| SnowflakeParseError::InvalidFormat)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SnowflakeParseError {
    #[error("invalid snowflake format")]
    InvalidFormat,
}

impl fmt::Display for Snowflake {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<i64> for Snowflake {
    fn from(raw: i64) -> Self {
        Self(raw)
    }
}

impl From<Snowflake> for i64 {
    fn from(id: Snowflake) -> Self {
        id.0
    }
}

impl std::str::FromStr for Snowflake {
    type Err = SnowflakeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// On the wire ids travel as strings: JSON numbers lose precision past 2^53.
impl Serialize for Snowflake {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

// Accept both the string form and a plain integer, so ids round-trip
// through JSON payloads that were built either way.
impl<'de> Deserialize<'de> for Snowflake {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct IdVisitor;

        impl serde::de::Visitor<'_> for IdVisitor {
            type Value = Snowflake;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a snowflake id as a string or integer")
            }

            fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<Snowflake, E> {
                Ok(Snowflake(v))
            }

            fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<Snowflake, E> {
                Ok(Snowflake(v as i64))
            }

            fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<Snowflake, E> {
                Snowflake::parse(v).map_err(|_| E::custom("invalid snowflake string"))
            }
        }

        deserializer.deserialize_any(IdVisitor)
    }
}

/// Id generator for one worker
///
/// Hands out up to 4096 ids per millisecond; the clock state sits behind a
/// mutex, which is plenty for request-rate id creation.
pub struct SnowflakeGenerator {
    worker_id: u16,
    clock: Mutex<ClockState>,
}

#[derive(Default)]
struct ClockState {
    last_ms: i64,
    sequence: i64,
}

impl SnowflakeGenerator {
    /// Create a generator for the given worker
    ///
    /// # Panics
    /// Panics when `worker_id` does not fit in its 10 bits.
    pub fn new(worker_id: u16) -> Self {
        assert!(worker_id <= MAX_WORKER_ID, "Worker ID must be < 1024");
        Self {
            worker_id,
            clock: Mutex::new(ClockState::default()),
        }
    }

    /// Produce the next id
    pub fn generate(&self) -> Snowflake {
        let mut state = self.clock.lock().unwrap();

        let mut now = wall_clock_ms();
        // A rewound clock would mint ids that sort before already-issued
        // ones; hold the line at the last timestamp instead.
        if now < state.last_ms {
            now = state.last_ms;
        }

        if now == state.last_ms {
            state.sequence = (state.sequence + 1) & SEQUENCE_MASK;
            if state.sequence == 0 {
                // 4096 ids in one millisecond; spin into the next
                while now <= state.last_ms {
                    now = wall_clock_ms();
                }
                state.last_ms = now;
            }
        } else {
            state.last_ms = now;
            state.sequence = 0;
        }

        let raw = ((now - SERVICE_EPOCH_MS) << TIMESTAMP_SHIFT)
            | (i64::from(self.worker_id) << SEQUENCE_BITS)
            | state.sequence;
        Snowflake(raw)
    }
}

impl Default for SnowflakeGenerator {
    fn default() -> Self {
        Self::new(0)
    }
}

fn wall_clock_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}
