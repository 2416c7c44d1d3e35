//! Pub/Sub channel definitions.
//!
//! Notifications are scoped per event: a viewing client subscribes to
//! exactly the channel of the event it is looking at, so nothing from
//! other events ever reaches it.

use album_core::Snowflake;

/// Channel prefix for per-event change notifications
pub const EVENT_CHANNEL_PREFIX: &str = "event:";
/// Channel for broadcast events (all connected clients)
pub const BROADCAST_CHANNEL: &str = "broadcast";

/// Pub/Sub channel types
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PubSubChannel {
    /// Change notifications for a single event's media and reactions
    Event(Snowflake),
    /// Broadcast to all connected clients
    Broadcast,
    /// Custom channel name
    Custom(String),
}

impl PubSubChannel {
    /// Channel for one event's changes
    #[must_use]
    pub fn event(event_id: Snowflake) -> Self {
        Self::Event(event_id)
    }

    /// The broadcast channel
    #[must_use]
    pub fn broadcast() -> Self {
        Self::Broadcast
    }

    /// A free-form channel
    #[must_use]
    pub fn custom(name: impl Into<String>) -> Self {
        Self::Custom(name.into())
    }

    /// The name as Redis sees it
    #[must_use]
    pub fn name(&self) -> String {
        match self {
            Self::Event(id) => format!("{EVENT_CHANNEL_PREFIX}{id}"),
            Self::Broadcast => BROADCAST_CHANNEL.to_string(),
            Self::Custom(name) => name.clone(),
        }
    }

    /// Recover the channel from a received name
    ///
    /// Anything that is not the broadcast channel or a well-formed event
    /// channel comes back as `Custom`.
    #[must_use]
    pub fn parse(name: &str) -> Self {
        if name == BROADCAST_CHANNEL {
            return Self::Broadcast;
        }

        name.strip_prefix(EVENT_CHANNEL_PREFIX)
            .and_then(|suffix| suffix.parse::<i64>().ok())
            .map_or_else(|| Self::Custom(name.to_string()), |id| Self::Event(id.into()))
    }
}

impl std::fmt::Display for PubSubChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name())
    }
}
