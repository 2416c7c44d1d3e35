//! Redis Pub/Sub publisher.
//!
//! Publishes change notifications after every media or reaction write.

use crate::pool::{RedisPool, RedisResult};
use crate::pubsub::PubSubChannel;
use album_core::{MediaItem, Reaction, Snowflake};
use redis::AsyncCommands;
use serde::{Deserialize, Serialize};

/// The kinds of change a subscriber can receive
///
/// A closed enum rather than a free-form string so feed consumers match
/// exhaustively; an unknown kind is a deserialization error, not a silently
/// dropped branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChangeKind {
    MediaCreate,
    MediaDelete,
    ReactionAdd,
    ReactionRemove,
}

/// Event wrapper for Pub/Sub messages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PubSubEvent {
    /// What changed
    pub kind: ChangeKind,
    /// Change payload; shape depends on `kind`
    pub data: serde_json::Value,
}

impl PubSubEvent {
    /// Create a new event
    #[must_use]
    pub fn new(kind: ChangeKind, data: serde_json::Value) -> Self {
        Self { kind, data }
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Redis Pub/Sub publisher
#[derive(Clone)]
pub struct Publisher {
    pool: RedisPool,
}

impl Publisher {
    /// Create a new publisher
    #[must_use]
    pub fn new(pool: RedisPool) -> Self {
        Self { pool }
    }

    /// Publish an event to a channel
    pub async fn publish(&self, channel: &PubSubChannel, event: &PubSubEvent) -> RedisResult<u32> {
        let mut conn = self.pool.get().await?;
        let channel_name = channel.name();
        let payload = event.to_json()?;

        let receivers: u32 = conn.publish(&channel_name, &payload).await?;

        tracing::debug!(
            channel = %channel_name,
            kind = ?event.kind,
            receivers = receivers,
            "Published event"
        );

        Ok(receivers)
    }
}

/// Convenience methods for the notification kinds the services emit
impl Publisher {
    /// Publish a media create notification with the full item payload
    ///
    /// Carrying the whole item lets subscribers prepend it without a refetch.
    pub async fn publish_media_create(&self, item: &MediaItem) -> RedisResult<u32> {
        let event = PubSubEvent::new(
            ChangeKind::MediaCreate,
            serde_json::to_value(item)?,
        );
        self.publish(&PubSubChannel::event(item.event_id), &event).await
    }

    /// Publish a media delete notification
    ///
    /// Subscribers treat the payload as advisory and refetch the list.
    pub async fn publish_media_delete(
        &self,
        event_id: Snowflake,
        media_id: Snowflake,
    ) -> RedisResult<u32> {
        let event = PubSubEvent::new(
            ChangeKind::MediaDelete,
            serde_json::json!({ "media_id": media_id }),
        );
        self.publish(&PubSubChannel::event(event_id), &event).await
    }

    /// Publish a reaction add notification
    pub async fn publish_reaction_add(
        &self,
        event_id: Snowflake,
        reaction: &Reaction,
    ) -> RedisResult<u32> {
        let event = PubSubEvent::new(ChangeKind::ReactionAdd, serde_json::to_value(reaction)?);
        self.publish(&PubSubChannel::event(event_id), &event).await
    }

    /// Publish a reaction remove notification
    pub async fn publish_reaction_remove(
        &self,
        event_id: Snowflake,
        reaction: &Reaction,
    ) -> RedisResult<u32> {
        let event = PubSubEvent::new(ChangeKind::ReactionRemove, serde_json::to_value(reaction)?);
        self.publish(&PubSubChannel::event(event_id), &event).await
    }
}
