//! Redis Pub/Sub subscriber.
//!
//! One background task owns a dedicated pub/sub connection and fans every
//! received notification out over a tokio broadcast channel. When the
//! connection drops, the task reconnects after a fixed delay and re-joins
//! whatever channels were active; anything published in between is lost,
//! and feed consumers recover from that with a full refetch.

use crate::pubsub::{PubSubChannel, PubSubEvent};
use futures_util::StreamExt;
use redis::Client;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc, RwLock};
use tokio::time::Duration;

/// Error type for subscriber operations
#[derive(Debug, thiserror::Error)]
pub enum SubscriberError {
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Failed to parse event: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Channel closed")]
    ChannelClosed,
}

/// Result type for subscriber operations
pub type SubscriberResult<T> = Result<T, SubscriberError>;

/// One notification as it came off the wire
#[derive(Debug, Clone)]
pub struct ReceivedMessage {
    /// Channel the message arrived on
    pub channel: PubSubChannel,
    /// Parsed event, when the payload is valid JSON of a known kind
    pub event: Option<PubSubEvent>,
    /// Raw payload
    pub payload: String,
}

impl ReceivedMessage {
    fn new(channel_name: &str, payload: String) -> Self {
        Self {
            channel: PubSubChannel::parse(channel_name),
            event: serde_json::from_str(&payload).ok(),
            payload,
        }
    }
}

/// Subscriber configuration
#[derive(Debug, Clone)]
pub struct SubscriberConfig {
    /// Redis connection URL
    pub redis_url: String,
    /// Channel buffer size for broadcast
    pub broadcast_buffer: usize,
    /// Reconnection delay in milliseconds
    pub reconnect_delay_ms: u64,
}

impl Default for SubscriberConfig {
    fn default() -> Self {
        Self {
            redis_url: "redis://127.0.0.1:6379".to_string(),
            broadcast_buffer: 1024,
            reconnect_delay_ms: 1000,
        }
    }
}

enum Control {
    Join(Vec<String>),
    Leave(Vec<String>),
    Stop,
}

/// Redis Pub/Sub subscriber handle
///
/// Cloneless by design; share it behind an `Arc` and hand out broadcast
/// receivers via [`Subscriber::receiver`].
pub struct Subscriber {
    active: Arc<RwLock<HashSet<String>>>,
    fanout: broadcast::Sender<ReceivedMessage>,
    control: mpsc::Sender<Control>,
}

impl Subscriber {
    /// Start the background listener and return its handle
    pub async fn new(config: SubscriberConfig) -> SubscriberResult<Self> {
        let (fanout, _) = broadcast::channel(config.broadcast_buffer);
        let (control, control_rx) = mpsc::channel(32);
        let active = Arc::new(RwLock::new(HashSet::new()));

        let listener = Listener {
            config,
            active: active.clone(),
            fanout: fanout.clone(),
            control_rx,
        };
        tokio::spawn(listener.run());

        Ok(Self {
            active,
            fanout,
            control,
        })
    }

    /// Join the given channels
    pub async fn subscribe(&self, channels: &[PubSubChannel]) -> SubscriberResult<()> {
        self.send(Control::Join(names(channels))).await
    }

    /// Leave the given channels
    pub async fn unsubscribe(&self, channels: &[PubSubChannel]) -> SubscriberResult<()> {
        self.send(Control::Leave(names(channels))).await
    }

    /// A fresh receiver over the notification fan-out
    #[must_use]
    pub fn receiver(&self) -> broadcast::Receiver<ReceivedMessage> {
        self.fanout.subscribe()
    }

    /// Names of the currently joined channels
    pub async fn subscribed_channels(&self) -> Vec<String> {
        self.active.read().await.iter().cloned().collect()
    }

    /// Stop the background listener
    pub async fn shutdown(&self) -> SubscriberResult<()> {
        self.send(Control::Stop).await
    }

    async fn send(&self, command: Control) -> SubscriberResult<()> {
        self.control
            .send(command)
            .await
            .map_err(|_| SubscriberError::ChannelClosed)
    }
}

fn names(channels: &[PubSubChannel]) -> Vec<String> {
    channels.iter().map(PubSubChannel::name).collect()
}

struct Listener {
    config: SubscriberConfig,
    active: Arc<RwLock<HashSet<String>>>,
    fanout: broadcast::Sender<ReceivedMessage>,
    control_rx: mpsc::Receiver<Control>,
}

impl Listener {
    async fn run(mut self) {
        let delay = Duration::from_millis(self.config.reconnect_delay_ms);

        loop {
            match self.serve_connection().await {
                Ok(()) => {
                    tracing::info!("Subscriber shutting down");
                    return;
                }
                Err(e) => {
                    tracing::error!(error = %e, "Subscriber error, reconnecting...");
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }

    /// Drive one connection until shutdown (Ok) or a transport error (Err)
    async fn serve_connection(&mut self) -> SubscriberResult<()> {
        let client = Client::open(self.config.redis_url.as_str())?;
        let mut pubsub = client.get_async_pubsub().await?;

        // Re-join whatever was active before the last disconnect
        for channel in self.active.read().await.iter() {
            pubsub.subscribe(channel).await?;
        }

        tracing::info!("Subscriber connected to Redis");

        loop {
            // The message stream borrows the connection, so it lives in an
            // inner scope; leaving the scope releases the borrow before any
            // subscribe/unsubscribe command runs.
            let command = {
                let mut stream = pubsub.on_message();
                loop {
                    tokio::select! {
                        msg = stream.next() => match msg {
                            Some(msg) => {
                                let channel = msg.get_channel_name().to_string();
                                let payload: String = msg.get_payload().unwrap_or_default();
                                tracing::trace!(channel = %channel, "Received Pub/Sub message");
                                // No receivers is fine; the send result is irrelevant
                                let _ = self.fanout.send(ReceivedMessage::new(&channel, payload));
                            }
                            None => {
                                tracing::warn!("Pub/Sub stream ended");
                                return Err(SubscriberError::ChannelClosed);
                            }
                        },
                        cmd = self.control_rx.recv() => break cmd,
                    }
                }
            };

            match command {
                Some(Control::Join(channels)) => {
                    for channel in channels {
                        match pubsub.subscribe(&channel).await {
                            Ok(()) => {
                                tracing::debug!(channel = %channel, "Subscribed to channel");
                                self.active.write().await.insert(channel);
                            }
                            Err(e) => {
                                tracing::error!(channel = %channel, error = %e, "Failed to subscribe");
                            }
                        }
                    }
                }
                Some(Control::Leave(channels)) => {
                    for channel in channels {
                        match pubsub.unsubscribe(&channel).await {
                            Ok(()) => {
                                tracing::debug!(channel = %channel, "Unsubscribed from channel");
                                self.active.write().await.remove(&channel);
                            }
                            Err(e) => {
                                tracing::error!(channel = %channel, error = %e, "Failed to unsubscribe");
                            }
                        }
                    }
                }
                Some(Control::Stop) | None => return Ok(()),
            }
        }
    }
}

/// Builder for subscriber
pub struct SubscriberBuilder {
    config: SubscriberConfig,
    initial_channels: Vec<PubSubChannel>,
}

impl SubscriberBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: SubscriberConfig::default(),
            initial_channels: Vec::new(),
        }
    }

    #[must_use]
    pub fn redis_url(mut self, url: impl Into<String>) -> Self {
        self.config.redis_url = url.into();
        self
    }

    #[must_use]
    pub fn broadcast_buffer(mut self, size: usize) -> Self {
        self.config.broadcast_buffer = size;
        self
    }

    #[must_use]
    pub fn reconnect_delay_ms(mut self, delay: u64) -> Self {
        self.config.reconnect_delay_ms = delay;
        self
    }

    /// Join a channel as soon as the listener starts
    #[must_use]
    pub fn subscribe(mut self, channel: PubSubChannel) -> Self {
        self.initial_channels.push(channel);
        self
    }

    /// Build and start the subscriber
    pub async fn build(self) -> SubscriberResult<Subscriber> {
        let subscriber = Subscriber::new(self.config).await?;
        if !self.initial_channels.is_empty() {
            subscriber.subscribe(&self.initial_channels).await?;
        }
        Ok(subscriber)
    }
}

impl Default for SubscriberBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pubsub::ChangeKind;

    #[test]
    fn test_received_message_parses_known_payloads() {
        let payload = r#"{"kind":"MEDIA_CREATE","data":{}}"#.to_string();
        let msg = ReceivedMessage::new("event:12345", payload.clone());

        assert_eq!(
            msg.channel,
            PubSubChannel::Event(album_core::Snowflake::from(12345i64))
        );
        assert_eq!(msg.event.as_ref().map(|e| e.kind), Some(ChangeKind::MediaCreate));
        assert_eq!(msg.payload, payload);
    }

    #[test]
    fn test_received_message_keeps_unparseable_payload_raw() {
        let msg = ReceivedMessage::new("event:123", "invalid".to_string());
        assert!(msg.event.is_none());
        assert_eq!(msg.payload, "invalid");
    }

    #[test]
    fn test_config_defaults() {
        let config = SubscriberConfig::default();
        assert_eq!(config.redis_url, "redis://127.0.0.1:6379");
        assert_eq!(config.broadcast_buffer, 1024);
        assert_eq!(config.reconnect_delay_ms, 1000);
    }

    #[test]
    fn test_builder_accumulates_settings() {
        let builder = SubscriberBuilder::new()
            .redis_url("redis://localhost:6380")
            .broadcast_buffer(2048)
            .reconnect_delay_ms(500)
            .subscribe(PubSubChannel::broadcast());

        assert_eq!(builder.config.redis_url, "redis://localhost:6380");
        assert_eq!(builder.config.broadcast_buffer, 2048);
        assert_eq!(builder.config.reconnect_delay_ms, 500);
        assert_eq!(builder.initial_channels.len(), 1);
    }
}
