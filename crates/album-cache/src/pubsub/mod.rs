//! Realtime change-notification channel over Redis Pub/Sub

mod channels;
mod publisher;
mod subscriber;

pub use channels::{PubSubChannel, BROADCAST_CHANNEL, EVENT_CHANNEL_PREFIX};
pub use publisher::{ChangeKind, PubSubEvent, Publisher};
pub use subscriber::{
    ReceivedMessage, Subscriber, SubscriberBuilder, SubscriberConfig, SubscriberError,
    SubscriberResult,
};
