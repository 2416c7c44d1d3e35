//! # album-cache
//!
//! Redis layer providing the connection pool and the realtime
//! change-notification channel.
//!
//! Every write to media or reactions is published on a per-event channel;
//! viewing clients subscribe to exactly one event channel at a time and
//! merge the notifications into their local feed state.

pub mod pool;
pub mod pubsub;

// Re-export pool types
pub use pool::{create_shared_pool, RedisPool, RedisPoolConfig, RedisPoolError, RedisResult, SharedRedisPool};

// Re-export pubsub types
pub use pubsub::{
    ChangeKind, PubSubChannel, PubSubEvent, Publisher, ReceivedMessage, Subscriber,
    SubscriberBuilder, SubscriberConfig, SubscriberError, SubscriberResult, BROADCAST_CHANNEL,
    EVENT_CHANNEL_PREFIX,
};
