//! # album-feed
//!
//! The realtime merge layer: keeps a client's view of one event current by
//! merging pub/sub change notifications into local state.
//!
//! The rules, in order of trust:
//! - local state is a disposable cache; the store is authoritative
//! - media inserts merge by entity id (idempotent under duplicate delivery,
//!   safe under out-of-order arrival) and preserve newest-first order
//! - media deletes and every reaction notification trigger a full refetch
//! - subscriptions are scoped to the event being viewed; switching events
//!   tears the old channel down before the new one comes up

mod fetcher;
mod handle;
mod state;

pub use fetcher::{FeedFetcher, RepoFetcher};
pub use handle::FeedHandle;
pub use state::EventFeed;
