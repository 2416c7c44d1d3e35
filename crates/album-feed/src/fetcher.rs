//! Authoritative refetch port for the feed
//!
//! The feed never trusts its cache; deletes and reaction changes pull the
//! full set back from whatever read API is available. In-process that is the
//! repository pair; a remote client would implement this over HTTP.

use std::sync::Arc;

use async_trait::async_trait;

use album_core::entities::{MediaItem, Reaction};
use album_core::traits::{MediaRepository, ReactionRepository, RepoResult};
use album_core::value_objects::Snowflake;

/// Read API the feed uses for full refetches
#[async_trait]
pub trait FeedFetcher: Send + Sync {
    /// Fetch the full media list of an event, newest first
    async fn fetch_media(&self, event_id: Snowflake) -> RepoResult<Vec<MediaItem>>;

    /// Fetch the full reaction set of an event
    async fn fetch_reactions(&self, event_id: Snowflake) -> RepoResult<Vec<Reaction>>;
}

/// Fetcher over the repository traits
#[derive(Clone)]
pub struct RepoFetcher {
    media: Arc<dyn MediaRepository>,
    reactions: Arc<dyn ReactionRepository>,
}

impl RepoFetcher {
    /// Create a new RepoFetcher
    pub fn new(media: Arc<dyn MediaRepository>, reactions: Arc<dyn ReactionRepository>) -> Self {
        Self { media, reactions }
    }
}

#[async_trait]
impl FeedFetcher for RepoFetcher {
    async fn fetch_media(&self, event_id: Snowflake) -> RepoResult<Vec<MediaItem>> {
        self.media.find_by_event(event_id).await
    }

    async fn fetch_reactions(&self, event_id: Snowflake) -> RepoResult<Vec<Reaction>> {
        self.reactions.find_by_event(event_id).await
    }
}
