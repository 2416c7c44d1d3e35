//! Feed subscription lifecycle
//!
//! A `FeedHandle` pairs one `EventFeed` with one pub/sub subscription. It is
//! created when a client starts viewing an event and switched or closed when
//! the client navigates away; switching always unsubscribes the prior channel
//! before subscribing the new one so no cross-event notifications leak in
//! and no handler runs twice.

use std::sync::Arc;

use album_cache::{ChangeKind, PubSubChannel, ReceivedMessage, Subscriber};
use album_core::entities::MediaItem;
use album_core::value_objects::Snowflake;
use tokio::sync::{broadcast, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::fetcher::FeedFetcher;
use crate::state::EventFeed;

/// A live, subscribed view of one event
pub struct FeedHandle<F: FeedFetcher + 'static> {
    subscriber: Arc<Subscriber>,
    fetcher: Arc<F>,
    feed: Arc<RwLock<EventFeed>>,
    worker: JoinHandle<()>,
}

impl<F: FeedFetcher + 'static> FeedHandle<F> {
    /// Open a feed for an event: refetch state, subscribe its channel, and
    /// start merging notifications in the background
    pub async fn open(
        subscriber: Arc<Subscriber>,
        fetcher: Arc<F>,
        event_id: Snowflake,
    ) -> Result<Self, album_cache::SubscriberError> {
        let feed = Arc::new(RwLock::new(EventFeed::new(event_id)));

        refetch_all(&feed, fetcher.as_ref()).await;
        subscriber
            .subscribe(&[PubSubChannel::event(event_id)])
            .await?;

        let worker = tokio::spawn(merge_loop(
            subscriber.receiver(),
            feed.clone(),
            fetcher.clone(),
        ));

        Ok(Self {
            subscriber,
            fetcher,
            feed,
            worker,
        })
    }

    /// A point-in-time copy of the feed state
    pub async fn snapshot(&self) -> EventFeed {
        self.feed.read().await.clone()
    }

    /// Switch to viewing a different event
    ///
    /// Tears down the old subscription first, clears the state, refetches,
    /// then subscribes the new channel. Stale notifications for the old
    /// event that are already in flight are dropped by the event-id filter
    /// in the merge loop.
    pub async fn switch_event(
        &self,
        event_id: Snowflake,
    ) -> Result<(), album_cache::SubscriberError> {
        let previous = self.feed.read().await.event_id();
        if previous == event_id {
            return Ok(());
        }

        self.subscriber
            .unsubscribe(&[PubSubChannel::event(previous)])
            .await?;

        {
            let mut feed = self.feed.write().await;
            *feed = EventFeed::new(event_id);
        }

        refetch_all(&self.feed, self.fetcher.as_ref()).await;
        self.subscriber
            .subscribe(&[PubSubChannel::event(event_id)])
            .await?;

        debug!(from = %previous, to = %event_id, "Feed switched events");

        Ok(())
    }

    /// Stop merging and release the subscription
    pub async fn close(self) -> Result<(), album_cache::SubscriberError> {
        let event_id = self.feed.read().await.event_id();
        self.worker.abort();
        self.subscriber
            .unsubscribe(&[PubSubChannel::event(event_id)])
            .await
    }
}

/// Consume notifications until the channel closes
async fn merge_loop<F: FeedFetcher>(
    mut rx: broadcast::Receiver<ReceivedMessage>,
    feed: Arc<RwLock<EventFeed>>,
    fetcher: Arc<F>,
) {
    loop {
        match rx.recv().await {
            Ok(message) => apply_message(&feed, fetcher.as_ref(), &message).await,
            Err(broadcast::error::RecvError::Lagged(missed)) => {
                // Notifications were dropped; the cache may be arbitrarily
                // stale, so resync everything
                warn!(missed, "Feed receiver lagged, refetching");
                refetch_all(&feed, fetcher.as_ref()).await;
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}

/// Merge one received notification into the feed
///
/// Messages for other events (or that fail to parse as a known change kind)
/// are ignored. Media inserts take the merge fast path; media deletes apply
/// the advisory id and then refetch, because the delete payload is not
/// trusted to identify the row; reaction changes always refetch the full
/// reaction set.
async fn apply_message<F: FeedFetcher>(
    feed: &Arc<RwLock<EventFeed>>,
    fetcher: &F,
    message: &ReceivedMessage,
) {
    let current = feed.read().await.event_id();
    match message.channel {
        PubSubChannel::Event(id) if id == current => {}
        _ => return,
    }

    let Some(event) = &message.event else {
        debug!("Ignoring unparseable notification payload");
        return;
    };

    match event.kind {
        ChangeKind::MediaCreate => {
            match serde_json::from_value::<MediaItem>(event.data.clone()) {
                Ok(item) => {
                    let merged = feed.write().await.apply_media_insert(item);
                    debug!(merged, "Merged media insert");
                }
                Err(e) => {
                    // A payload we cannot read is as good as a missed
                    // notification; resync the list
                    warn!(error = %e, "Bad media insert payload, refetching");
                    refetch_media(feed, fetcher).await;
                }
            }
        }
        ChangeKind::MediaDelete => {
            if let Some(media_id) = message
                .event
                .as_ref()
                .and_then(|e| e.data.get("media_id"))
                .and_then(|v| serde_json::from_value::<Snowflake>(v.clone()).ok())
            {
                feed.write().await.apply_media_remove(media_id);
            }
            // The payload is advisory only; the refetch is authoritative
            refetch_media(feed, fetcher).await;
        }
        ChangeKind::ReactionAdd | ChangeKind::ReactionRemove => {
            refetch_reactions(feed, fetcher).await;
        }
    }
}

async fn refetch_all<F: FeedFetcher>(feed: &Arc<RwLock<EventFeed>>, fetcher: &F) {
    refetch_media(feed, fetcher).await;
    refetch_reactions(feed, fetcher).await;
}

async fn refetch_media<F: FeedFetcher>(feed: &Arc<RwLock<EventFeed>>, fetcher: &F) {
    let event_id = feed.read().await.event_id();
    match fetcher.fetch_media(event_id).await {
        Ok(items) => {
            let mut feed = feed.write().await;
            // The view may have switched events while the fetch was in flight
            if feed.event_id() == event_id {
                feed.replace_media(items);
            }
        }
        Err(e) => warn!(error = %e, "Media refetch failed, keeping stale view"),
    }
}

async fn refetch_reactions<F: FeedFetcher>(feed: &Arc<RwLock<EventFeed>>, fetcher: &F) {
    let event_id = feed.read().await.event_id();
    match fetcher.fetch_reactions(event_id).await {
        Ok(reactions) => {
            let mut feed = feed.write().await;
            if feed.event_id() == event_id {
                feed.replace_reactions(reactions);
            }
        }
        Err(e) => warn!(error = %e, "Reaction refetch failed, keeping stale view"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use album_cache::PubSubEvent;
    use album_core::entities::{Reaction, ReactionEmoji};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    const EVENT: Snowflake = Snowflake::new(10);

    /// Fetcher over mutable in-memory state, counting refetches
    #[derive(Default)]
    struct FakeFetcher {
        media: Mutex<Vec<MediaItem>>,
        reactions: Mutex<Vec<Reaction>>,
        media_fetches: AtomicUsize,
        reaction_fetches: AtomicUsize,
    }

    #[async_trait::async_trait]
    impl FeedFetcher for FakeFetcher {
        async fn fetch_media(
            &self,
            _event_id: Snowflake,
        ) -> album_core::RepoResult<Vec<MediaItem>> {
            self.media_fetches.fetch_add(1, Ordering::SeqCst);
            Ok(self.media.lock().unwrap().clone())
        }

        async fn fetch_reactions(
            &self,
            _event_id: Snowflake,
        ) -> album_core::RepoResult<Vec<Reaction>> {
            self.reaction_fetches.fetch_add(1, Ordering::SeqCst);
            Ok(self.reactions.lock().unwrap().clone())
        }
    }

    fn item(id: i64) -> MediaItem {
        MediaItem::new(
            Snowflake::new(id),
            EVENT,
            format!("media/10/{id}.jpg"),
            "image/jpeg".to_string(),
            100,
            "jpg".to_string(),
        )
    }

    fn message(channel: PubSubChannel, kind: ChangeKind, data: serde_json::Value) -> ReceivedMessage {
        let event = PubSubEvent::new(kind, data);
        ReceivedMessage {
            channel,
            payload: event.to_json().unwrap(),
            event: Some(event),
        }
    }

    fn feed() -> Arc<RwLock<EventFeed>> {
        Arc::new(RwLock::new(EventFeed::new(EVENT)))
    }

    #[tokio::test]
    async fn test_media_create_merges_without_refetch() {
        let fetcher = FakeFetcher::default();
        let feed = feed();

        let msg = message(
            PubSubChannel::event(EVENT),
            ChangeKind::MediaCreate,
            serde_json::to_value(item(1)).unwrap(),
        );
        apply_message(&feed, &fetcher, &msg).await;

        assert_eq!(feed.read().await.media().len(), 1);
        assert_eq!(fetcher.media_fetches.load(Ordering::SeqCst), 0);

        // The same notification delivered twice changes nothing
        apply_message(&feed, &fetcher, &msg).await;
        assert_eq!(feed.read().await.media().len(), 1);
    }

    #[tokio::test]
    async fn test_media_delete_applies_advisory_id_and_refetches() {
        let fetcher = FakeFetcher::default();
        *fetcher.media.lock().unwrap() = vec![item(2)];
        let feed = feed();
        feed.write().await.replace_media(vec![item(1), item(2)]);

        let msg = message(
            PubSubChannel::event(EVENT),
            ChangeKind::MediaDelete,
            serde_json::json!({ "media_id": Snowflake::new(1) }),
        );
        apply_message(&feed, &fetcher, &msg).await;

        let state = feed.read().await;
        assert_eq!(state.media().len(), 1);
        assert_eq!(state.media()[0].id, Snowflake::new(2));
        assert_eq!(fetcher.media_fetches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_reaction_notifications_always_refetch() {
        let fetcher = FakeFetcher::default();
        *fetcher.reactions.lock().unwrap() = vec![Reaction::new(
            Snowflake::new(100),
            Snowflake::new(1),
            ReactionEmoji::Heart,
            "g1".to_string(),
        )];
        let feed = feed();

        for kind in [ChangeKind::ReactionAdd, ChangeKind::ReactionRemove] {
            let msg = message(PubSubChannel::event(EVENT), kind, serde_json::json!({}));
            apply_message(&feed, &fetcher, &msg).await;
        }

        assert_eq!(fetcher.reaction_fetches.load(Ordering::SeqCst), 2);
        assert_eq!(feed.read().await.reactions().len(), 1);
    }

    #[tokio::test]
    async fn test_other_event_channels_are_ignored() {
        let fetcher = FakeFetcher::default();
        let feed = feed();

        let msg = message(
            PubSubChannel::event(Snowflake::new(99)),
            ChangeKind::MediaCreate,
            serde_json::to_value(item(1)).unwrap(),
        );
        apply_message(&feed, &fetcher, &msg).await;

        assert!(feed.read().await.media().is_empty());
        assert_eq!(fetcher.media_fetches.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_unparseable_payload_is_dropped() {
        let fetcher = FakeFetcher::default();
        let feed = feed();

        let msg = ReceivedMessage {
            channel: PubSubChannel::event(EVENT),
            event: None,
            payload: "garbage".to_string(),
        };
        apply_message(&feed, &fetcher, &msg).await;

        assert!(feed.read().await.media().is_empty());
    }

    #[tokio::test]
    async fn test_bad_insert_payload_falls_back_to_refetch() {
        let fetcher = FakeFetcher::default();
        *fetcher.media.lock().unwrap() = vec![item(7)];
        let feed = feed();

        let msg = message(
            PubSubChannel::event(EVENT),
            ChangeKind::MediaCreate,
            serde_json::json!({ "not": "a media item" }),
        );
        apply_message(&feed, &fetcher, &msg).await;

        assert_eq!(fetcher.media_fetches.load(Ordering::SeqCst), 1);
        assert_eq!(feed.read().await.media().len(), 1);
    }
}
