//! Per-event live view state
//!
//! `EventFeed` owns the ordered media list and the reaction set for one
//! event. All mutation goes through three entry points: insert-merge,
//! delete-merge, and full-replace. There is no index-based splicing; every
//! merge keys on entity identity so duplicate or out-of-order notification
//! delivery cannot corrupt the view.

use album_core::entities::{MediaItem, Reaction, ReactionBadge, ReactionEmoji};
use album_core::value_objects::Snowflake;

/// Live view state for one event
#[derive(Debug, Clone)]
pub struct EventFeed {
    event_id: Snowflake,
    /// Newest first, ordered by (created_at, id) descending
    media: Vec<MediaItem>,
    reactions: Vec<Reaction>,
}

impl EventFeed {
    /// Create an empty feed for an event
    #[must_use]
    pub fn new(event_id: Snowflake) -> Self {
        Self {
            event_id,
            media: Vec::new(),
            reactions: Vec::new(),
        }
    }

    /// The event this feed tracks
    #[must_use]
    pub fn event_id(&self) -> Snowflake {
        self.event_id
    }

    /// The media list, newest first
    #[must_use]
    pub fn media(&self) -> &[MediaItem] {
        &self.media
    }

    /// The raw reaction set
    #[must_use]
    pub fn reactions(&self) -> &[Reaction] {
        &self.reactions
    }

    // ========================================================================
    // Mutation entry points
    // ========================================================================

    /// Insert-merge a media item by id
    ///
    /// Returns false (and changes nothing) for an item belonging to another
    /// event or one already present, which makes duplicate delivery of the
    /// same notification a no-op. A genuinely new item is placed by its sort
    /// key, so the newest-first order holds without a refetch.
    pub fn apply_media_insert(&mut self, item: MediaItem) -> bool {
        if item.event_id != self.event_id {
            return false;
        }
        if self.media.iter().any(|m| m.id == item.id) {
            return false;
        }

        let position = self
            .media
            .iter()
            .position(|m| m.sort_key() < item.sort_key())
            .unwrap_or(self.media.len());
        self.media.insert(position, item);
        true
    }

    /// Delete-merge a media item by id
    ///
    /// Idempotent: removing an id that is not present is a no-op. Reactions
    /// hanging off the removed item are dropped with it.
    pub fn apply_media_remove(&mut self, media_id: Snowflake) -> bool {
        let before = self.media.len();
        self.media.retain(|m| m.id != media_id);
        let removed = self.media.len() < before;
        if removed {
            self.reactions.retain(|r| r.media_id != media_id);
        }
        removed
    }

    /// Full-replace the media list from an authoritative fetch
    ///
    /// The input may arrive in any order; it is re-sorted newest first.
    /// Ties on `created_at` break by id and never panic.
    pub fn replace_media(&mut self, mut items: Vec<MediaItem>) {
        items.retain(|m| m.event_id == self.event_id);
        items.sort_by(|a, b| b.sort_key().cmp(&a.sort_key()));
        items.dedup_by_key(|m| m.id);
        self.media = items;
    }

    /// Full-replace the reaction set from an authoritative fetch
    pub fn replace_reactions(&mut self, reactions: Vec<Reaction>) {
        self.reactions = reactions;
    }

    // ========================================================================
    // Derived presentation state
    // ========================================================================

    /// Per-emoji badge counts for one media item
    ///
    /// The count spans all participants; `me` is a strict match on the
    /// caller's identity.
    #[must_use]
    pub fn badges(&self, media_id: Snowflake, participant_id: &str) -> Vec<ReactionBadge> {
        ReactionEmoji::ALL
            .into_iter()
            .filter_map(|emoji| {
                let count = self
                    .reactions
                    .iter()
                    .filter(|r| r.media_id == media_id && r.emoji == emoji)
                    .count() as i64;
                if count == 0 {
                    return None;
                }
                let me = self.has_reacted(media_id, emoji, participant_id);
                Some(ReactionBadge::new(emoji, count, me))
            })
            .collect()
    }

    /// Whether the given participant has reacted with the given emoji
    #[must_use]
    pub fn has_reacted(
        &self,
        media_id: Snowflake,
        emoji: ReactionEmoji,
        participant_id: &str,
    ) -> bool {
        self.reactions
            .iter()
            .any(|r| r.media_id == media_id && r.emoji == emoji && r.is_by(participant_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    const EVENT: Snowflake = Snowflake::new(10);

    fn item(id: i64, age_secs: i64) -> MediaItem {
        let mut item = MediaItem::new(
            Snowflake::new(id),
            EVENT,
            format!("media/10/{id}.jpg"),
            "image/jpeg".to_string(),
            100,
            "jpg".to_string(),
        );
        item.created_at = Utc::now() - Duration::seconds(age_secs);
        item
    }

    fn reaction(id: i64, media_id: i64, emoji: ReactionEmoji, who: &str) -> Reaction {
        Reaction::new(Snowflake::new(id), Snowflake::new(media_id), emoji, who.to_string())
    }

    fn ids(feed: &EventFeed) -> Vec<i64> {
        feed.media().iter().map(|m| m.id.into_inner()).collect()
    }

    #[test]
    fn test_insert_keeps_newest_first() {
        let mut feed = EventFeed::new(EVENT);
        feed.replace_media(vec![item(1, 30), item(2, 10)]);
        assert_eq!(ids(&feed), vec![2, 1]);

        // A brand new item lands at the front
        assert!(feed.apply_media_insert(item(3, 0)));
        assert_eq!(ids(&feed), vec![3, 2, 1]);

        // An older item merges into the middle, not the front
        assert!(feed.apply_media_insert(item(4, 20)));
        assert_eq!(ids(&feed), vec![3, 2, 4, 1]);
    }

    #[test]
    fn test_duplicate_delivery_is_a_no_op() {
        let mut feed = EventFeed::new(EVENT);
        let fresh = item(1, 0);

        assert!(feed.apply_media_insert(fresh.clone()));
        // The same insert arriving again (direct response + notification)
        assert!(!feed.apply_media_insert(fresh));
        assert_eq!(feed.media().len(), 1);
    }

    #[test]
    fn test_foreign_event_items_are_rejected() {
        let mut feed = EventFeed::new(EVENT);
        let mut foreign = item(1, 0);
        foreign.event_id = Snowflake::new(99);

        assert!(!feed.apply_media_insert(foreign.clone()));
        assert!(feed.media().is_empty());

        // replace_media also filters them
        feed.replace_media(vec![foreign, item(2, 0)]);
        assert_eq!(ids(&feed), vec![2]);
    }

    #[test]
    fn test_created_at_ties_break_by_id_without_panicking() {
        let mut feed = EventFeed::new(EVENT);
        let now = Utc::now();
        let mut a = item(1, 0);
        let mut b = item(2, 0);
        a.created_at = now;
        b.created_at = now;

        feed.replace_media(vec![a.clone(), b.clone()]);
        assert_eq!(ids(&feed), vec![2, 1]);

        // Inserting a third tied item keeps a total order
        let mut c = item(3, 0);
        c.created_at = now;
        assert!(feed.apply_media_insert(c));
        assert_eq!(ids(&feed), vec![3, 2, 1]);
    }

    #[test]
    fn test_remove_is_idempotent_and_drops_reactions() {
        let mut feed = EventFeed::new(EVENT);
        feed.replace_media(vec![item(1, 10), item(2, 0)]);
        feed.replace_reactions(vec![
            reaction(100, 1, ReactionEmoji::Heart, "g1"),
            reaction(101, 2, ReactionEmoji::Star, "g1"),
        ]);

        assert!(feed.apply_media_remove(Snowflake::new(1)));
        assert_eq!(ids(&feed), vec![2]);
        assert_eq!(feed.reactions().len(), 1);

        // Second delivery of the same delete
        assert!(!feed.apply_media_remove(Snowflake::new(1)));
        assert_eq!(ids(&feed), vec![2]);
    }

    #[test]
    fn test_replace_media_sorts_and_dedups() {
        let mut feed = EventFeed::new(EVENT);
        let duplicate = item(1, 10);
        feed.replace_media(vec![duplicate.clone(), item(2, 0), duplicate]);
        assert_eq!(ids(&feed), vec![2, 1]);
    }

    #[test]
    fn test_badges_span_participants_but_me_is_scoped() {
        let mut feed = EventFeed::new(EVENT);
        feed.replace_media(vec![item(1, 0)]);
        feed.replace_reactions(vec![
            reaction(100, 1, ReactionEmoji::Heart, "g1"),
            reaction(101, 1, ReactionEmoji::Heart, "g2"),
        ]);

        let media_id = Snowflake::new(1);

        let g1 = feed.badges(media_id, "g1");
        assert_eq!(g1.len(), 1);
        assert_eq!((g1[0].emoji, g1[0].count, g1[0].me), (ReactionEmoji::Heart, 2, true));

        let g3 = feed.badges(media_id, "g3");
        assert_eq!((g3[0].count, g3[0].me), (2, false));

        assert!(feed.has_reacted(media_id, ReactionEmoji::Heart, "g2"));
        assert!(!feed.has_reacted(media_id, ReactionEmoji::Star, "g2"));
    }

    #[test]
    fn test_badge_sequence_follows_toggles() {
        // heart: g1 on -> g2 on -> g1 off, counts 1 -> 2 -> 1
        let mut feed = EventFeed::new(EVENT);
        feed.replace_media(vec![item(1, 0)]);
        let media_id = Snowflake::new(1);

        feed.replace_reactions(vec![reaction(100, 1, ReactionEmoji::Heart, "g1")]);
        let badges = feed.badges(media_id, "g1");
        assert_eq!((badges[0].count, badges[0].me), (1, true));

        feed.replace_reactions(vec![
            reaction(100, 1, ReactionEmoji::Heart, "g1"),
            reaction(101, 1, ReactionEmoji::Heart, "g2"),
        ]);
        assert_eq!(feed.badges(media_id, "g1")[0].count, 2);

        feed.replace_reactions(vec![reaction(101, 1, ReactionEmoji::Heart, "g2")]);
        let badges = feed.badges(media_id, "g1");
        assert_eq!((badges[0].count, badges[0].me), (1, false));
    }
}
