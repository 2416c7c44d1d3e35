//! Reaction entity - an emoji marker a participant places on a media item

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::value_objects::Snowflake;

/// The closed set of reaction emoji
///
/// Kept as an enum so an unknown or misspelled kind fails at parse time
/// instead of silently missing a lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReactionEmoji {
    Heart,
    Thumbs,
    Star,
    Laugh,
}

impl ReactionEmoji {
    /// All emoji kinds, in badge display order
    pub const ALL: [ReactionEmoji; 4] = [Self::Heart, Self::Thumbs, Self::Star, Self::Laugh];

    /// Stable wire/storage name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Heart => "heart",
            Self::Thumbs => "thumbs",
            Self::Star => "star",
            Self::Laugh => "laugh",
        }
    }

    /// Parse a stable name back into the enum
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "heart" => Some(Self::Heart),
            "thumbs" => Some(Self::Thumbs),
            "star" => Some(Self::Star),
            "laugh" => Some(Self::Laugh),
            _ => None,
        }
    }

    /// The rendered glyph
    pub fn glyph(&self) -> &'static str {
        match self {
            Self::Heart => "\u{2764}\u{fe0f}",
            Self::Thumbs => "\u{1f44d}",
            Self::Star => "\u{2b50}",
            Self::Laugh => "\u{1f602}",
        }
    }
}

impl fmt::Display for ReactionEmoji {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reaction entity
///
/// At most one row exists per (media, emoji, participant) triple; the store
/// enforces this with a unique constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reaction {
    pub id: Snowflake,
    pub media_id: Snowflake,
    pub emoji: ReactionEmoji,
    /// Owner id rendered as a string, or an ephemeral guest identity
    pub participant_id: String,
    pub created_at: DateTime<Utc>,
}

impl Reaction {
    /// Create a new Reaction
    pub fn new(
        id: Snowflake,
        media_id: Snowflake,
        emoji: ReactionEmoji,
        participant_id: String,
    ) -> Self {
        Self {
            id,
            media_id,
            emoji,
            participant_id,
            created_at: Utc::now(),
        }
    }

    /// Check if this reaction belongs to the given participant
    #[inline]
    pub fn is_by(&self, participant_id: &str) -> bool {
        self.participant_id == participant_id
    }
}

/// Aggregated per-emoji count for one media item, with the viewer's own state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReactionBadge {
    pub emoji: ReactionEmoji,
    pub count: i64,
    pub me: bool,
}

impl ReactionBadge {
    /// Create a new ReactionBadge
    pub fn new(emoji: ReactionEmoji, count: i64, me: bool) -> Self {
        Self { emoji, count, me }
    }
}
