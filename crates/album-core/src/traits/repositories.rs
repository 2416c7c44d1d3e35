//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;

use crate::entities::{Event, MediaItem, Owner, Reaction, ReactionEmoji};
use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Owner Repository
// ============================================================================

#[async_trait]
pub trait OwnerRepository: Send + Sync {
    /// Find owner by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Owner>>;

    /// Find owner by email
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<Owner>>;

    /// Check if email is already taken
    async fn email_exists(&self, email: &str) -> RepoResult<bool>;

    /// Create a new owner
    async fn create(&self, owner: &Owner, password_hash: &str) -> RepoResult<()>;

    /// Get password hash for authentication
    async fn get_password_hash(&self, id: Snowflake) -> RepoResult<Option<String>>;
}

// ============================================================================
// Event Repository
// ============================================================================

#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Find event by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Event>>;

    /// Find event by its guest-enterable code
    async fn find_by_code(&self, code: &str) -> RepoResult<Option<Event>>;

    /// List all events belonging to an owner, newest first
    async fn find_by_owner(&self, owner_id: Snowflake) -> RepoResult<Vec<Event>>;

    /// Create a new event
    ///
    /// Returns `DomainError::EventCodeExists` when the generated code
    /// collides; the caller retries with a fresh code.
    async fn create(&self, event: &Event) -> RepoResult<()>;

    /// Update an existing event (the code is never touched)
    async fn update(&self, event: &Event) -> RepoResult<()>;

    /// Delete an event; media and reaction rows cascade
    async fn delete(&self, id: Snowflake) -> RepoResult<()>;
}

// ============================================================================
// Media Repository
// ============================================================================

#[async_trait]
pub trait MediaRepository: Send + Sync {
    /// Find media item by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<MediaItem>>;

    /// List all media in an event, newest first (created_at desc, id desc)
    async fn find_by_event(&self, event_id: Snowflake) -> RepoResult<Vec<MediaItem>>;

    /// Create a new media item
    async fn create(&self, item: &MediaItem) -> RepoResult<()>;

    /// Delete a media item; its reactions cascade
    async fn delete(&self, id: Snowflake) -> RepoResult<()>;

    /// Count media items in an event
    async fn count_by_event(&self, event_id: Snowflake) -> RepoResult<i64>;
}

// ============================================================================
// Reaction Repository
// ============================================================================

#[async_trait]
pub trait ReactionRepository: Send + Sync {
    /// Find the reaction row for a (media, emoji, participant) triple
    async fn find(
        &self,
        media_id: Snowflake,
        emoji: ReactionEmoji,
        participant_id: &str,
    ) -> RepoResult<Option<Reaction>>;

    /// Get all reactions for a media item
    async fn find_by_media(&self, media_id: Snowflake) -> RepoResult<Vec<Reaction>>;

    /// Get all reactions under an event (for a full feed refetch)
    async fn find_by_event(&self, event_id: Snowflake) -> RepoResult<Vec<Reaction>>;

    /// Insert a reaction row
    ///
    /// Returns `false` when the (media, emoji, participant) row already
    /// exists; the storage layer enforces the uniqueness, so a lost
    /// check-then-act race surfaces here instead of as a duplicate.
    async fn create(&self, reaction: &Reaction) -> RepoResult<bool>;

    /// Delete the reaction row for a triple; returns whether a row was removed
    async fn delete(
        &self,
        media_id: Snowflake,
        emoji: ReactionEmoji,
        participant_id: &str,
    ) -> RepoResult<bool>;

    /// Count reactions by emoji for a media item
    async fn count_by_emoji(&self, media_id: Snowflake) -> RepoResult<Vec<(ReactionEmoji, i64)>>;
}
