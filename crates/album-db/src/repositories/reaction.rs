//! PostgreSQL implementation of ReactionRepository
//!
//! The uniqueness of a (media, emoji, participant) triple lives in the
//! database constraint. `create` uses `ON CONFLICT DO NOTHING` so a racing
//! double-toggle collapses to a single row and reports `false` to the caller
//! instead of an error.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use album_core::entities::{Reaction, ReactionEmoji};
use album_core::traits::{ReactionRepository, RepoResult};
use album_core::value_objects::Snowflake;

use crate::models::{ReactionCountModel, ReactionModel};

use super::error::map_db_error;

/// PostgreSQL implementation of ReactionRepository
#[derive(Clone)]
pub struct PgReactionRepository {
    pool: PgPool,
}

impl PgReactionRepository {
    /// Create a new PgReactionRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReactionRepository for PgReactionRepository {
    #[instrument(skip(self))]
    async fn find(
        &self,
        media_id: Snowflake,
        emoji: ReactionEmoji,
        participant_id: &str,
    ) -> RepoResult<Option<Reaction>> {
        let result = sqlx::query_as::<_, ReactionModel>(
            r"
            SELECT id, media_id, emoji, participant_id, created_at
            FROM reactions
            WHERE media_id = $1 AND emoji = $2 AND participant_id = $3
            ",
        )
        .bind(media_id.into_inner())
        .bind(emoji.as_str())
        .bind(participant_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Reaction::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_media(&self, media_id: Snowflake) -> RepoResult<Vec<Reaction>> {
        let results = sqlx::query_as::<_, ReactionModel>(
            r"
            SELECT id, media_id, emoji, participant_id, created_at
            FROM reactions
            WHERE media_id = $1
            ORDER BY created_at
            ",
        )
        .bind(media_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results.into_iter().map(Reaction::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn find_by_event(&self, event_id: Snowflake) -> RepoResult<Vec<Reaction>> {
        let results = sqlx::query_as::<_, ReactionModel>(
            r"
            SELECT r.id, r.media_id, r.emoji, r.participant_id, r.created_at
            FROM reactions r
            JOIN media m ON m.id = r.media_id
            WHERE m.event_id = $1
            ORDER BY r.created_at
            ",
        )
        .bind(event_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results.into_iter().map(Reaction::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn create(&self, reaction: &Reaction) -> RepoResult<bool> {
        let result = sqlx::query(
            r"
            INSERT INTO reactions (id, media_id, emoji, participant_id, created_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (media_id, emoji, participant_id) DO NOTHING
            ",
        )
        .bind(reaction.id.into_inner())
        .bind(reaction.media_id.into_inner())
        .bind(reaction.emoji.as_str())
        .bind(&reaction.participant_id)
        .bind(reaction.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() == 1)
    }

    #[instrument(skip(self))]
    async fn delete(
        &self,
        media_id: Snowflake,
        emoji: ReactionEmoji,
        participant_id: &str,
    ) -> RepoResult<bool> {
        let result = sqlx::query(
            r"
            DELETE FROM reactions WHERE media_id = $1 AND emoji = $2 AND participant_id = $3
            ",
        )
        .bind(media_id.into_inner())
        .bind(emoji.as_str())
        .bind(participant_id)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn count_by_emoji(&self, media_id: Snowflake) -> RepoResult<Vec<(ReactionEmoji, i64)>> {
        let results = sqlx::query_as::<_, ReactionCountModel>(
            r"
            SELECT emoji, COUNT(*) as count
            FROM reactions
            WHERE media_id = $1
            GROUP BY emoji
            ORDER BY count DESC
            ",
        )
        .bind(media_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results
            .into_iter()
            .filter_map(|r| ReactionEmoji::parse(&r.emoji).map(|e| (e, r.count)))
            .collect())
    }
}
