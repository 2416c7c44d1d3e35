//! PostgreSQL implementation of MediaRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use album_core::entities::MediaItem;
use album_core::traits::{MediaRepository, RepoResult};
use album_core::value_objects::Snowflake;

use crate::models::MediaModel;

use super::error::{map_db_error, media_not_found};

/// PostgreSQL implementation of MediaRepository
#[derive(Clone)]
pub struct PgMediaRepository {
    pool: PgPool,
}

impl PgMediaRepository {
    /// Create a new PgMediaRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MediaRepository for PgMediaRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<MediaItem>> {
        let result = sqlx::query_as::<_, MediaModel>(
            r"
            SELECT id, event_id, storage_path, uploader_name, caption, file_type,
                   file_size, is_video, duration_secs, width, height, file_extension, created_at
            FROM media
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(MediaItem::from))
    }

    #[instrument(skip(self))]
    async fn find_by_event(&self, event_id: Snowflake) -> RepoResult<Vec<MediaItem>> {
        // created_at is the sole sort key; id breaks ties so the order is stable
        let results = sqlx::query_as::<_, MediaModel>(
            r"
            SELECT id, event_id, storage_path, uploader_name, caption, file_type,
                   file_size, is_video, duration_secs, width, height, file_extension, created_at
            FROM media
            WHERE event_id = $1
            ORDER BY created_at DESC, id DESC
            ",
        )
        .bind(event_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(MediaItem::from).collect())
    }

    #[instrument(skip(self))]
    async fn create(&self, item: &MediaItem) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO media (id, event_id, storage_path, uploader_name, caption, file_type,
                               file_size, is_video, duration_secs, width, height, file_extension, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            ",
        )
        .bind(item.id.into_inner())
        .bind(item.event_id.into_inner())
        .bind(&item.storage_path)
        .bind(&item.uploader_name)
        .bind(&item.caption)
        .bind(&item.file_type)
        .bind(item.file_size)
        .bind(item.is_video)
        .bind(item.duration_secs)
        .bind(item.width)
        .bind(item.height)
        .bind(&item.file_extension)
        .bind(item.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            DELETE FROM media WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(media_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn count_by_event(&self, event_id: Snowflake) -> RepoResult<i64> {
        let result = sqlx::query_scalar::<_, i64>(
            r"
            SELECT COUNT(*) FROM media WHERE event_id = $1
            ",
        )
        .bind(event_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result)
    }
}
