//! Media upload coordinator and media management
//!
//! Uploads are batched but every file is handled independently: one file
//! failing at the blob or record step never aborts the rest of the batch.
//! The whole call reports a summary instead of raising.

use album_core::entities::MediaItem;
use album_core::value_objects::Snowflake;
use album_core::DomainError;
use chrono::Utc;
use rand::Rng;
use tracing::{info, instrument, warn};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// One user-selected file in an upload batch
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Why a single file did not make it into the event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFailure {
    pub filename: String,
    pub reason: String,
}

/// Result of an upload batch; never an error as a whole
#[derive(Debug, Default)]
pub struct UploadOutcome {
    pub uploaded: Vec<MediaItem>,
    pub failed: Vec<UploadFailure>,
}

/// Media service
pub struct MediaService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MediaService<'a> {
    /// Create a new MediaService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Upload a batch of files into an event
    ///
    /// `uploader_name` and `caption` are shared by every file in the batch.
    /// Each file runs the full pipeline independently: derive a storage key,
    /// classify, probe video metadata, write the blob, insert the record,
    /// publish the change. A per-file failure is collected into the outcome
    /// and the loop continues.
    #[instrument(skip(self, files), fields(batch = files.len()))]
    pub async fn upload_batch(
        &self,
        event_id: Snowflake,
        files: Vec<UploadFile>,
        uploader_name: Option<String>,
        caption: Option<String>,
    ) -> ServiceResult<UploadOutcome> {
        // The event itself must exist; everything after this is per-file
        self.ctx
            .event_repo()
            .find_by_id(event_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Event", event_id.to_string()))?;

        let mut outcome = UploadOutcome::default();

        for file in files {
            let filename = file.filename.clone();
            match self
                .upload_one(event_id, file, uploader_name.as_deref(), caption.as_deref())
                .await
            {
                Ok(item) => {
                    self.ctx.publisher().publish_media_create(&item).await.ok();
                    outcome.uploaded.push(item);
                }
                Err(reason) => {
                    warn!(filename = %filename, reason = %reason, "Upload failed for file");
                    outcome.failed.push(UploadFailure { filename, reason });
                }
            }
        }

        info!(
            event_id = %event_id,
            uploaded = outcome.uploaded.len(),
            failed = outcome.failed.len(),
            "Upload batch settled"
        );

        Ok(outcome)
    }

    /// Run the upload pipeline for a single file
    async fn upload_one(
        &self,
        event_id: Snowflake,
        file: UploadFile,
        uploader_name: Option<&str>,
        caption: Option<&str>,
    ) -> Result<MediaItem, String> {
        if file.bytes.is_empty() {
            return Err("file is empty".to_string());
        }

        let extension = extension_of(&file.filename);
        let storage_path = derive_storage_key(event_id, &extension);

        let is_video = file.content_type.starts_with("video/");
        // Metadata is advisory; a probe failure never fails the upload
        let metadata = if is_video {
            self.ctx.probe().probe(&file.bytes, &extension).await
        } else {
            None
        };

        self.ctx
            .blob_store()
            .put(&storage_path, &file.bytes)
            .await
            .map_err(|e| e.to_string())?;

        let item = MediaItem::new(
            self.ctx.generate_id(),
            event_id,
            storage_path.clone(),
            file.content_type,
            file.bytes.len() as i64,
            extension,
        )
        .with_attribution(
            uploader_name.map(str::to_string),
            caption.map(str::to_string),
        )
        .with_video_metadata(metadata);

        if let Err(e) = self.ctx.media_repo().create(&item).await {
            // The blob stays behind as an orphan; accepted leak
            warn!(
                storage_path = %storage_path,
                error = %e,
                "Media record insert failed after blob upload, orphaned blob left in place"
            );
            return Err(e.to_string());
        }

        Ok(item)
    }

    /// List an event's media, newest first
    #[instrument(skip(self))]
    pub async fn list_media(&self, event_id: Snowflake) -> ServiceResult<Vec<MediaItem>> {
        self.ctx
            .event_repo()
            .find_by_id(event_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Event", event_id.to_string()))?;

        Ok(self.ctx.media_repo().find_by_event(event_id).await?)
    }

    /// Delete a media item (event owner only) and release its blob
    #[instrument(skip(self))]
    pub async fn delete_media(&self, owner_id: Snowflake, media_id: Snowflake) -> ServiceResult<()> {
        let item = self
            .ctx
            .media_repo()
            .find_by_id(media_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Media", media_id.to_string()))?;

        let event = self
            .ctx
            .event_repo()
            .find_by_id(item.event_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Event", item.event_id.to_string()))?;

        if !event.is_owner(owner_id) {
            return Err(DomainError::NotEventOwner.into());
        }

        self.ctx.media_repo().delete(media_id).await?;

        if let Err(e) = self.ctx.blob_store().delete(&item.storage_path).await {
            warn!(
                media_id = %media_id,
                storage_path = %item.storage_path,
                error = %e,
                "Failed to release blob for deleted media"
            );
        }

        info!(media_id = %media_id, event_id = %event.id, "Media deleted");

        self.ctx
            .publisher()
            .publish_media_delete(event.id, media_id)
            .await
            .ok();

        Ok(())
    }

    /// Resolve the public URL of a media item
    pub fn public_url(&self, item: &MediaItem) -> String {
        self.ctx.blob_store().public_url(&item.storage_path)
    }
}

/// Derive a collision-resistant blob key from the event, time, and a nonce
fn derive_storage_key(event_id: Snowflake, extension: &str) -> String {
    let millis = Utc::now().timestamp_millis();
    let nonce: u32 = rand::thread_rng().gen();
    format!("media/{event_id}/{millis:x}-{nonce:08x}.{extension}")
}

/// Lower-cased extension of the original filename, defaulting to "bin"
fn extension_of(filename: &str) -> String {
    std::path::Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase)
        .unwrap_or_else(|| "bin".to_string())
}
