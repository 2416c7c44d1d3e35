//! Batch export (zip) builder
//!
//! Pulls every media blob of an event and packages them into one in-memory
//! zip archive. Items are fetched sequentially; a failed fetch is logged and
//! skipped, the archive still ships with everything that succeeded.

use std::io::{Cursor, Write};

use album_core::entities::MediaItem;
use album_core::traits::BlobStore;
use album_core::value_objects::Snowflake;
use album_core::DomainError;
use tracing::{debug, info, instrument, warn};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Who is asking for the export
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requester {
    /// An authenticated owner
    Owner(Snowflake),
    /// An anonymous guest
    Guest,
}

/// A finished export archive
#[derive(Debug)]
pub struct ExportArchive {
    /// Suggested download file name
    pub file_name: String,
    /// The zip bytes
    pub bytes: Vec<u8>,
    /// Items included in the archive
    pub included: usize,
    /// Items skipped because their blob could not be fetched
    pub skipped: usize,
}

/// Export service
pub struct ExportService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ExportService<'a> {
    /// Create a new ExportService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Export all media of an event as a single zip download
    ///
    /// Guests are admitted only when the event allows downloads; the owner
    /// can always export their own event.
    #[instrument(skip(self))]
    pub async fn export_event(
        &self,
        event_id: Snowflake,
        requester: Requester,
    ) -> ServiceResult<ExportArchive> {
        let event = self
            .ctx
            .event_repo()
            .find_by_id(event_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Event", event_id.to_string()))?;

        let is_owner = matches!(requester, Requester::Owner(id) if event.is_owner(id));
        if !is_owner && !event.allow_downloads {
            return Err(DomainError::DownloadsDisabled.into());
        }

        let items = self.ctx.media_repo().find_by_event(event_id).await?;
        let total = items.len();

        let (bytes, included, skipped) =
            build_archive(&items, self.ctx.blob_store(), |done, total| {
                debug!(done, total, "Export progress");
            })
            .await?;

        info!(
            event_id = %event_id,
            included,
            skipped,
            total,
            "Export archive built"
        );

        Ok(ExportArchive {
            file_name: format!("{}.zip", event.code),
            bytes,
            included,
            skipped,
        })
    }
}

/// Assemble a zip archive from an ordered media list
///
/// Entry names are deterministic: position (1-based, zero padded) plus the
/// original extension. `progress` is invoked after every item, success or
/// skip, with (done, total).
pub async fn build_archive(
    items: &[MediaItem],
    store: &dyn BlobStore,
    mut progress: impl FnMut(usize, usize),
) -> ServiceResult<(Vec<u8>, usize, usize)> {
    let total = items.len();
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));

    let mut included = 0;
    let mut skipped = 0;

    for (index, item) in items.iter().enumerate() {
        match store.fetch(&item.storage_path).await {
            Ok(bytes) => {
                let entry_name = format!("{:04}.{}", index + 1, item.file_extension);
                writer
                    .start_file(entry_name, SimpleFileOptions::default())
                    .map_err(|e| ServiceError::internal(format!("zip entry failed: {e}")))?;
                writer
                    .write_all(&bytes)
                    .map_err(|e| ServiceError::internal(format!("zip write failed: {e}")))?;
                included += 1;
            }
            Err(e) => {
                warn!(
                    media_id = %item.id,
                    storage_path = %item.storage_path,
                    error = %e,
                    "Skipping media item in export"
                );
                skipped += 1;
            }
        }

        progress(index + 1, total);
    }

    let cursor = writer
        .finish()
        .map_err(|e| ServiceError::internal(format!("zip finish failed: {e}")))?;

    Ok((cursor.into_inner(), included, skipped))
}
