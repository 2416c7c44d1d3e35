//! Media handlers
//!
//! Batch upload (multipart), listing, and owner-gated deletion.

use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use album_service::{
    MediaResponse, MediaService, UploadFailureResponse, UploadFile, UploadSummaryResponse,
};

use crate::extractors::AuthOwner;
use crate::response::{ApiError, ApiResult, NoContent};
use crate::state::AppState;

/// Upload a batch of files into an event
///
/// POST /events/{event_id}/media
///
/// Multipart fields: any number of `file` parts, plus optional
/// `uploader_name` and `caption` text parts shared by the whole batch.
/// Open to guests; no authentication required.
pub async fn upload_media(
    State(state): State<AppState>,
    Path(event_id): Path<String>,
    mut multipart: Multipart,
) -> ApiResult<Json<UploadSummaryResponse>> {
    let event_id = event_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid event_id format"))?;

    let mut files = Vec::new();
    let mut uploader_name: Option<String> = None;
    let mut caption: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::invalid_body(e.to_string()))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("uploader_name") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| ApiError::invalid_body(e.to_string()))?;
                uploader_name = Some(text).filter(|s| !s.trim().is_empty());
            }
            Some("caption") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| ApiError::invalid_body(e.to_string()))?;
                caption = Some(text).filter(|s| !s.trim().is_empty());
            }
            Some("file") => {
                let filename = field
                    .file_name()
                    .unwrap_or("upload.bin")
                    .to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::invalid_body(e.to_string()))?;

                files.push(UploadFile {
                    filename,
                    content_type,
                    bytes: bytes.to_vec(),
                });
            }
            _ => {
                // Unknown parts are skipped, not rejected
            }
        }
    }

    if files.is_empty() {
        return Err(ApiError::invalid_body("No files in upload"));
    }

    let service = MediaService::new(state.service_context());
    let outcome = service
        .upload_batch(event_id, files, uploader_name, caption)
        .await?;

    let uploaded = outcome
        .uploaded
        .iter()
        .map(|item| MediaResponse::from_item(item, service.public_url(item)))
        .collect();
    let failed = outcome.failed.iter().map(UploadFailureResponse::from).collect();

    Ok(Json(UploadSummaryResponse { uploaded, failed }))
}

/// List an event's media, newest first
///
/// GET /events/{event_id}/media
pub async fn list_media(
    State(state): State<AppState>,
    Path(event_id): Path<String>,
) -> ApiResult<Json<Vec<MediaResponse>>> {
    let event_id = event_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid event_id format"))?;

    let service = MediaService::new(state.service_context());
    let items = service.list_media(event_id).await?;

    Ok(Json(
        items
            .iter()
            .map(|item| MediaResponse::from_item(item, service.public_url(item)))
            .collect(),
    ))
}

/// Delete a media item (event owner only)
///
/// DELETE /media/{media_id}
pub async fn delete_media(
    State(state): State<AppState>,
    auth: AuthOwner,
    Path(media_id): Path<String>,
) -> ApiResult<NoContent> {
    let media_id = media_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid media_id format"))?;

    let service = MediaService::new(state.service_context());
    service.delete_media(auth.owner_id, media_id).await?;
    Ok(NoContent)
}
