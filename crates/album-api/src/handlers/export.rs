//! Batch export handler

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};
use album_service::{ExportService, Requester};

use crate::extractors::OptionalAuthOwner;
use crate::response::{ApiError, ApiResult};
use crate::state::AppState;

/// Download an event's media as a single zip archive
///
/// GET /events/{event_id}/export
///
/// Guests may export only when the event allows downloads; the owner can
/// always export their own event.
pub async fn export_event(
    State(state): State<AppState>,
    OptionalAuthOwner(owner_id): OptionalAuthOwner,
    Path(event_id): Path<String>,
) -> ApiResult<Response> {
    let event_id = event_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid event_id format"))?;

    let requester = match owner_id {
        Some(id) => Requester::Owner(id),
        None => Requester::Guest,
    };

    let service = ExportService::new(state.service_context());
    let archive = service.export_event(event_id, requester).await?;

    let headers = [
        (header::CONTENT_TYPE, "application/zip".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", archive.file_name),
        ),
    ];

    Ok((headers, archive.bytes).into_response())
}
