//! Event handlers
//!
//! Endpoints for event creation, lookup (by id and by guest code),
//! owner-gated updates, and deletion.

use axum::{
    extract::{Path, State},
    Json,
};
use album_service::{
    CreateEventRequest, EventResponse, EventService, EventSummaryResponse, UpdateEventRequest,
};

use crate::extractors::{AuthOwner, ValidatedJson};
use crate::response::{ApiError, ApiResult, Created, NoContent};
use crate::state::AppState;

/// Create a new event
///
/// POST /events
pub async fn create_event(
    State(state): State<AppState>,
    auth: AuthOwner,
    ValidatedJson(request): ValidatedJson<CreateEventRequest>,
) -> ApiResult<Created<Json<EventResponse>>> {
    let service = EventService::new(state.service_context());
    let event = service.create_event(auth.owner_id, request).await?;
    Ok(Created(Json(EventResponse::from(&event))))
}

/// List the authenticated owner's events
///
/// GET /events/@me
pub async fn list_own_events(
    State(state): State<AppState>,
    auth: AuthOwner,
) -> ApiResult<Json<Vec<EventSummaryResponse>>> {
    let service = EventService::new(state.service_context());
    let summaries = service.list_owner_events(auth.owner_id).await?;
    Ok(Json(summaries.iter().map(EventSummaryResponse::from).collect()))
}

/// Get event by ID
///
/// GET /events/{event_id}
pub async fn get_event(
    State(state): State<AppState>,
    Path(event_id): Path<String>,
) -> ApiResult<Json<EventResponse>> {
    let event_id = event_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid event_id format"))?;

    let service = EventService::new(state.service_context());
    let event = service.get_event(event_id).await?;
    Ok(Json(EventResponse::from(&event)))
}

/// Resolve a guest-entered code to an event
///
/// GET /events/code/{code}
pub async fn get_event_by_code(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> ApiResult<Json<EventResponse>> {
    let service = EventService::new(state.service_context());
    let event = service.get_event_by_code(&code).await?;
    Ok(Json(EventResponse::from(&event)))
}

/// Update event settings
///
/// PATCH /events/{event_id}
pub async fn update_event(
    State(state): State<AppState>,
    auth: AuthOwner,
    Path(event_id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateEventRequest>,
) -> ApiResult<Json<EventResponse>> {
    let event_id = event_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid event_id format"))?;

    let service = EventService::new(state.service_context());
    let event = service.update_event(auth.owner_id, event_id, request).await?;
    Ok(Json(EventResponse::from(&event)))
}

/// Delete an event, its media, and its reactions
///
/// DELETE /events/{event_id}
pub async fn delete_event(
    State(state): State<AppState>,
    auth: AuthOwner,
    Path(event_id): Path<String>,
) -> ApiResult<NoContent> {
    let event_id = event_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid event_id format"))?;

    let service = EventService::new(state.service_context());
    service.delete_event(auth.owner_id, event_id).await?;
    Ok(NoContent)
}
