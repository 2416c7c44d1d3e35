//! Reaction handlers
//!
//! The toggle endpoint plus read paths for badge counts and the full
//! per-event reaction set (used by realtime consumers for refetches).

use axum::{
    extract::{Path, State},
    Json,
};
use album_core::entities::ReactionEmoji;
use album_core::DomainError;
use album_service::{
    BadgeListResponse, ReactionResponse, ReactionService, ToggleReactionResponse,
};

use crate::extractors::Participant;
use crate::response::{ApiError, ApiResult};
use crate::state::AppState;

/// Toggle the caller's reaction on a media item
///
/// POST /media/{media_id}/reactions/{emoji}/toggle
///
/// Returns the resulting state together with re-synchronized badge counts.
pub async fn toggle_reaction(
    State(state): State<AppState>,
    participant: Participant,
    Path((media_id, emoji)): Path<(String, String)>,
) -> ApiResult<Json<ToggleReactionResponse>> {
    let media_id = media_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid media_id format"))?;
    let emoji = ReactionEmoji::parse(&emoji)
        .ok_or_else(|| ApiError::Domain(DomainError::UnknownEmoji(emoji.clone())))?;

    let service = ReactionService::new(state.service_context());
    let toggle_state = service.toggle(media_id, emoji, participant.as_str()).await?;
    let badges = service.media_badges(media_id, participant.as_str()).await?;

    Ok(Json(ToggleReactionResponse {
        state: toggle_state,
        badges,
    }))
}

/// Badge counts for a media item
///
/// GET /media/{media_id}/reactions
pub async fn get_media_badges(
    State(state): State<AppState>,
    participant: Participant,
    Path(media_id): Path<String>,
) -> ApiResult<Json<BadgeListResponse>> {
    let media_id = media_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid media_id format"))?;

    let service = ReactionService::new(state.service_context());
    let badges = service.media_badges(media_id, participant.as_str()).await?;

    Ok(Json(BadgeListResponse { media_id, badges }))
}

/// All reactions under an event, for realtime consumers' full refetch
///
/// GET /events/{event_id}/reactions
pub async fn list_event_reactions(
    State(state): State<AppState>,
    Path(event_id): Path<String>,
) -> ApiResult<Json<Vec<ReactionResponse>>> {
    let event_id = event_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid event_id format"))?;

    let service = ReactionService::new(state.service_context());
    let reactions = service.list_event_reactions(event_id).await?;

    Ok(Json(reactions.iter().map(ReactionResponse::from).collect()))
}
