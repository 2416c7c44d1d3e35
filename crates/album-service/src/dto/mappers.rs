//! Entity -> response DTO mappers

use album_core::entities::{Event, MediaItem, Owner, Reaction};

use crate::services::{EventSummary, UploadFailure};

use super::responses::{
    EventResponse, EventSummaryResponse, MediaResponse, OwnerResponse, ReactionResponse,
    UploadFailureResponse,
};

impl From<&Owner> for OwnerResponse {
    fn from(owner: &Owner) -> Self {
        Self {
            id: owner.id,
            email: owner.email.clone(),
            display_name: owner.display_name.clone(),
            created_at: owner.created_at,
        }
    }
}

impl From<&Event> for EventResponse {
    fn from(event: &Event) -> Self {
        Self {
            id: event.id,
            code: event.code.as_str().to_string(),
            title: event.title.clone(),
            description: event.description.clone(),
            event_date: event.event_date,
            allow_downloads: event.allow_downloads,
            owner_id: event.owner_id,
            created_at: event.created_at,
        }
    }
}

impl From<&EventSummary> for EventSummaryResponse {
    fn from(summary: &EventSummary) -> Self {
        Self {
            event: EventResponse::from(&summary.event),
            media_count: summary.media_count,
        }
    }
}

impl MediaResponse {
    /// Build from an item and its resolved public URL
    pub fn from_item(item: &MediaItem, url: String) -> Self {
        Self {
            id: item.id,
            event_id: item.event_id,
            url,
            uploader_name: item.uploader_name.clone(),
            caption: item.caption.clone(),
            file_type: item.file_type.clone(),
            file_size: item.file_size,
            is_video: item.is_video,
            duration_secs: item.duration_secs,
            width: item.width,
            height: item.height,
            file_extension: item.file_extension.clone(),
            created_at: item.created_at,
        }
    }
}

impl From<&Reaction> for ReactionResponse {
    fn from(reaction: &Reaction) -> Self {
        Self {
            id: reaction.id,
            media_id: reaction.media_id,
            emoji: reaction.emoji,
            participant_id: reaction.participant_id.clone(),
            created_at: reaction.created_at,
        }
    }
}

impl From<&UploadFailure> for UploadFailureResponse {
    fn from(failure: &UploadFailure) -> Self {
        Self {
            filename: failure.filename.clone(),
            reason: failure.reason.clone(),
        }
    }
}
