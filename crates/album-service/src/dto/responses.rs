//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.
//! Snowflake IDs serialize as strings for JavaScript compatibility.

use album_core::entities::{ReactionBadge, ReactionEmoji};
use album_core::value_objects::Snowflake;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::services::ToggleState;

// ============================================================================
// Auth Responses
// ============================================================================

/// Owner account
#[derive(Debug, Clone, Serialize)]
pub struct OwnerResponse {
    pub id: Snowflake,
    pub email: String,
    pub display_name: String,
    pub created_at: DateTime<Utc>,
}

/// Successful register/login response
#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    pub owner: OwnerResponse,
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

// ============================================================================
// Event Responses
// ============================================================================

/// A single event
#[derive(Debug, Clone, Serialize)]
pub struct EventResponse {
    pub id: Snowflake,
    pub code: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_date: Option<NaiveDate>,
    pub allow_downloads: bool,
    pub owner_id: Snowflake,
    pub created_at: DateTime<Utc>,
}

/// An event plus aggregates, for owner dashboards
#[derive(Debug, Clone, Serialize)]
pub struct EventSummaryResponse {
    #[serde(flatten)]
    pub event: EventResponse,
    pub media_count: i64,
}

// ============================================================================
// Media Responses
// ============================================================================

/// A media item with its resolved public URL
#[derive(Debug, Clone, Serialize)]
pub struct MediaResponse {
    pub id: Snowflake,
    pub event_id: Snowflake,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uploader_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    pub file_type: String,
    pub file_size: i64,
    pub is_video: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_secs: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<i32>,
    pub file_extension: String,
    pub created_at: DateTime<Utc>,
}

/// One file that did not make it into the event
#[derive(Debug, Clone, Serialize)]
pub struct UploadFailureResponse {
    pub filename: String,
    pub reason: String,
}

/// Settlement summary of an upload batch
#[derive(Debug, Clone, Serialize)]
pub struct UploadSummaryResponse {
    pub uploaded: Vec<MediaResponse>,
    pub failed: Vec<UploadFailureResponse>,
}

// ============================================================================
// Reaction Responses
// ============================================================================

/// A raw reaction row
#[derive(Debug, Clone, Serialize)]
pub struct ReactionResponse {
    pub id: Snowflake,
    pub media_id: Snowflake,
    pub emoji: ReactionEmoji,
    pub participant_id: String,
    pub created_at: DateTime<Utc>,
}

/// Badge counts for one media item
#[derive(Debug, Clone, Serialize)]
pub struct BadgeListResponse {
    pub media_id: Snowflake,
    pub badges: Vec<ReactionBadge>,
}

/// Result of a toggle, with the re-synchronized badge counts
#[derive(Debug, Clone, Serialize)]
pub struct ToggleReactionResponse {
    pub state: ToggleState,
    pub badges: Vec<ReactionBadge>,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Liveness response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

impl HealthResponse {
    #[must_use]
    pub fn healthy() -> Self {
        Self { status: "ok" }
    }
}

/// Readiness response with per-dependency health
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    pub database: bool,
    pub cache: bool,
}

impl ReadinessResponse {
    #[must_use]
    pub fn ready(database: bool, cache: bool) -> Self {
        Self {
            ready: database && cache,
            database,
            cache,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_response() {
        let response = HealthResponse::healthy();
        assert_eq!(response.status, "ok");
    }

    #[test]
    fn test_readiness_requires_both() {
        assert!(ReadinessResponse::ready(true, true).ready);
        assert!(!ReadinessResponse::ready(true, false).ready);
        assert!(!ReadinessResponse::ready(false, true).ready);
    }

    #[test]
    fn test_toggle_state_serializes_snake_case() {
        let json = serde_json::to_string(&ToggleState::AlreadyPresent).unwrap();
        assert_eq!(json, "\"already_present\"");
    }
}
