//! Test fixtures and data generators
//!
//! Provides reusable test data and response shapes for integration tests.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

// ============================================================================
// Requests
// ============================================================================

/// Owner registration request
#[derive(Debug, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub display_name: String,
    pub password: String,
}

impl RegisterRequest {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        // Process-unique plus time so reruns against the same database pass
        let millis = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or(0);
        Self {
            email: format!("owner{suffix}x{millis}@example.com"),
            display_name: format!("Owner {suffix}"),
            password: "TestPass123".to_string(),
        }
    }
}

/// Owner login request
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn from_register(register: &RegisterRequest) -> Self {
        Self {
            email: register.email.clone(),
            password: register.password.clone(),
        }
    }
}

/// Create event request
#[derive(Debug, Serialize)]
pub struct CreateEventRequest {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_downloads: Option<bool>,
}

impl CreateEventRequest {
    pub fn unique() -> Self {
        Self {
            title: format!("Event {}", unique_suffix()),
            description: Some("Integration test event".to_string()),
            allow_downloads: None,
        }
    }
}

// ============================================================================
// Responses
// ============================================================================

/// Owner in auth responses
#[derive(Debug, Deserialize)]
pub struct OwnerResponse {
    pub id: String,
    pub email: String,
    pub display_name: String,
}

/// Register/login response
#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    pub owner: OwnerResponse,
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// Event response
#[derive(Debug, Deserialize)]
pub struct EventResponse {
    pub id: String,
    pub code: String,
    pub title: String,
    pub allow_downloads: bool,
    pub owner_id: String,
}

/// Media response
#[derive(Debug, Deserialize)]
pub struct MediaResponse {
    pub id: String,
    pub event_id: String,
    pub url: String,
    pub file_type: String,
    pub file_size: i64,
    pub is_video: bool,
    pub file_extension: String,
}

/// One failed file in an upload summary
#[derive(Debug, Deserialize)]
pub struct UploadFailureResponse {
    pub filename: String,
    pub reason: String,
}

/// Upload batch summary
#[derive(Debug, Deserialize)]
pub struct UploadSummaryResponse {
    pub uploaded: Vec<MediaResponse>,
    pub failed: Vec<UploadFailureResponse>,
}

/// Per-emoji badge
#[derive(Debug, Deserialize)]
pub struct Badge {
    pub emoji: String,
    pub count: i64,
    pub me: bool,
}

/// Toggle response
#[derive(Debug, Deserialize)]
pub struct ToggleResponse {
    pub state: String,
    pub badges: Vec<Badge>,
}

/// Badge listing response
#[derive(Debug, Deserialize)]
pub struct BadgeListResponse {
    pub media_id: String,
    pub badges: Vec<Badge>,
}
