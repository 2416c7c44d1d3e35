//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::Snowflake;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Owner not found: {0}")]
    OwnerNotFound(Snowflake),

    #[error("Event not found: {0}")]
    EventNotFound(Snowflake),

    #[error("No event with code: {0}")]
    EventCodeNotFound(String),

    #[error("Media not found: {0}")]
    MediaNotFound(Snowflake),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Invalid event code: {0}")]
    InvalidEventCode(String),

    #[error("Unknown reaction emoji: {0}")]
    UnknownEmoji(String),

    #[error("Password too weak: {0}")]
    WeakPassword(String),

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Not event owner")]
    NotEventOwner,

    #[error("Downloads are disabled for this event")]
    DownloadsDisabled,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Email already in use")]
    EmailAlreadyExists,

    #[error("Event code already taken")]
    EventCodeExists,

    #[error("Reaction already exists")]
    ReactionAlreadyExists,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Cache error: {0}")]
    CacheError(String),

    #[error("Blob storage error: {0}")]
    StorageError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::OwnerNotFound(_) => "UNKNOWN_OWNER",
            Self::EventNotFound(_) => "UNKNOWN_EVENT",
            Self::EventCodeNotFound(_) => "UNKNOWN_EVENT_CODE",
            Self::MediaNotFound(_) => "UNKNOWN_MEDIA",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::InvalidEventCode(_) => "INVALID_EVENT_CODE",
            Self::UnknownEmoji(_) => "UNKNOWN_EMOJI",
            Self::WeakPassword(_) => "WEAK_PASSWORD",

            // Authorization
            Self::NotEventOwner => "NOT_EVENT_OWNER",
            Self::DownloadsDisabled => "DOWNLOADS_DISABLED",

            // Conflict
            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",
            Self::EventCodeExists => "EVENT_CODE_EXISTS",
            Self::ReactionAlreadyExists => "REACTION_ALREADY_EXISTS",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::CacheError(_) => "CACHE_ERROR",
            Self::StorageError(_) => "STORAGE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::OwnerNotFound(_)
                | Self::EventNotFound(_)
                | Self::EventCodeNotFound(_)
                | Self::MediaNotFound(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::InvalidEmail
                | Self::InvalidEventCode(_)
                | Self::UnknownEmoji(_)
                | Self::WeakPassword(_)
        )
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::NotEventOwner | Self::DownloadsDisabled)
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::EmailAlreadyExists | Self::EventCodeExists | Self::ReactionAlreadyExists
        )
    }
}
