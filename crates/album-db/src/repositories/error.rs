//! Error handling utilities for repositories

use album_core::error::DomainError;
use album_core::value_objects::Snowflake;
use sqlx::Error as SqlxError;

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Check for unique violation and return appropriate error or fallback
pub fn map_unique_violation<F>(e: SqlxError, on_unique: F) -> DomainError
where
    F: FnOnce() -> DomainError,
{
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return on_unique();
        }
    }
    DomainError::DatabaseError(e.to_string())
}

/// Create an "owner not found" error
pub fn owner_not_found(id: Snowflake) -> DomainError {
    DomainError::OwnerNotFound(id)
}

/// Create an "event not found" error
pub fn event_not_found(id: Snowflake) -> DomainError {
    DomainError::EventNotFound(id)
}

/// Create a "media not found" error
pub fn media_not_found(id: Snowflake) -> DomainError {
    DomainError::MediaNotFound(id)
}
