//! Media database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the media table
#[derive(Debug, Clone, FromRow)]
pub struct MediaModel {
    pub id: i64,
    pub event_id: i64,
    pub storage_path: String,
    pub uploader_name: Option<String>,
    pub caption: Option<String>,
    pub file_type: String,
    pub file_size: i64,
    pub is_video: bool,
    pub duration_secs: Option<i32>,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub file_extension: String,
    pub created_at: DateTime<Utc>,
}
