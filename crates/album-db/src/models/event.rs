//! Event database model

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;

/// Database model for the events table
#[derive(Debug, Clone, FromRow)]
pub struct EventModel {
    pub id: i64,
    pub code: String,
    pub title: String,
    pub description: Option<String>,
    pub event_date: Option<NaiveDate>,
    pub allow_downloads: bool,
    pub owner_id: i64,
    pub created_at: DateTime<Utc>,
}
