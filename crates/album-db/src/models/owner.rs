//! Owner database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the owners table
#[derive(Debug, Clone, FromRow)]
pub struct OwnerModel {
    pub id: i64,
    pub email: String,
    pub display_name: String,
    pub created_at: DateTime<Utc>,
}
