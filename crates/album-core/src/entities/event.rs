//! Event entity - a code-identified photo/video collection

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{EventCode, Snowflake};

/// Event (album) entity
///
/// The `code` is what guests type or scan; it is generated server-side and
/// never changes after the event is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: Snowflake,
    pub code: EventCode,
    pub title: String,
    pub description: Option<String>,
    pub event_date: Option<NaiveDate>,
    pub allow_downloads: bool,
    pub owner_id: Snowflake,
    pub created_at: DateTime<Utc>,
}

impl Event {
    /// Create a new Event
    pub fn new(id: Snowflake, code: EventCode, title: String, owner_id: Snowflake) -> Self {
        Self {
            id,
            code,
            title,
            description: None,
            event_date: None,
            allow_downloads: true,
            owner_id,
            created_at: Utc::now(),
        }
    }

    /// Check if a participant is the event owner
    #[inline]
    pub fn is_owner(&self, owner_id: Snowflake) -> bool {
        self.owner_id == owner_id
    }

    /// Set the optional description
    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    /// Set the optional event date
    pub fn with_date(mut self, event_date: Option<NaiveDate>) -> Self {
        self.event_date = event_date;
        self
    }

    /// Set whether guests may download the collected media
    pub fn with_downloads(mut self, allow_downloads: bool) -> Self {
        self.allow_downloads = allow_downloads;
        self
    }
}
