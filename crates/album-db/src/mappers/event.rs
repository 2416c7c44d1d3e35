//! Event entity <-> model mapper
//!
//! Conversion is fallible: a row whose code no longer parses is reported as
//! a database error instead of panicking.

use album_core::entities::Event;
use album_core::error::DomainError;
use album_core::value_objects::{EventCode, Snowflake};

use crate::models::EventModel;

impl TryFrom<EventModel> for Event {
    type Error = DomainError;

    fn try_from(model: EventModel) -> Result<Self, Self::Error> {
        let code = EventCode::parse(&model.code)
            .map_err(|e| DomainError::DatabaseError(format!("corrupt event code: {e}")))?;

        Ok(Event {
            id: Snowflake::new(model.id),
            code,
            title: model.title,
            description: model.description,
            event_date: model.event_date,
            allow_downloads: model.allow_downloads,
            owner_id: Snowflake::new(model.owner_id),
            created_at: model.created_at,
        })
    }
}
