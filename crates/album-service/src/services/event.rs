//! Event service
//!
//! Handles event creation (including the server-side code generation with
//! collision retry), lookup by id or code, owner-gated updates, and
//! cascading deletion with blob release.

use album_core::entities::Event;
use album_core::value_objects::{EventCode, Snowflake};
use album_core::DomainError;
use tracing::{info, instrument, warn};

use crate::dto::{CreateEventRequest, UpdateEventRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// How many fresh codes to try before giving up on creation
const MAX_CODE_ATTEMPTS: usize = 8;

/// An event paired with its media count, for owner dashboards
#[derive(Debug, Clone)]
pub struct EventSummary {
    pub event: Event,
    pub media_count: i64,
}

/// Event service
pub struct EventService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> EventService<'a> {
    /// Create a new EventService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a new event for an owner
    ///
    /// The code is generated here and inserted optimistically; a unique
    /// violation means another event holds that code, so a fresh one is
    /// generated and the insert retried.
    #[instrument(skip(self, request))]
    pub async fn create_event(
        &self,
        owner_id: Snowflake,
        request: CreateEventRequest,
    ) -> ServiceResult<Event> {
        for attempt in 1..=MAX_CODE_ATTEMPTS {
            let code = EventCode::generate();
            let event = Event::new(
                self.ctx.generate_id(),
                code,
                request.title.clone(),
                owner_id,
            )
            .with_description(request.description.clone())
            .with_date(request.event_date)
            .with_downloads(request.allow_downloads.unwrap_or(true));

            match self.ctx.event_repo().create(&event).await {
                Ok(()) => {
                    info!(
                        event_id = %event.id,
                        code = %event.code,
                        owner_id = %owner_id,
                        "Event created"
                    );
                    return Ok(event);
                }
                Err(DomainError::EventCodeExists) => {
                    warn!(attempt, code = %event.code, "Event code collision, retrying");
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(ServiceError::internal(
            "exhausted event code generation attempts",
        ))
    }

    /// Get an event by id
    #[instrument(skip(self))]
    pub async fn get_event(&self, event_id: Snowflake) -> ServiceResult<Event> {
        self.ctx
            .event_repo()
            .find_by_id(event_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Event", event_id.to_string()))
    }

    /// Resolve a guest-entered code to an event
    #[instrument(skip(self))]
    pub async fn get_event_by_code(&self, raw_code: &str) -> ServiceResult<Event> {
        let code = EventCode::parse(raw_code)
            .map_err(|e| DomainError::InvalidEventCode(e.to_string()))?;

        self.ctx
            .event_repo()
            .find_by_code(code.as_str())
            .await?
            .ok_or_else(|| DomainError::EventCodeNotFound(code.as_str().to_string()).into())
    }

    /// List an owner's events with media counts, newest first
    #[instrument(skip(self))]
    pub async fn list_owner_events(&self, owner_id: Snowflake) -> ServiceResult<Vec<EventSummary>> {
        let events = self.ctx.event_repo().find_by_owner(owner_id).await?;

        let mut summaries = Vec::with_capacity(events.len());
        for event in events {
            let media_count = self.ctx.media_repo().count_by_event(event.id).await?;
            summaries.push(EventSummary { event, media_count });
        }

        Ok(summaries)
    }

    /// Update an event's mutable fields; the code never changes
    #[instrument(skip(self, request))]
    pub async fn update_event(
        &self,
        owner_id: Snowflake,
        event_id: Snowflake,
        request: UpdateEventRequest,
    ) -> ServiceResult<Event> {
        let mut event = self.get_owned_event(owner_id, event_id).await?;

        if let Some(title) = request.title {
            event.title = title;
        }
        if let Some(description) = request.description {
            event.description = Some(description);
        }
        if let Some(event_date) = request.event_date {
            event.event_date = Some(event_date);
        }
        if let Some(allow_downloads) = request.allow_downloads {
            event.allow_downloads = allow_downloads;
        }

        self.ctx.event_repo().update(&event).await?;

        info!(event_id = %event.id, "Event updated");

        Ok(event)
    }

    /// Delete an event; rows cascade, blobs are released best-effort
    #[instrument(skip(self))]
    pub async fn delete_event(&self, owner_id: Snowflake, event_id: Snowflake) -> ServiceResult<()> {
        let event = self.get_owned_event(owner_id, event_id).await?;

        // Collect storage keys before the rows cascade away
        let media = self.ctx.media_repo().find_by_event(event.id).await?;

        self.ctx.event_repo().delete(event.id).await?;

        for item in &media {
            if let Err(e) = self.ctx.blob_store().delete(&item.storage_path).await {
                warn!(
                    media_id = %item.id,
                    storage_path = %item.storage_path,
                    error = %e,
                    "Failed to release blob for deleted event"
                );
            }
        }

        info!(event_id = %event.id, media = media.len(), "Event deleted");

        Ok(())
    }

    /// Load an event and verify the caller owns it
    async fn get_owned_event(
        &self,
        owner_id: Snowflake,
        event_id: Snowflake,
    ) -> ServiceResult<Event> {
        let event = self.get_event(event_id).await?;
        if !event.is_owner(owner_id) {
            return Err(DomainError::NotEventOwner.into());
        }
        Ok(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{test_context, test_context_with, ContextOptions};

    fn create_request() -> CreateEventRequest {
        CreateEventRequest {
            title: "Garden Party".to_string(),
            description: Some("Bring hats".to_string()),
            event_date: None,
            allow_downloads: None,
        }
    }

    #[tokio::test]
    async fn test_create_event_generates_valid_code() {
        let ctx = test_context();
        let service = EventService::new(&ctx);

        let event = service
            .create_event(Snowflake::new(100), create_request())
            .await
            .unwrap();

        assert_eq!(event.code.as_str().len(), 6);
        assert!(EventCode::parse(event.code.as_str()).is_ok());
        assert!(event.allow_downloads);
    }

    #[tokio::test]
    async fn test_create_event_retries_on_code_collision() {
        // The fake repo rejects the first two inserts with EventCodeExists
        let ctx = test_context_with(ContextOptions {
            event_code_collisions: 2,
            ..ContextOptions::default()
        });
        let service = EventService::new(&ctx);

        let event = service
            .create_event(Snowflake::new(100), create_request())
            .await
            .unwrap();

        assert!(EventCode::parse(event.code.as_str()).is_ok());
    }

    #[tokio::test]
    async fn test_get_event_by_code_normalizes_input() {
        let ctx = test_context();
        let service = EventService::new(&ctx);

        let event = service
            .create_event(Snowflake::new(100), create_request())
            .await
            .unwrap();

        let lowercase = event.code.as_str().to_lowercase();
        let found = service.get_event_by_code(&lowercase).await.unwrap();
        assert_eq!(found.id, event.id);
    }

    #[tokio::test]
    async fn test_get_event_by_unknown_code_is_not_found() {
        let ctx = test_context();
        let service = EventService::new(&ctx);

        let err = service.get_event_by_code("ZZZZZ9").await.unwrap_err();
        assert_eq!(err.status_code(), 404);

        let err = service.get_event_by_code("bad!").await.unwrap_err();
        assert_eq!(err.status_code(), 400);
    }

    #[tokio::test]
    async fn test_update_requires_ownership() {
        let ctx = test_context();
        let service = EventService::new(&ctx);

        let event = service
            .create_event(Snowflake::new(100), create_request())
            .await
            .unwrap();

        let err = service
            .update_event(
                Snowflake::new(999),
                event.id,
                UpdateEventRequest {
                    title: Some("Hijacked".to_string()),
                    ..UpdateEventRequest::default()
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 403);
    }

    #[tokio::test]
    async fn test_update_changes_fields_but_not_code() {
        let ctx = test_context();
        let service = EventService::new(&ctx);

        let event = service
            .create_event(Snowflake::new(100), create_request())
            .await
            .unwrap();
        let original_code = event.code.clone();

        let updated = service
            .update_event(
                Snowflake::new(100),
                event.id,
                UpdateEventRequest {
                    title: Some("Renamed".to_string()),
                    allow_downloads: Some(false),
                    ..UpdateEventRequest::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.title, "Renamed");
        assert!(!updated.allow_downloads);
        assert_eq!(updated.code, original_code);
    }

    #[tokio::test]
    async fn test_delete_requires_ownership() {
        let ctx = test_context();
        let service = EventService::new(&ctx);

        let event = service
            .create_event(Snowflake::new(100), create_request())
            .await
            .unwrap();

        let err = service
            .delete_event(Snowflake::new(999), event.id)
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 403);

        service.delete_event(Snowflake::new(100), event.id).await.unwrap();
        let err = service.get_event(event.id).await.unwrap_err();
        assert_eq!(err.status_code(), 404);
    }
}
