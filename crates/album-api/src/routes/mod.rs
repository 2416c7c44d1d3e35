//! Route definitions
//!
//! All API routes organized by domain and mounted under /api/v1.

use axum::{
    routing::{delete, get, patch, post},
    Router,
};

use crate::handlers::{auth, events, export, health, media, reactions};
use crate::state::AppState;

/// Create the main API router with all routes (excluding health for separate middleware handling)
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api/v1", api_v1_routes())
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// API v1 routes
fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .merge(event_routes())
        .merge(media_routes())
}

/// Authentication routes
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
}

/// Event routes
fn event_routes() -> Router<AppState> {
    Router::new()
        // Event CRUD
        .route("/events", post(events::create_event))
        .route("/events/@me", get(events::list_own_events))
        .route("/events/code/:code", get(events::get_event_by_code))
        .route("/events/:event_id", get(events::get_event))
        .route("/events/:event_id", patch(events::update_event))
        .route("/events/:event_id", delete(events::delete_event))
        // Event media
        .route("/events/:event_id/media", get(media::list_media))
        .route("/events/:event_id/media", post(media::upload_media))
        // Event reactions (full set for realtime refetch)
        .route("/events/:event_id/reactions", get(reactions::list_event_reactions))
        // Batch export
        .route("/events/:event_id/export", get(export::export_event))
}

/// Media routes
fn media_routes() -> Router<AppState> {
    Router::new()
        .route("/media/:media_id", delete(media::delete_media))
        .route("/media/:media_id/reactions", get(reactions::get_media_badges))
        .route(
            "/media/:media_id/reactions/:emoji/toggle",
            post(reactions::toggle_reaction),
        )
}
