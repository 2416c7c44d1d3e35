//! Data transfer objects for the API surface

mod mappers;
mod requests;
mod responses;

pub use requests::{CreateEventRequest, LoginRequest, RegisterRequest, UpdateEventRequest};
pub use responses::{
    AuthResponse, BadgeListResponse, EventResponse, EventSummaryResponse, HealthResponse,
    MediaResponse, OwnerResponse, ReactionResponse, ReadinessResponse, ToggleReactionResponse,
    UploadFailureResponse, UploadSummaryResponse,
};
