//! # album-service
//!
//! Application layer - business logic over the repository, blob-store, and
//! pub/sub ports. The upload coordinator, reaction toggle protocol, and
//! batch export builder live here.

pub mod dto;
pub mod services;

#[cfg(test)]
pub(crate) mod testutil;

pub use dto::{
    AuthResponse, BadgeListResponse, CreateEventRequest, EventResponse, EventSummaryResponse,
    HealthResponse, LoginRequest, MediaResponse, OwnerResponse, ReactionResponse,
    ReadinessResponse, RegisterRequest, ToggleReactionResponse, UpdateEventRequest,
    UploadFailureResponse, UploadSummaryResponse,
};
pub use services::{
    AuthService, EventService, EventSummary, ExportArchive, ExportService, FfprobeProbe,
    MediaService, ReactionService, Requester, ServiceContext, ServiceContextBuilder, ServiceError,
    ServiceResult, ToggleState, UploadFailure, UploadFile, UploadOutcome,
};
