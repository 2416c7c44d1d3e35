//! Service layer - one service per use-case family

mod auth;
mod context;
mod error;
mod event;
mod export;
mod media;
mod probe;
mod reaction;

pub use auth::AuthService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use event::{EventService, EventSummary};
pub use export::{ExportArchive, ExportService, Requester};
pub use media::{MediaService, UploadFailure, UploadFile, UploadOutcome};
pub use probe::FfprobeProbe;
pub use reaction::{ReactionService, ToggleState};
