//! Participant identity extractor
//!
//! Guests carry their session identity in the `X-Participant-Id` header;
//! the value is minted client-side once per session and is opaque here.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use album_core::GuestIdentity;

use crate::response::ApiError;

/// The caller's participant identity (owner id string or guest session value)
#[derive(Debug, Clone)]
pub struct Participant(pub GuestIdentity);

impl Participant {
    /// Header carrying the ephemeral participant identity
    pub const HEADER: &'static str = "x-participant-id";

    /// The identity as a string slice
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Participant
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(Self::HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or(ApiError::MissingParticipant)?;

        let identity = GuestIdentity::parse(raw).ok_or(ApiError::MissingParticipant)?;

        Ok(Participant(identity))
    }
}
