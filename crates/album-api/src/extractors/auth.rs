//! Owner authentication extractor
//!
//! Extracts and validates JWT tokens from the Authorization header.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use album_core::Snowflake;

use crate::response::ApiError;
use crate::state::AppState;

/// Authenticated owner extracted from a JWT access token
#[derive(Debug, Clone)]
pub struct AuthOwner {
    /// Owner ID from the JWT token
    pub owner_id: Snowflake,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthOwner
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        // Extract the Authorization header
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::MissingAuth)?;

        // Validate the token
        let app_state = AppState::from_ref(state);
        let claims = app_state
            .jwt_service()
            .validate_token(bearer.token())
            .map_err(|e| {
                tracing::warn!(error = %e, "Invalid access token");
                ApiError::InvalidAuthFormat
            })?;

        let owner_id = claims.owner_id().map_err(ApiError::App)?;

        Ok(AuthOwner { owner_id })
    }
}

/// Like `AuthOwner` but absent credentials are not an error
///
/// Used where guests and owners share an endpoint (e.g. export) and the
/// owner gets wider access.
#[derive(Debug, Clone)]
pub struct OptionalAuthOwner(pub Option<Snowflake>);

#[async_trait]
impl<S> FromRequestParts<S> for OptionalAuthOwner
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if !parts.headers.contains_key(axum::http::header::AUTHORIZATION) {
            return Ok(OptionalAuthOwner(None));
        }

        // A present but invalid header is still an error
        let auth = AuthOwner::from_request_parts(parts, state).await?;
        Ok(OptionalAuthOwner(Some(auth.owner_id)))
    }
}
