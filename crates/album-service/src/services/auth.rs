//! Owner authentication service
//!
//! Handles registration and login for event owners. Guests never touch this
//! path; their identity is an ephemeral session value.

use album_common::auth::{hash_password, validate_password_strength, verify_password};
use album_common::AppError;
use album_core::entities::Owner;
use tracing::{info, instrument};

use crate::dto::{AuthResponse, LoginRequest, OwnerResponse, RegisterRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Owner authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new owner account and issue an access token
    #[instrument(skip(self, request))]
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<AuthResponse> {
        let email = request.email.trim().to_lowercase();

        if self.ctx.owner_repo().email_exists(&email).await? {
            return Err(ServiceError::conflict("email already registered"));
        }

        validate_password_strength(&request.password)?;
        let password_hash = hash_password(&request.password)?;

        let owner = Owner::new(self.ctx.generate_id(), email, request.display_name);
        self.ctx.owner_repo().create(&owner, &password_hash).await?;

        info!(owner_id = %owner.id, "Owner registered");

        self.issue_response(owner)
    }

    /// Log an owner in and issue an access token
    #[instrument(skip(self, request))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<AuthResponse> {
        let email = request.email.trim().to_lowercase();

        let owner = self
            .ctx
            .owner_repo()
            .find_by_email(&email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let hash = self
            .ctx
            .owner_repo()
            .get_password_hash(owner.id)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        if !verify_password(&request.password, &hash)? {
            return Err(AppError::InvalidCredentials.into());
        }

        info!(owner_id = %owner.id, "Owner logged in");

        self.issue_response(owner)
    }

    fn issue_response(&self, owner: Owner) -> ServiceResult<AuthResponse> {
        let token = self.ctx.jwt_service().issue_token(owner.id)?;

        Ok(AuthResponse {
            owner: OwnerResponse::from(&owner),
            access_token: token,
            token_type: "Bearer".to_string(),
            expires_in: self.ctx.jwt_service().access_token_expiry(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::test_context;

    fn register_request() -> RegisterRequest {
        RegisterRequest {
            email: "Host@Example.com".to_string(),
            display_name: "Host".to_string(),
            password: "longenough1".to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let ctx = test_context();
        let service = AuthService::new(&ctx);

        let registered = service.register(register_request()).await.unwrap();
        assert_eq!(registered.owner.email, "host@example.com");
        assert!(!registered.access_token.is_empty());

        let logged_in = service
            .login(LoginRequest {
                email: "host@example.com".to_string(),
                password: "longenough1".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(logged_in.owner.id, registered.owner.id);
    }

    #[tokio::test]
    async fn test_register_duplicate_email_conflicts() {
        let ctx = test_context();
        let service = AuthService::new(&ctx);

        service.register(register_request()).await.unwrap();
        let err = service.register(register_request()).await.unwrap_err();
        assert_eq!(err.status_code(), 409);
    }

    #[tokio::test]
    async fn test_login_wrong_password_rejected() {
        let ctx = test_context();
        let service = AuthService::new(&ctx);

        service.register(register_request()).await.unwrap();
        let err = service
            .login(LoginRequest {
                email: "host@example.com".to_string(),
                password: "wrongpassword1".to_string(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 401);
    }

    #[tokio::test]
    async fn test_register_weak_password_rejected() {
        let ctx = test_context();
        let service = AuthService::new(&ctx);

        let mut request = register_request();
        request.password = "nodigits".to_string();
        let err = service.register(request).await.unwrap_err();
        assert_eq!(err.status_code(), 400);
    }
}
