//! PostgreSQL implementation of OwnerRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use album_core::entities::Owner;
use album_core::traits::{OwnerRepository, RepoResult};
use album_core::value_objects::Snowflake;

use crate::models::OwnerModel;

use super::error::{map_db_error, map_unique_violation};

/// PostgreSQL implementation of OwnerRepository
#[derive(Clone)]
pub struct PgOwnerRepository {
    pool: PgPool,
}

impl PgOwnerRepository {
    /// Create a new PgOwnerRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OwnerRepository for PgOwnerRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Owner>> {
        let result = sqlx::query_as::<_, OwnerModel>(
            r"
            SELECT id, email, display_name, created_at
            FROM owners
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Owner::from))
    }

    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<Owner>> {
        let result = sqlx::query_as::<_, OwnerModel>(
            r"
            SELECT id, email, display_name, created_at
            FROM owners
            WHERE email = $1
            ",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Owner::from))
    }

    #[instrument(skip(self))]
    async fn email_exists(&self, email: &str) -> RepoResult<bool> {
        let result = sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(SELECT 1 FROM owners WHERE email = $1)
            ",
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result)
    }

    #[instrument(skip(self, password_hash))]
    async fn create(&self, owner: &Owner, password_hash: &str) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO owners (id, email, display_name, password_hash, created_at)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(owner.id.into_inner())
        .bind(&owner.email)
        .bind(&owner.display_name)
        .bind(password_hash)
        .bind(owner.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || album_core::DomainError::EmailAlreadyExists))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_password_hash(&self, id: Snowflake) -> RepoResult<Option<String>> {
        let result = sqlx::query_scalar::<_, String>(
            r"
            SELECT password_hash FROM owners WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result)
    }
}
