//! Service context - dependency container for services
//!
//! Holds all repositories, the blob store, the metadata probe, and other
//! dependencies needed by services.

use std::sync::Arc;

use album_cache::{Publisher, SharedRedisPool};
use album_common::auth::JwtService;
use album_core::traits::{
    BlobStore, EventRepository, MediaProbe, MediaRepository, OwnerRepository, ReactionRepository,
};
use album_core::SnowflakeGenerator;
use album_db::PgPool;

/// Service context containing all dependencies
///
/// This is the main dependency container that gets passed to all services.
/// It provides access to:
/// - Database repositories
/// - Blob storage and the video metadata probe
/// - JWT service for owner authentication
/// - Snowflake generator for ID generation
/// - Redis pub/sub for change notifications
#[derive(Clone)]
pub struct ServiceContext {
    // Database pool
    pool: PgPool,

    // Redis pool
    redis_pool: SharedRedisPool,

    // Repositories
    owner_repo: Arc<dyn OwnerRepository>,
    event_repo: Arc<dyn EventRepository>,
    media_repo: Arc<dyn MediaRepository>,
    reaction_repo: Arc<dyn ReactionRepository>,

    // Blob storage and probing
    blob_store: Arc<dyn BlobStore>,
    probe: Arc<dyn MediaProbe>,

    // Pub/Sub
    publisher: Publisher,

    // Services
    jwt_service: Arc<JwtService>,
    snowflake_generator: Arc<SnowflakeGenerator>,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        pool: PgPool,
        redis_pool: SharedRedisPool,
        owner_repo: Arc<dyn OwnerRepository>,
        event_repo: Arc<dyn EventRepository>,
        media_repo: Arc<dyn MediaRepository>,
        reaction_repo: Arc<dyn ReactionRepository>,
        blob_store: Arc<dyn BlobStore>,
        probe: Arc<dyn MediaProbe>,
        jwt_service: Arc<JwtService>,
        snowflake_generator: Arc<SnowflakeGenerator>,
    ) -> Self {
        let publisher = Publisher::new((*redis_pool).clone());

        Self {
            pool,
            redis_pool,
            owner_repo,
            event_repo,
            media_repo,
            reaction_repo,
            blob_store,
            probe,
            publisher,
            jwt_service,
            snowflake_generator,
        }
    }

    // === Pools ===

    /// Get the PostgreSQL connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Get the Redis connection pool
    pub fn redis_pool(&self) -> &SharedRedisPool {
        &self.redis_pool
    }

    // === Repositories ===

    /// Get the owner repository
    pub fn owner_repo(&self) -> &dyn OwnerRepository {
        self.owner_repo.as_ref()
    }

    /// Get the event repository
    pub fn event_repo(&self) -> &dyn EventRepository {
        self.event_repo.as_ref()
    }

    /// Get the media repository
    pub fn media_repo(&self) -> &dyn MediaRepository {
        self.media_repo.as_ref()
    }

    /// Get the reaction repository
    pub fn reaction_repo(&self) -> &dyn ReactionRepository {
        self.reaction_repo.as_ref()
    }

    // === Blob storage ===

    /// Get the blob store
    pub fn blob_store(&self) -> &dyn BlobStore {
        self.blob_store.as_ref()
    }

    /// Get the video metadata probe
    pub fn probe(&self) -> &dyn MediaProbe {
        self.probe.as_ref()
    }

    // === Pub/Sub ===

    /// Get the Redis pub/sub publisher
    pub fn publisher(&self) -> &Publisher {
        &self.publisher
    }

    // === Services ===

    /// Get the JWT service
    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    /// Generate a new Snowflake ID
    pub fn generate_id(&self) -> album_core::Snowflake {
        self.snowflake_generator.generate()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("pool", &"PgPool")
            .field("redis_pool", &"SharedRedisPool")
            .field("repositories", &"...")
            .field("blob_store", &"...")
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    pool: Option<PgPool>,
    redis_pool: Option<SharedRedisPool>,
    owner_repo: Option<Arc<dyn OwnerRepository>>,
    event_repo: Option<Arc<dyn EventRepository>>,
    media_repo: Option<Arc<dyn MediaRepository>>,
    reaction_repo: Option<Arc<dyn ReactionRepository>>,
    blob_store: Option<Arc<dyn BlobStore>>,
    probe: Option<Arc<dyn MediaProbe>>,
    jwt_service: Option<Arc<JwtService>>,
    snowflake_generator: Option<Arc<SnowflakeGenerator>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pool(mut self, pool: PgPool) -> Self {
        self.pool = Some(pool);
        self
    }

    pub fn redis_pool(mut self, redis_pool: SharedRedisPool) -> Self {
        self.redis_pool = Some(redis_pool);
        self
    }

    pub fn owner_repo(mut self, repo: Arc<dyn OwnerRepository>) -> Self {
        self.owner_repo = Some(repo);
        self
    }

    pub fn event_repo(mut self, repo: Arc<dyn EventRepository>) -> Self {
        self.event_repo = Some(repo);
        self
    }

    pub fn media_repo(mut self, repo: Arc<dyn MediaRepository>) -> Self {
        self.media_repo = Some(repo);
        self
    }

    pub fn reaction_repo(mut self, repo: Arc<dyn ReactionRepository>) -> Self {
        self.reaction_repo = Some(repo);
        self
    }

    pub fn blob_store(mut self, store: Arc<dyn BlobStore>) -> Self {
        self.blob_store = Some(store);
        self
    }

    pub fn probe(mut self, probe: Arc<dyn MediaProbe>) -> Self {
        self.probe = Some(probe);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    pub fn snowflake_generator(mut self, generator: Arc<SnowflakeGenerator>) -> Self {
        self.snowflake_generator = Some(generator);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> super::error::ServiceResult<ServiceContext> {
        use super::error::ServiceError;

        Ok(ServiceContext::new(
            self.pool
                .ok_or_else(|| ServiceError::validation("pool is required"))?,
            self.redis_pool
                .ok_or_else(|| ServiceError::validation("redis_pool is required"))?,
            self.owner_repo
                .ok_or_else(|| ServiceError::validation("owner_repo is required"))?,
            self.event_repo
                .ok_or_else(|| ServiceError::validation("event_repo is required"))?,
            self.media_repo
                .ok_or_else(|| ServiceError::validation("media_repo is required"))?,
            self.reaction_repo
                .ok_or_else(|| ServiceError::validation("reaction_repo is required"))?,
            self.blob_store
                .ok_or_else(|| ServiceError::validation("blob_store is required"))?,
            self.probe
                .ok_or_else(|| ServiceError::validation("probe is required"))?,
            self.jwt_service
                .ok_or_else(|| ServiceError::validation("jwt_service is required"))?,
            self.snowflake_generator
                .ok_or_else(|| ServiceError::validation("snowflake_generator is required"))?,
        ))
    }
}
