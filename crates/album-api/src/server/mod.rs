//! Server setup and initialization
//!
//! Wires configuration, the database and Redis pools, the blob store, and
//! the service context into a runnable axum application.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::Router;
use album_cache::{RedisPool, RedisPoolConfig};
use album_common::{AppConfig, AppError, JwtService};
use album_core::SnowflakeGenerator;
use album_db::{
    create_pool, PgEventRepository, PgMediaRepository, PgOwnerRepository, PgReactionRepository,
};
use album_service::{FfprobeProbe, ServiceContextBuilder};
use album_storage::FsBlobStore;
use tokio::net::TcpListener;
use tracing::info;

use crate::middleware::apply_middleware_with_config;
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let config = state.config();

    // A batch holds several files; leave generous headroom over one file
    let body_limit = config.storage.max_file_size_bytes().saturating_mul(10);

    let api = apply_middleware_with_config(
        create_router(),
        &config.rate_limit,
        &config.cors,
        config.app.env.is_production(),
    )
    .layer(DefaultBodyLimit::max(body_limit));

    // Health endpoints sit outside the rate limiter
    api.merge(health_routes()).with_state(state)
}

/// Connect every backing service and assemble the application state
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    info!("Connecting to PostgreSQL...");
    let pool = create_pool(&album_db::DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        min_connections: config.database.min_connections,
        ..Default::default()
    })
    .await
    .map_err(|e| AppError::Database(e.to_string()))?;

    album_db::run_migrations(&pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("Database migrations applied");

    info!("Connecting to Redis...");
    let redis_pool = RedisPool::new(RedisPoolConfig::from(&config.redis))
        .map_err(|e| AppError::Cache(e.to_string()))?;

    let service_context = ServiceContextBuilder::new()
        .pool(pool.clone())
        .redis_pool(Arc::new(redis_pool))
        .owner_repo(Arc::new(PgOwnerRepository::new(pool.clone())))
        .event_repo(Arc::new(PgEventRepository::new(pool.clone())))
        .media_repo(Arc::new(PgMediaRepository::new(pool.clone())))
        .reaction_repo(Arc::new(PgReactionRepository::new(pool)))
        .blob_store(Arc::new(FsBlobStore::from_config(&config.storage)))
        .probe(Arc::new(FfprobeProbe::new()))
        .jwt_service(Arc::new(JwtService::new(
            &config.jwt.secret,
            config.jwt.access_token_expiry,
        )))
        .snowflake_generator(Arc::new(SnowflakeGenerator::new(config.snowflake.worker_id)))
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(service_context, config))
}

/// Serve the application on the given address until shutdown
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))
}

/// Bring the whole server up from configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.api.port));
    let state = create_app_state(config).await?;
    let app = create_app(state);
    run_server(app, addr).await
}
