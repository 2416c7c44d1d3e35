//! Application state shared across handlers

use std::sync::Arc;

use album_common::{AppConfig, JwtService};
use album_service::ServiceContext;

/// Everything a handler needs, cheap to clone per request
#[derive(Clone)]
pub struct AppState {
    inner: Arc<Inner>,
}

struct Inner {
    service_context: ServiceContext,
    config: AppConfig,
}

impl AppState {
    /// Assemble the state from its parts
    pub fn new(service_context: ServiceContext, config: AppConfig) -> Self {
        Self {
            inner: Arc::new(Inner {
                service_context,
                config,
            }),
        }
    }

    /// The service dependency container
    pub fn service_context(&self) -> &ServiceContext {
        &self.inner.service_context
    }

    /// The loaded application configuration
    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    /// The JWT service, for the auth extractor
    pub fn jwt_service(&self) -> &JwtService {
        self.inner.service_context.jwt_service()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}
