//! Test helpers for integration tests
//!
//! Spawns the real application on an ephemeral port and wraps an HTTP
//! client with the header conventions the API uses (owner bearer tokens,
//! the guest participant header).

use std::net::SocketAddr;
use std::time::Duration;

use album_api::{create_app, create_app_state};
use album_common::AppConfig;
use anyhow::Result;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a server with configuration taken from the environment
    pub async fn start() -> Result<Self> {
        Self::start_with_config(test_config()?).await
    }

    /// Start a server with the given configuration
    pub async fn start_with_config(config: AppConfig) -> Result<Self> {
        let state = create_app_state(config).await?;
        let app = create_app(state);

        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        // Give the accept loop a moment before the first request
        tokio::time::sleep(Duration::from_millis(100)).await;

        Ok(Self {
            addr,
            client: Client::builder().timeout(Duration::from_secs(10)).build()?,
            _handle: handle,
        })
    }

    /// Base URL of the running server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}{}", self.base_url(), path))
    }

    fn authorized(&self, method: Method, path: &str, token: &str) -> RequestBuilder {
        self.request(method, path)
            .header("Authorization", format!("Bearer {token}"))
    }

    /// GET without credentials
    pub async fn get(&self, path: &str) -> Result<Response> {
        Ok(self.request(Method::GET, path).send().await?)
    }

    /// GET as an authenticated owner
    pub async fn get_auth(&self, path: &str, token: &str) -> Result<Response> {
        Ok(self.authorized(Method::GET, path, token).send().await?)
    }

    /// GET carrying a guest participant identity
    pub async fn get_participant(&self, path: &str, participant: &str) -> Result<Response> {
        Ok(self
            .request(Method::GET, path)
            .header("X-Participant-Id", participant)
            .send()
            .await?)
    }

    /// POST a JSON body without credentials
    pub async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        Ok(self.request(Method::POST, path).json(body).send().await?)
    }

    /// POST a JSON body as an authenticated owner
    pub async fn post_auth<T: Serialize>(
        &self,
        path: &str,
        token: &str,
        body: &T,
    ) -> Result<Response> {
        Ok(self
            .authorized(Method::POST, path, token)
            .json(body)
            .send()
            .await?)
    }

    /// Empty-bodied POST carrying a guest participant identity
    pub async fn post_participant(&self, path: &str, participant: &str) -> Result<Response> {
        Ok(self
            .request(Method::POST, path)
            .header("X-Participant-Id", participant)
            .send()
            .await?)
    }

    /// Multipart POST (uploads)
    pub async fn post_multipart(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<Response> {
        Ok(self
            .request(Method::POST, path)
            .multipart(form)
            .send()
            .await?)
    }

    /// PATCH a JSON body as an authenticated owner
    pub async fn patch_auth<T: Serialize>(
        &self,
        path: &str,
        token: &str,
        body: &T,
    ) -> Result<Response> {
        Ok(self
            .authorized(Method::PATCH, path, token)
            .json(body)
            .send()
            .await?)
    }

    /// DELETE as an authenticated owner
    pub async fn delete_auth(&self, path: &str, token: &str) -> Result<Response> {
        Ok(self.authorized(Method::DELETE, path, token).send().await?)
    }
}

/// Configuration for a test run, from the environment plus .env
pub fn test_config() -> Result<AppConfig> {
    dotenvy::dotenv().ok();
    AppConfig::from_env().map_err(|e| anyhow::anyhow!("Config error: {e}"))
}

/// Whether the live-backend environment is present; tests bail out quietly
/// when it is not
pub async fn check_test_env() -> bool {
    for key in ["DATABASE_URL", "REDIS_URL"] {
        if std::env::var(key).is_err() {
            eprintln!("Skipping test: {key} not set");
            return false;
        }
    }
    true
}

/// Assert a status and deserialize the JSON body
pub async fn assert_json<T: DeserializeOwned>(
    response: Response,
    expected_status: StatusCode,
) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(response.json().await?)
}

/// Assert a status, discarding the body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(())
}
