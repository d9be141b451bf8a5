//! Test helpers for integration tests
//!
//! Spawns the mock server on a local port and wires the real reqwest
//! transport against it.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use feed_common::{try_init_tracing, ApiConfig, ClientConfig};
use feed_core::MediaUrlResolver;
use feed_http::{FeedApi, HttpTransferClient};
use feed_cache::ReactionStore;
use feed_service::ServiceContext;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::mock::{create_mock_app, MockState};

/// Token the default test context sends
pub const TEST_TOKEN: &str = "Bearer integration-token";

/// Public prefix the default test context displays keys under
pub const CDN_BASE: &str = "https://cdn.example.com";

/// Mock server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub state: Arc<MockState>,
    pub client: Client,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a new mock server on an ephemeral port
    pub async fn start() -> Result<Self> {
        let _ = try_init_tracing();

        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        let state = MockState::new();
        state.set_storage_base(format!("http://{addr}/storage"));
        let app = create_mock_app(state.clone());

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            addr,
            state,
            client,
            _handle: handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Base URL of the application API
    pub fn api_url(&self) -> String {
        format!("{}/api", self.base_url())
    }

    /// API settings pointing at this server
    pub fn api_config(&self, auth_token: Option<&str>) -> ApiConfig {
        ApiConfig {
            base_url: self.api_url(),
            auth_token: auth_token.map(str::to_string),
            timeout_secs: 5,
            ..ApiConfig::default()
        }
    }

    /// Service context over the real transport, with [`TEST_TOKEN`] and [`CDN_BASE`]
    pub fn context(&self) -> Result<ServiceContext> {
        let transport = HttpTransferClient::new(&self.api_config(Some(TEST_TOKEN)))?;
        Ok(ServiceContext::new(
            FeedApi::new(Arc::new(transport)),
            MediaUrlResolver::new(Some(CDN_BASE)),
            ReactionStore::new_shared(),
        ))
    }

    /// Configuration as it would be loaded from the environment
    pub fn client_config(&self) -> Result<ClientConfig> {
        let api_url = self.api_url();
        let config = ClientConfig::from_lookup(|name| match name {
            "FEED_API_URL" => Some(format!("{api_url}/")),
            "FEED_S3_PUBLIC_BASE_URL" => Some(format!("{CDN_BASE}/")),
            "FEED_AUTH_TOKEN" => Some(TEST_TOKEN.to_string()),
            "FEED_HTTP_TIMEOUT_SECS" => Some("5".to_string()),
            _ => None,
        })?;
        Ok(config)
    }

    /// Make a GET request straight to the mock server
    pub async fn get(&self, path: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.get(&url).send().await?)
    }
}

/// Assert response status and parse JSON body
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

/// Assert response status
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(())
}
