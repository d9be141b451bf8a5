//! reqwest implementation of the transfer port

use async_trait::async_trait;
use feed_common::ApiConfig;
use feed_core::{
    Method, RequestBody, Target, TransferClient, TransferRequest, TransferResponse,
    TransferResult, TransportError,
};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use tracing::{debug, instrument, warn};

/// HTTP transfer client backed by a shared reqwest connection pool
///
/// API targets are joined onto the configured base URL and carry the
/// configured `Authorization` header. Absolute targets (presigned URLs) are
/// sent untouched: they are already signed and must not receive credentials.
#[derive(Debug, Clone)]
pub struct HttpTransferClient {
    client: Client,
    base_url: String,
    auth_token: Option<String>,
}

impl HttpTransferClient {
    /// Build a client from API settings
    pub fn new(config: &ApiConfig) -> TransferResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| TransportError::Network(e.to_string()))?;

        Ok(Self::with_client(
            client,
            &config.base_url,
            config.auth_token.clone(),
        ))
    }

    /// Wrap an existing reqwest client
    pub fn with_client(client: Client, base_url: &str, auth_token: Option<String>) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            auth_token,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolve a target to the URL actually requested
    fn url_for(&self, target: &Target) -> String {
        match target {
            Target::Api(path) => format!("{}/{}", self.base_url, path.trim_start_matches('/')),
            Target::Absolute(url) => url.clone(),
        }
    }

    fn method_for(method: Method) -> reqwest::Method {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }

    fn build(&self, request: TransferRequest) -> reqwest::RequestBuilder {
        let url = self.url_for(&request.target);
        let mut builder = self
            .client
            .request(Self::method_for(request.method), url);

        if !request.params.is_empty() {
            builder = builder.query(&request.params);
        }

        if let (Target::Api(_), Some(token)) = (&request.target, &self.auth_token) {
            builder = builder.header(AUTHORIZATION, token);
        }

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Bytes { content_type, data } => {
                builder.header(CONTENT_TYPE, content_type).body(data)
            }
        }
    }
}

#[async_trait]
impl TransferClient for HttpTransferClient {
    #[instrument(
        skip(self, request),
        fields(method = %request.method, target = %request.log_target())
    )]
    async fn send(&self, request: TransferRequest) -> TransferResult<TransferResponse> {
        let response = self.build(request).send().await.map_err(|e| {
            warn!(error = %e, "Request failed before a response");
            TransportError::Network(e.without_url().to_string())
        })?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError::Network(e.without_url().to_string()))?;

        debug!(status, bytes = body.len(), "Response received");
        Ok(TransferResponse::new(status, body.to_vec()))
    }
}
