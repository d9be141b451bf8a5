//! Transfer port - raw request/response exchange with the outside world
//!
//! The domain layer describes requests to the application server (relative
//! paths) and to object storage (absolute presigned URLs). Infrastructure
//! crates provide the implementation. A transfer client carries no business
//! logic and never retries.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;

/// Result type for transfer operations
pub type TransferResult<T> = Result<T, TransportError>;

/// HTTP method subset used by the feed client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a request goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// Path relative to the application server base URL
    Api(String),
    /// Absolute URL, used for presigned object-storage operations
    Absolute(String),
}

/// Request payload
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(serde_json::Value),
    /// Raw bytes sent with exactly this content type
    Bytes { content_type: String, data: Vec<u8> },
}

/// One outgoing request
#[derive(Debug, Clone, PartialEq)]
pub struct TransferRequest {
    pub method: Method,
    pub target: Target,
    pub params: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub body: RequestBody,
}

impl TransferRequest {
    /// Request against the application server
    pub fn api(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            target: Target::Api(path.into()),
            params: Vec::new(),
            headers: Vec::new(),
            body: RequestBody::Empty,
        }
    }

    /// Request against an absolute URL
    pub fn absolute(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            target: Target::Absolute(url.into()),
            params: Vec::new(),
            headers: Vec::new(),
            body: RequestBody::Empty,
        }
    }

    /// Add a query parameter
    pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((name.into(), value.into()));
        self
    }

    /// Add a header
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Attach a JSON body
    pub fn json<B: Serialize>(mut self, body: &B) -> TransferResult<Self> {
        let value =
            serde_json::to_value(body).map_err(|e| TransportError::Encode(e.to_string()))?;
        self.body = RequestBody::Json(value);
        Ok(self)
    }

    /// Attach raw bytes with their content type
    pub fn bytes(mut self, content_type: impl Into<String>, data: Vec<u8>) -> Self {
        self.body = RequestBody::Bytes {
            content_type: content_type.into(),
            data,
        };
        self
    }

    /// Path or URL without its query string, safe to log
    ///
    /// Presigned URLs carry their signature in the query.
    pub fn log_target(&self) -> &str {
        let raw = match &self.target {
            Target::Api(path) => path,
            Target::Absolute(url) => url,
        };
        raw.split('?').next().unwrap_or(raw)
    }
}

/// Raw response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl TransferResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Check for a 2xx status
    #[inline]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Turn non-2xx responses into `TransportError::Status`
    pub fn error_for_status(self) -> TransferResult<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(TransportError::Status {
                status: self.status,
                body: String::from_utf8_lossy(&self.body).into_owned(),
            })
        }
    }

    /// Decode the body as JSON
    pub fn json<T: DeserializeOwned>(&self) -> TransferResult<T> {
        serde_json::from_slice(&self.body).map_err(|e| TransportError::Decode(e.to_string()))
    }
}

/// Transport-level failures
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Failed to encode request: {0}")]
    Encode(String),
}

impl TransportError {
    /// Status code, if the peer answered
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Check for a 404 from the peer
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

/// Sends raw requests to the application server and object storage
#[async_trait]
pub trait TransferClient: Send + Sync {
    /// Send one request and return the raw response, whatever its status
    async fn send(&self, request: TransferRequest) -> TransferResult<TransferResponse>;
}
