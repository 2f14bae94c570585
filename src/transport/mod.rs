//! Transport Layer
//!
//! Abstracts the network calls made by the loaders so they can run against
//! a live archive server (reqwest) or a scripted test double.

mod http;
pub mod mock;

pub use http::{HttpTransport, HttpTransportConfig};
pub use mock::{MockTransport, RequestRecord};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// A completed HTTP exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub body: String,
}

impl Response {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// 200 response with a JSON body
    pub fn json(value: &serde_json::Value) -> Self {
        Self::new(200, value.to_string())
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Turn a non-2xx response into a `TransportError::Status`
    pub fn error_for_status(self) -> Result<Self, TransportError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(TransportError::Status {
                status: self.status,
                body: self.body,
            })
        }
    }

    /// Decode the body as JSON
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, TransportError> {
        serde_json::from_str(&self.body).map_err(|e| TransportError::Decode {
            error: e.to_string(),
            body: self.body.clone(),
        })
    }
}

/// Errors raised while talking to the archive server
#[derive(Error, Debug, Clone)]
pub enum TransportError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Server returned {status}")]
    Status { status: u16, body: String },

    #[error("Decode error: {error}")]
    Decode { error: String, body: String },
}

impl TransportError {
    /// The server-provided error text, if any.
    ///
    /// Status and decode errors carry the response body; network failures
    /// have none.
    pub fn body(&self) -> &str {
        match self {
            TransportError::Status { body, .. } | TransportError::Decode { body, .. } => body,
            TransportError::Network(_) | TransportError::Timeout => "",
        }
    }
}

/// Async request interface used by every loader and form action
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issue a GET request
    async fn get(&self, url: &str) -> Result<Response, TransportError>;

    /// Issue a POST request with urlencoded form fields
    async fn post_form(
        &self,
        url: &str,
        fields: &[(String, String)],
    ) -> Result<Response, TransportError>;
}

/// Append `offset=N` to a URL, picking `?` or `&` based on the existing query
pub fn with_offset(base: &str, offset: u64) -> String {
    let sep = if base.contains('?') { '&' } else { '?' };
    format!("{}{}offset={}", base, sep, offset)
}
