//! Reqwest-backed transport

use super::{Response, Transport, TransportError};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

const USER_AGENT: &str = concat!("Archivist/", env!("CARGO_PKG_VERSION"));

/// Configuration for the HTTP transport
#[derive(Debug, Clone, Default)]
pub struct HttpTransportConfig {
    /// Prefix joined to relative URLs (e.g. "https://lists.example.org")
    pub base_url: Option<String>,
    /// Request timeout; `None` keeps reqwest's default
    pub timeout: Option<Duration>,
}

/// Transport talking to a live archive server
pub struct HttpTransport {
    client: Client,
    config: HttpTransportConfig,
}

impl HttpTransport {
    /// Create a new HTTP transport
    pub fn new(config: HttpTransportConfig) -> Result<Self, TransportError> {
        let mut builder = Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| TransportError::Network(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Resolve a possibly relative URL against the configured base
    fn resolve(&self, url: &str) -> String {
        match &self.config.base_url {
            Some(base) if url.starts_with('/') => {
                format!("{}{}", base.trim_end_matches('/'), url)
            }
            _ => url.to_string(),
        }
    }

    async fn finish(response: reqwest::Response) -> Result<Response, TransportError> {
        let status = response.status().as_u16();
        let body = response.text().await.map_err(map_error)?;
        Ok(Response { status, body })
    }
}

fn map_error(e: reqwest::Error) -> TransportError {
    if e.is_timeout() {
        TransportError::Timeout
    } else {
        TransportError::Network(e.to_string())
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> Result<Response, TransportError> {
        let url = self.resolve(url);
        tracing::trace!(url = %url, "GET");

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(map_error)?;

        Self::finish(response).await
    }

    async fn post_form(
        &self,
        url: &str,
        fields: &[(String, String)],
    ) -> Result<Response, TransportError> {
        let url = self.resolve(url);
        tracing::trace!(url = %url, fields = fields.len(), "POST");

        let response = self
            .client
            .post(&url)
            .form(fields)
            .send()
            .await
            .map_err(map_error)?;

        Self::finish(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::routing::{get, post};
    use axum::{Form, Json, Router};
    use std::collections::HashMap;

    async fn spawn_server() -> String {
        let app = Router::new()
            .route(
                "/list/devel/recent-activity",
                get(|| async {
                    Json(serde_json::json!({
                        "evolution": [{"date": "2024-03-01", "count": 2}]
                    }))
                }),
            )
            .route(
                "/forbidden",
                get(|| async { (StatusCode::FORBIDDEN, "You must be logged in") }),
            )
            .route(
                "/vote",
                post(|Form(fields): Form<HashMap<String, String>>| async move {
                    format!("vote={}", fields.get("vote").cloned().unwrap_or_default())
                }),
            );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        format!("http://{}", addr)
    }

    fn transport(base: &str) -> HttpTransport {
        HttpTransport::new(HttpTransportConfig {
            base_url: Some(base.to_string()),
            timeout: Some(Duration::from_secs(5)),
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_get_relative_url() {
        let base = spawn_server().await;
        let transport = transport(&base);

        let response = transport.get("/list/devel/recent-activity").await.unwrap();
        assert_eq!(response.status, 200);
        assert!(response.body.contains("2024-03-01"));
    }

    #[tokio::test]
    async fn test_error_status_keeps_body() {
        let base = spawn_server().await;
        let transport = transport(&base);

        let response = transport.get("/forbidden").await.unwrap();
        let err = response.error_for_status().unwrap_err();
        assert_eq!(err.body(), "You must be logged in");
    }

    #[tokio::test]
    async fn test_post_form() {
        let base = spawn_server().await;
        let transport = transport(&base);

        let fields = vec![("vote".to_string(), "-1".to_string())];
        let response = transport.post_form("/vote", &fields).await.unwrap();
        assert_eq!(response.body, "vote=-1");
    }

    #[test]
    fn test_absolute_url_not_rewritten() {
        let transport = transport("http://archive.local");
        assert_eq!(
            transport.resolve("https://other.example/x"),
            "https://other.example/x"
        );
        assert_eq!(transport.resolve("/x"), "http://archive.local/x");
    }
}
