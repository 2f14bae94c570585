//! Scripted Transport
//!
//! In-memory transport that replays canned responses per URL and records
//! every dispatched request. Used by the loader tests and handy for
//! driving the pipelines without a server.

use super::{Response, Transport, TransportError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

type Outcome = Result<Response, TransportError>;
type DispatchHook = Arc<dyn Fn(&str) + Send + Sync>;

/// A request seen by the mock
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestRecord {
    pub method: &'static str,
    pub url: String,
    pub fields: Vec<(String, String)>,
}

/// Replays scripted responses keyed by URL.
///
/// Each URL holds a queue of outcomes; the last one repeats once the
/// queue is drained. Unscripted URLs answer 404 with an empty body.
#[derive(Default)]
pub struct MockTransport {
    scripts: Mutex<HashMap<String, Vec<Outcome>>>,
    requests: Mutex<Vec<RequestRecord>>,
    latency: Option<Duration>,
    on_dispatch: Option<DispatchHook>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay every response by `latency`
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Run `hook` with the URL each time a request is dispatched
    pub fn on_dispatch(mut self, hook: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.on_dispatch = Some(Arc::new(hook));
        self
    }

    /// Queue an outcome for `url`
    pub fn respond(self, url: impl Into<String>, outcome: Outcome) -> Self {
        self.scripts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(url.into())
            .or_default()
            .push(outcome);
        self
    }

    /// Queue a 200 JSON response for `url`
    pub fn respond_json(self, url: impl Into<String>, value: serde_json::Value) -> Self {
        self.respond(url, Ok(Response::json(&value)))
    }

    /// All requests dispatched so far, in order
    pub fn requests(&self) -> Vec<RequestRecord> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// URLs of all requests dispatched so far
    pub fn urls(&self) -> Vec<String> {
        self.requests().into_iter().map(|r| r.url).collect()
    }

    async fn dispatch(
        &self,
        method: &'static str,
        url: &str,
        fields: &[(String, String)],
    ) -> Outcome {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(RequestRecord {
                method,
                url: url.to_string(),
                fields: fields.to_vec(),
            });

        if let Some(hook) = &self.on_dispatch {
            hook(url);
        }

        let outcome = {
            let mut scripts = self.scripts.lock().unwrap_or_else(PoisonError::into_inner);
            match scripts.get_mut(url) {
                Some(queue) if queue.len() > 1 => queue.remove(0),
                Some(queue) => queue
                    .first()
                    .cloned()
                    .unwrap_or_else(|| Ok(Response::new(404, ""))),
                None => Ok(Response::new(404, "")),
            }
        };

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        outcome
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn get(&self, url: &str) -> Result<Response, TransportError> {
        self.dispatch("GET", url, &[]).await
    }

    async fn post_form(
        &self,
        url: &str,
        fields: &[(String, String)],
    ) -> Result<Response, TransportError> {
        self.dispatch("POST", url, fields).await
    }
}
