//! Held Message Moderation
//!
//! Fetches a message held for moderation and prepares what the moderation
//! dialog shows: subject, escaped body and headers, attachment links and a
//! link to the raw source.

mod view;

pub use view::{escape_html, HeldMessageView, NO_CONTENT};

use crate::notify::Notifier;
use crate::transport::{Transport, TransportError};
use serde::Deserialize;
use std::sync::Arc;
use thiserror::Error;

/// Errors raised while fetching a held message
#[derive(Error, Debug, Clone)]
pub enum ModerationError {
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),
}

/// Held message as served by the REST endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct HeldMessage {
    #[serde(default)]
    pub subject: String,
    pub msg: MessageContent,
    /// `(url, filename)` pairs
    #[serde(default)]
    pub attachments: Vec<(String, String)>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MessageContent {
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub headers: String,
}

/// Client for the held-message endpoint
pub struct ModerationClient {
    transport: Arc<dyn Transport>,
    notifier: Arc<dyn Notifier>,
    rest_prefix: String,
    error_message: String,
}

impl ModerationClient {
    /// `rest_url` is the endpoint URL rendered for a dummy message id; its
    /// last two characters (the dummy id and trailing slash) are dropped.
    pub fn new(
        transport: Arc<dyn Transport>,
        notifier: Arc<dyn Notifier>,
        rest_url: &str,
        error_message: impl Into<String>,
    ) -> Self {
        let cut = rest_url
            .char_indices()
            .rev()
            .nth(1)
            .map(|(i, _)| i)
            .unwrap_or(0);

        Self {
            transport,
            notifier,
            rest_prefix: rest_url[..cut].to_string(),
            error_message: error_message.into(),
        }
    }

    pub fn rest_prefix(&self) -> &str {
        &self.rest_prefix
    }

    /// Fetch held message `msgid` and build its dialog view.
    ///
    /// Any failure shows the configured error message.
    pub async fn show(&self, msgid: u64) -> Result<HeldMessageView, ModerationError> {
        let url = format!("{}{}", self.rest_prefix, msgid);

        match self.fetch(&url).await {
            Ok(message) => Ok(HeldMessageView::build(&message, &url, msgid)),
            Err(e) => {
                tracing::warn!(msgid, error = %e, "Failed to load held message");
                self.notifier.alert(&self.error_message);
                Err(e)
            }
        }
    }

    async fn fetch(&self, url: &str) -> Result<HeldMessage, ModerationError> {
        let response = self.transport.get(url).await?.error_for_status()?;
        Ok(response.decode()?)
    }
}
