//! Form Actions
//!
//! The small AJAX flows around a thread: votes, favorites, tags, category,
//! reply posting and the re-attach suggestion search. Server errors with a
//! body are shown to the user verbatim; empty error bodies are ignored.

mod forms;

pub use forms::{ActionForm, FavoriteState, ReplyPosted};

use crate::notify::{alert_non_empty, Notifier};
use crate::render::{Node, Region};
use crate::replies::Fragment;
use crate::transport::{Response, Transport, TransportError};
use serde::Deserialize;
use std::sync::Arc;
use thiserror::Error;

/// Errors from form submissions
#[derive(Error, Debug, Clone)]
pub enum ActionError {
    #[error("Control is disabled")]
    Disabled,

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),
}

/// Result type alias for form actions
pub type ActionResult<T> = Result<T, ActionError>;

#[derive(Debug, Deserialize)]
struct HtmlResponse {
    html: String,
}

/// Submits thread forms through a [`Transport`]
pub struct ArchiveActions {
    transport: Arc<dyn Transport>,
    notifier: Arc<dyn Notifier>,
}

impl ArchiveActions {
    pub fn new(transport: Arc<dyn Transport>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            transport,
            notifier,
        }
    }

    async fn submit(&self, form: &ActionForm) -> ActionResult<Response> {
        let result = match self.transport.post_form(&form.action, &form.fields).await {
            Ok(response) => response.error_for_status(),
            Err(e) => Err(e),
        };

        result.map_err(|e| {
            tracing::debug!(action = %form.action, error = %e, "Form submission failed");
            alert_non_empty(self.notifier.as_ref(), e.body());
            ActionError::Transport(e)
        })
    }

    fn decode<T: serde::de::DeserializeOwned>(&self, response: &Response) -> ActionResult<T> {
        response.decode().map_err(|e| {
            alert_non_empty(self.notifier.as_ref(), e.body());
            ActionError::Transport(e)
        })
    }

    /// Cast a vote; returns the markup replacing the vote form
    pub async fn vote(&self, form: &ActionForm, value: i8, disabled: bool) -> ActionResult<String> {
        if disabled {
            return Err(ActionError::Disabled);
        }
        let form = form.clone().field("vote", value.to_string());
        let response = self.submit(&form).await?;
        Ok(self.decode::<HtmlResponse>(&response)?.html)
    }

    /// Add or remove the thread from favorites, flipping `state` on success
    pub async fn toggle_favorite(
        &self,
        form: &ActionForm,
        state: &mut FavoriteState,
        disabled: bool,
    ) -> ActionResult<()> {
        if disabled {
            return Err(ActionError::Disabled);
        }
        let form = form.clone().field("action", state.as_str());
        self.submit(&form).await?;
        *state = state.toggled();
        Ok(())
    }

    /// Post the tag form; the tag input is cleared whatever the outcome
    pub async fn post_tags(&self, form: &ActionForm, tag_input: &mut String) -> ActionResult<String> {
        let form = form.clone().field("tag", tag_input.as_str());
        let result = match self.submit(&form).await {
            Ok(response) => self.decode::<HtmlResponse>(&response).map(|r| r.html),
            Err(e) => Err(e),
        };
        tag_input.clear();
        result
    }

    /// Change the thread category; returns the new widget markup
    pub async fn set_category(&self, form: &ActionForm, category: &str) -> ActionResult<String> {
        let form = form.clone().field("category", category);
        Ok(self.submit(&form).await?.body)
    }

    /// Send a reply from the thread's reply form
    pub async fn post_reply(&self, form: &ActionForm) -> ActionResult<ReplyPosted> {
        let response = self.submit(form).await?;
        self.decode(&response)
    }

    /// Search threads to re-attach this one to.
    ///
    /// Sends the form as a GET query. On success the markup replaces the
    /// contents of `suggestions`; the loading indicator is shown while the
    /// request runs and removed afterwards.
    pub async fn search_reattach(
        &self,
        form: &ActionForm,
        suggestions: &Region,
    ) -> ActionResult<String> {
        let url = form.query_url();
        suggestions.show_loading_indicator();

        let result = match self.transport.get(&url).await {
            Ok(response) => response.error_for_status(),
            Err(e) => Err(e),
        };

        let outcome = match result {
            Ok(response) => {
                suggestions.replace_with(Node::Fragment(Fragment::parse(&response.body)));
                Ok(response.body)
            }
            Err(e) => {
                tracing::debug!(url = %url, error = %e, "Re-attach search failed");
                alert_non_empty(self.notifier.as_ref(), e.body());
                Err(ActionError::Transport(e))
            }
        };

        suggestions.remove_loading_indicator();
        outcome
    }
}
