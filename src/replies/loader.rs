//! Paginated Reply Loader
//!
//! Pulls the replies of a thread page by page and appends each page to the
//! reply list as soon as it arrives, so long threads render progressively.
//! Each page is requested only after the previous one has been processed.

use super::fold::Fragment;
use super::page::{PageCursor, ReplyPage};
use crate::notify::{alert_non_empty, Notifier};
use crate::render::{Node, Region};
use crate::transport::{with_offset, Transport, TransportError};
use std::sync::Arc;
use thiserror::Error;

/// Errors that stop a reply load
#[derive(Error, Debug, Clone)]
pub enum ReplyError {
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Server reported more replies without a next offset")]
    MissingOffset,
}

impl ReplyError {
    /// Text to show the user, empty when the server sent none
    pub fn user_message(&self) -> &str {
        match self {
            ReplyError::Transport(e) => e.body(),
            ReplyError::MissingOffset => "",
        }
    }
}

/// Summary of one reply load
#[derive(Debug, Clone, Default)]
pub struct ReplyLoadReport {
    pub pages_loaded: usize,
    pub requests_issued: usize,
    pub quotes_folded: usize,
    /// Another load was already filling the region
    pub skipped: bool,
    /// The error that ended the load early, if any
    pub halted: Option<ReplyError>,
}

impl ReplyLoadReport {
    pub fn is_complete(&self) -> bool {
        !self.skipped && self.halted.is_none()
    }
}

/// Loads thread replies into a region
pub struct ReplyLoader {
    transport: Arc<dyn Transport>,
    notifier: Arc<dyn Notifier>,
}

impl ReplyLoader {
    pub fn new(transport: Arc<dyn Transport>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            transport,
            notifier,
        }
    }

    /// Load every page of `base_url` into `region`.
    ///
    /// Stops at the first failure without retrying; a non-empty error body
    /// is shown to the user. The loading indicator is removed once the load
    /// ends either way.
    pub async fn load(&self, base_url: &str, region: &Region) -> ReplyLoadReport {
        let mut report = ReplyLoadReport::default();

        let Some(_token) = region.guard().try_acquire() else {
            tracing::debug!(region = %region.id(), "Replies already loading");
            report.skipped = true;
            return report;
        };

        let mut cursor: Option<PageCursor> = None;
        loop {
            let url = match &cursor {
                None => base_url.to_string(),
                Some(c) => with_offset(base_url, c.offset),
            };
            report.requests_issued += 1;

            match self.fetch_page(&url).await {
                Ok((page, next)) => {
                    let mut fragment = Fragment::parse(&page.replies_html);
                    report.quotes_folded += fragment.fold_quotes();
                    region.append(Node::Fragment(fragment));
                    region.move_indicator_to_end();
                    region.set_cursor(next.clone());
                    report.pages_loaded += 1;

                    tracing::debug!(
                        url = %url,
                        page = report.pages_loaded,
                        more = next.is_some(),
                        "Reply page appended"
                    );

                    match next {
                        Some(c) => cursor = Some(c),
                        None => break,
                    }
                }
                Err(e) => {
                    tracing::warn!(url = %url, error = %e, "Reply load halted");
                    alert_non_empty(self.notifier.as_ref(), e.user_message());
                    region.set_cursor(None);
                    report.halted = Some(e);
                    break;
                }
            }
        }

        region.remove_loading_indicator();
        report
    }

    async fn fetch_page(
        &self,
        url: &str,
    ) -> Result<(ReplyPage, Option<PageCursor>), ReplyError> {
        let response = self.transport.get(url).await?.error_for_status()?;
        let page: ReplyPage = response.decode()?;
        let next = page.next_cursor()?;
        Ok((page, next))
    }
}
