//! Reply page wire format

use super::ReplyError;
use serde::Deserialize;

/// One page of replies as returned by the server
#[derive(Debug, Clone, Deserialize)]
pub struct ReplyPage {
    pub replies_html: String,
    #[serde(default)]
    pub more_pending: bool,
    /// Present iff `more_pending`
    #[serde(default)]
    pub next_offset: Option<u64>,
}

/// Where the next page starts; only exists while more replies are pending
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageCursor {
    pub offset: u64,
}

impl ReplyPage {
    /// Cursor for the following request.
    ///
    /// `Ok(None)` on the last page. A page claiming more are pending
    /// without an offset is a protocol error.
    pub fn next_cursor(&self) -> Result<Option<PageCursor>, ReplyError> {
        match (self.more_pending, self.next_offset) {
            (false, _) => Ok(None),
            (true, Some(offset)) => Ok(Some(PageCursor { offset })),
            (true, None) => Err(ReplyError::MissingOffset),
        }
    }
}
