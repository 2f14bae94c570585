//! Thread Replies
//!
//! Progressive loading of a thread's replies and the quote folding applied
//! to every inserted page.

pub mod fold;
mod loader;
mod page;

pub use fold::{should_fold, Fragment, QuotedBlock, FOLD_THRESHOLD};
pub use loader::{ReplyError, ReplyLoadReport, ReplyLoader};
pub use page::{PageCursor, ReplyPage};
