//! # Archivist
//!
//! Client-side pipelines for a mailing-list archive: activity charts loaded
//! one list at a time, thread replies loaded page by page, and the form and
//! moderation flows around them.
//!
//! ## Modules
//!
//! - [`chart`]: activity series, bar layout and the sequential chart loader
//! - [`replies`]: paginated reply loading and quote folding
//! - [`render`]: in-memory regions the loaders fill
//! - [`transport`]: HTTP abstraction (reqwest and a scripted mock)
//! - [`actions`]: votes, favorites, tags, category and reply posting
//! - [`moderation`]: held-message dialog
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use archivist::*;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let transport = Arc::new(HttpTransport::new(HttpTransportConfig {
//!         base_url: Some("https://lists.example.org".into()),
//!         timeout: None,
//!     })?);
//!
//!     // Charts for every list, one request at a time
//!     let loader = ChartLoader::new(transport.clone(), ChartProps::default());
//!     let template = UrlTemplate::new("/hyperkitty/list/PLACEHOLDER@PLACEHOLDER/recent-activity")?;
//!     let rows = vec![
//!         ChartRow::new("devel@lists.example.org", Region::shared("devel")),
//!         ChartRow::new("users@lists.example.org", Region::shared("users")),
//!     ];
//!     loader.load_sequence(&template, &rows).await;
//!
//!     // Replies of a thread, page by page
//!     let replies = ReplyLoader::new(transport, Arc::new(LogNotifier));
//!     let region = Region::new("replies");
//!     let report = replies
//!         .load("/hyperkitty/list/devel@lists.example.org/thread/ABC/replies?sort=thread", &region)
//!         .await;
//!     println!("Loaded {} pages", report.pages_loaded);
//!
//!     Ok(())
//! }
//! ```

pub mod actions;
pub mod chart;
pub mod compose;
pub mod config;
pub mod index;
pub mod moderation;
pub mod navigation;
pub mod notify;
pub mod render;
pub mod replies;
pub mod transport;

pub use actions::{ActionError, ActionForm, ArchiveActions, FavoriteState, ReplyPosted};

pub use chart::{
    ChartError, ChartLayout, ChartLoader, ChartOutcome, ChartProps, ChartRow, ChartSeries,
    OverviewChart, RenderedChart, UrlTemplate,
};

pub use compose::{quote_body, quote_into_draft, ComposeError};

pub use config::{Config, ConfigError, LoggingConfig};

pub use index::{ListIndex, ListRow, MoreThreads};

pub use moderation::{HeldMessageView, ModerationClient, ModerationError};

pub use navigation::{Step, UnreadNavigator};

pub use notify::{LogNotifier, Notifier, RecordingNotifier, StderrNotifier};

pub use render::{LoadGuard, Node, Region, TargetState};

pub use replies::{Fragment, PageCursor, ReplyError, ReplyLoadReport, ReplyLoader};

pub use transport::{
    HttpTransport, HttpTransportConfig, MockTransport, Response, Transport, TransportError,
};
