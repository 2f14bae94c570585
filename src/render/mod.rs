//! Render Targets
//!
//! In-memory model of the UI regions the loaders fill: chart areas and
//! reply lists. A region holds an ordered list of nodes, an optional
//! loading indicator and its load guard.

mod guard;
mod region;

pub use guard::{GuardToken, LoadGuard};
pub use region::{Node, Region, TargetState};
