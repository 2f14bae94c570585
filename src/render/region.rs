//! Region: a named UI area that accumulates content

use super::guard::LoadGuard;
use crate::chart::RenderedChart;
use crate::replies::{Fragment, PageCursor};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// One child of a region
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Spinner shown until the region's loader finishes
    LoadingIndicator,
    /// Rendered bar chart
    Chart(RenderedChart),
    /// Page of reply markup
    Fragment(Fragment),
}

/// Snapshot of a region's loader state
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TargetState {
    pub loading: bool,
    pub cursor: Option<PageCursor>,
}

#[derive(Debug)]
struct Contents {
    nodes: Vec<Node>,
    cursor: Option<PageCursor>,
    attached: bool,
}

/// A UI region owned by whichever pipeline is filling it
#[derive(Debug)]
pub struct Region {
    id: String,
    guard: Arc<LoadGuard>,
    contents: Mutex<Contents>,
}

impl Region {
    /// New region showing a loading indicator
    pub fn new(id: impl Into<String>) -> Self {
        Self::with_nodes(id, vec![Node::LoadingIndicator])
    }

    /// New region with no loading indicator (already rendered)
    pub fn empty(id: impl Into<String>) -> Self {
        Self::with_nodes(id, Vec::new())
    }

    fn with_nodes(id: impl Into<String>, nodes: Vec<Node>) -> Self {
        Self {
            id: id.into(),
            guard: Arc::new(LoadGuard::new()),
            contents: Mutex::new(Contents {
                nodes,
                cursor: None,
                attached: true,
            }),
        }
    }

    /// Convenience for the common `Arc<Region>` case
    pub fn shared(id: impl Into<String>) -> Arc<Self> {
        Arc::new(Self::new(id))
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn guard(&self) -> &Arc<LoadGuard> {
        &self.guard
    }

    fn lock(&self) -> MutexGuard<'_, Contents> {
        self.contents.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn state(&self) -> TargetState {
        TargetState {
            loading: self.guard.is_set(),
            cursor: self.lock().cursor.clone(),
        }
    }

    pub fn set_cursor(&self, cursor: Option<PageCursor>) {
        self.lock().cursor = cursor;
    }

    pub fn has_loading_indicator(&self) -> bool {
        self.lock().nodes.contains(&Node::LoadingIndicator)
    }

    pub fn remove_loading_indicator(&self) {
        self.lock().nodes.retain(|n| *n != Node::LoadingIndicator);
    }

    /// Add a loading indicator after the current content unless one is shown
    pub fn show_loading_indicator(&self) {
        let mut contents = self.lock();
        if !contents.nodes.contains(&Node::LoadingIndicator) {
            contents.nodes.push(Node::LoadingIndicator);
        }
    }

    /// Replace everything in the region, indicator included, with `node`
    pub fn replace_with(&self, node: Node) {
        self.lock().nodes = vec![node];
    }

    /// Move the loading indicator (if any) after the last content node
    pub fn move_indicator_to_end(&self) {
        let mut contents = self.lock();
        let before = contents.nodes.len();
        contents.nodes.retain(|n| *n != Node::LoadingIndicator);
        if contents.nodes.len() != before {
            contents.nodes.push(Node::LoadingIndicator);
        }
    }

    pub fn append(&self, node: Node) {
        self.lock().nodes.push(node);
    }

    /// Remove every chart node, returning how many were dropped
    pub fn remove_charts(&self) -> usize {
        let mut contents = self.lock();
        let before = contents.nodes.len();
        contents.nodes.retain(|n| !matches!(n, Node::Chart(_)));
        before - contents.nodes.len()
    }

    pub fn nodes(&self) -> Vec<Node> {
        self.lock().nodes.clone()
    }

    pub fn charts(&self) -> Vec<RenderedChart> {
        self.lock()
            .nodes
            .iter()
            .filter_map(|n| match n {
                Node::Chart(c) => Some(c.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn fragments(&self) -> Vec<Fragment> {
        self.lock()
            .nodes
            .iter()
            .filter_map(|n| match n {
                Node::Fragment(f) => Some(f.clone()),
                _ => None,
            })
            .collect()
    }

    /// Concatenated markup of all fragments, in order
    pub fn fragment_html(&self) -> String {
        self.fragments().iter().map(|f| f.html()).collect()
    }

    /// Mark the region as removed from the page.
    ///
    /// Loads already in flight still complete into a detached region.
    pub fn detach(&self) {
        self.lock().attached = false;
    }

    pub fn is_attached(&self) -> bool {
        self.lock().attached
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indicator_moves_to_end() {
        let region = Region::new("replies");
        region.append(Node::Fragment(Fragment::parse("<p>one</p>")));
        region.move_indicator_to_end();

        let nodes = region.nodes();
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[1], Node::LoadingIndicator);
    }

    #[test]
    fn test_move_without_indicator_is_noop() {
        let region = Region::empty("replies");
        region.append(Node::Fragment(Fragment::parse("<p>one</p>")));
        region.move_indicator_to_end();
        assert!(!region.has_loading_indicator());
        assert_eq!(region.nodes().len(), 1);
    }

    #[test]
    fn test_show_then_replace_contents() {
        let region = Region::empty("suggestions");
        region.append(Node::Fragment(Fragment::parse("<li>old</li>")));
        region.show_loading_indicator();
        region.show_loading_indicator();
        assert_eq!(region.nodes().len(), 2);

        region.replace_with(Node::Fragment(Fragment::parse("<li>new</li>")));
        assert!(!region.has_loading_indicator());
        assert_eq!(region.fragment_html(), "<li>new</li>");
    }

    #[test]
    fn test_state_tracks_guard() {
        let region = Region::new("chart");
        assert!(!region.state().loading);

        let token = region.guard().try_acquire().unwrap();
        assert!(region.state().loading);
        drop(token);
        assert!(!region.state().loading);
    }
}
