//! List Index
//!
//! The page listing every mailing list: row ordering for the chart
//! sequence, class-based hide switches, and the overview's "more threads"
//! reveal.

use std::collections::{HashMap, HashSet};

/// Threads revealed per click on "more threads"
pub const MORE_THREADS_STEP: usize = 5;

/// Distinct names in first-seen order
pub fn first_seen<'a>(names: impl IntoIterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    names.into_iter().filter(|n| seen.insert(*n)).collect()
}

/// One row of the list table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRow {
    pub name: String,
    pub classes: HashSet<String>,
}

impl ListRow {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            classes: HashSet::new(),
        }
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.insert(class.into());
        self
    }
}

/// Rows of the index plus the state of the hide switches
#[derive(Debug, Clone, Default)]
pub struct ListIndex {
    rows: Vec<ListRow>,
    hide_by_class: HashMap<String, bool>,
}

impl ListIndex {
    pub fn new(rows: Vec<ListRow>) -> Self {
        Self {
            rows,
            hide_by_class: HashMap::new(),
        }
    }

    pub fn rows(&self) -> &[ListRow] {
        &self.rows
    }

    /// List names in the order their charts should load
    pub fn chart_order(&self) -> Vec<&str> {
        first_seen(self.rows.iter().map(|r| r.name.as_str()))
    }

    /// Flip the hide switch for rows carrying `class`
    pub fn set_hidden(&mut self, class: impl Into<String>, hidden: bool) {
        self.hide_by_class.insert(class.into(), hidden);
    }

    fn is_hidden(&self, row: &ListRow) -> bool {
        self.hide_by_class
            .iter()
            .any(|(class, hidden)| *hidden && row.classes.contains(class))
    }

    /// Rows left visible by the current switches
    pub fn visible_rows(&self) -> Vec<&ListRow> {
        self.rows.iter().filter(|r| !self.is_hidden(r)).collect()
    }
}

/// Hidden thread entries revealed a batch at a time
#[derive(Debug, Clone)]
pub struct MoreThreads<T> {
    shown: Vec<T>,
    pending: Vec<T>,
}

impl<T> MoreThreads<T> {
    pub fn new(shown: Vec<T>, pending: Vec<T>) -> Self {
        Self { shown, pending }
    }

    pub fn shown(&self) -> &[T] {
        &self.shown
    }

    /// The "more" link disappears once nothing is left to reveal
    pub fn has_more(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Move the next batch into view, returning how many were revealed
    pub fn reveal(&mut self) -> usize {
        let n = self.pending.len().min(MORE_THREADS_STEP);
        self.shown.extend(self.pending.drain(..n));
        n
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_seen_removes_duplicates() {
        assert_eq!(
            first_seen(["devel", "users", "devel", "announce", "users"]),
            vec!["devel", "users", "announce"]
        );
    }

    #[test]
    fn test_hide_switches() {
        let mut index = ListIndex::new(vec![
            ListRow::new("devel"),
            ListRow::new("old").class("inactive"),
            ListRow::new("secret").class("private"),
        ]);

        assert_eq!(index.visible_rows().len(), 3);

        index.set_hidden("inactive", true);
        let names: Vec<&str> = index.visible_rows().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["devel", "secret"]);

        index.set_hidden("inactive", false);
        index.set_hidden("private", true);
        let names: Vec<&str> = index.visible_rows().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["devel", "old"]);

        // Hidden rows still get their chart
        assert_eq!(index.chart_order(), vec!["devel", "old", "secret"]);
    }

    #[test]
    fn test_more_threads_in_batches() {
        let mut more = MoreThreads::new(vec![0], (1..=7).collect());

        assert_eq!(more.reveal(), 5);
        assert_eq!(more.shown(), &[0, 1, 2, 3, 4, 5]);
        assert!(more.has_more());

        assert_eq!(more.reveal(), 2);
        assert!(!more.has_more());
        assert_eq!(more.reveal(), 0);
    }
}
