//! Unread message navigation
//!
//! Cycles through the unread messages of a thread with next/previous
//! (`j`/`k`) keys.

/// Direction of a navigation step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Next,
    Previous,
}

/// Cursor over the unread messages of a thread
#[derive(Debug, Clone, Default)]
pub struct UnreadNavigator {
    current: Option<usize>,
}

impl UnreadNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move to the next or previous unread message.
    ///
    /// The first `Next` lands on the first message and the first
    /// `Previous` on the last; both directions wrap around. Returns the
    /// zero-based index, or `None` when nothing is unread.
    pub fn step(&mut self, step: Step, unread: usize) -> Option<usize> {
        if unread == 0 {
            return None;
        }

        let next = match (self.current, step) {
            (None, Step::Next) => 0,
            (None, Step::Previous) => unread - 1,
            (Some(i), Step::Next) if i + 1 >= unread => 0,
            (Some(i), Step::Next) => i + 1,
            (Some(0), Step::Previous) => unread - 1,
            // The unread count may have shrunk since the last step
            (Some(i), Step::Previous) if i - 1 >= unread => 0,
            (Some(i), Step::Previous) => i - 1,
        };

        self.current = Some(next);
        Some(next)
    }

    /// One-based position shown in the navigation bar
    pub fn display_index(&self) -> Option<usize> {
        self.current.map(|i| i + 1)
    }
}
