//! User-facing error surface
//!
//! Functional flows (reply pagination, form actions, moderation) show the
//! server's error text to the user. Charts never do.

use std::sync::{Mutex, PoisonError};

/// Something that can put a blocking message in front of the user
pub trait Notifier: Send + Sync {
    fn alert(&self, message: &str);
}

/// Sends alerts to the log
#[derive(Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn alert(&self, message: &str) {
        tracing::warn!(message = %message, "Server error");
    }
}

/// Prints alerts on stderr
#[derive(Debug, Default)]
pub struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn alert(&self, message: &str) {
        eprintln!("{}", message);
    }
}

/// Keeps every alert in memory
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Notifier for RecordingNotifier {
    fn alert(&self, message: &str) {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message.to_string());
    }
}

/// Alert with `message` unless it is empty
pub fn alert_non_empty(notifier: &dyn Notifier, message: &str) {
    if !message.is_empty() {
        notifier.alert(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_messages_are_swallowed() {
        let notifier = RecordingNotifier::new();
        alert_non_empty(&notifier, "");
        alert_non_empty(&notifier, "Please log in");
        assert_eq!(notifier.messages(), vec!["Please log in"]);
    }
}
