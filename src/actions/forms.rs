//! Form payloads

use serde::Deserialize;

/// A form's target URL and its fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionForm {
    pub action: String,
    pub fields: Vec<(String, String)>,
}

impl ActionForm {
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            fields: Vec::new(),
        }
    }

    /// Set a field, replacing any earlier value with the same name
    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        self.fields.retain(|(n, _)| *n != name);
        self.fields.push((name, value.into()));
        self
    }

    /// The action URL with the fields serialized as its query string
    pub fn query_url(&self) -> String {
        if self.fields.is_empty() {
            return self.action.clone();
        }
        let query: Vec<String> = self
            .fields
            .iter()
            .map(|(n, v)| format!("{}={}", urlencoding::encode(n), urlencoding::encode(v)))
            .collect();
        format!("{}?{}", self.action, query.join("&"))
    }
}

/// What the favorite link will do when clicked next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoriteState {
    Add,
    Remove,
}

impl FavoriteState {
    pub fn as_str(&self) -> &'static str {
        match self {
            FavoriteState::Add => "add",
            FavoriteState::Remove => "rm",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            FavoriteState::Add => FavoriteState::Remove,
            FavoriteState::Remove => FavoriteState::Add,
        }
    }
}

/// Server reply to a posted message
#[derive(Debug, Clone, Deserialize)]
pub struct ReplyPosted {
    /// Status text shown under the form
    pub result: String,
    /// Rendered message to insert in the thread; absent for a new thread
    #[serde(default)]
    pub message_html: Option<String>,
}
