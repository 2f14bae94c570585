//! Moderation dialog contents

use super::HeldMessage;

/// Shown when the server could not extract a text body
pub const NO_CONTENT: &str = "<p>Message content could not be extracted</p>";

/// Escape text for insertion into markup
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn with_line_breaks(html: &str) -> String {
    html.replace('\n', "<br />")
}

/// Everything the moderation dialog displays for one message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeldMessageView {
    pub msgid: u64,
    /// Subject, shown as-is in the dialog title
    pub title: String,
    pub source_url: String,
    pub body_html: String,
    pub headers_html: String,
    pub attachments_html: String,
    pub show_attachments: bool,
}

impl HeldMessageView {
    pub fn build(message: &HeldMessage, url: &str, msgid: u64) -> Self {
        let body_html = match message.msg.body.as_deref() {
            Some(body) if !body.is_empty() => with_line_breaks(&escape_html(body)),
            _ => NO_CONTENT.to_string(),
        };

        let headers_html = format!(
            "{}<hr />",
            with_line_breaks(&escape_html(&message.msg.headers))
        );

        let attachments_html: String = message
            .attachments
            .iter()
            .map(|(href, name)| {
                format!(
                    r#"<a href="{}">{}</a><br />"#,
                    escape_html(href),
                    escape_html(name)
                )
            })
            .collect();

        Self {
            msgid,
            title: message.subject.clone(),
            source_url: format!("{}?raw", url),
            body_html,
            headers_html,
            show_attachments: !attachments_html.is_empty(),
            attachments_html,
        }
    }
}
