//! Reply composition helpers

use regex::Regex;
use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum ComposeError {
    #[error("Invalid signature pattern: {0}")]
    Pattern(String),
}

/// Quote `body` for a reply: drop the signature, trim, prefix each line
/// with `> `.
pub fn quote_body(body: &str) -> Result<String, ComposeError> {
    // Signature separator is "-- " alone on a line
    let re = Regex::new(r"(?m)^-- $").map_err(|e| ComposeError::Pattern(e.to_string()))?;

    let body = match re.find(body) {
        Some(m) => &body[..m.start()],
        None => body,
    };

    Ok(body
        .trim()
        .split('\n')
        .map(|line| format!("> {}", line))
        .collect::<Vec<_>>()
        .join("\n"))
}

/// Insert the quoted `body` ahead of whatever is already in the draft
pub fn quote_into_draft(body: &str, draft: &str) -> Result<String, ComposeError> {
    Ok(format!("{}\n{}", quote_body(body)?, draft))
}
