//! Quote folding
//!
//! Reply fragments carry quoted text from earlier messages. Long quotes are
//! folded when the fragment is inserted so a thread stays readable while
//! pages are still arriving.

use scraper::{Html, Selector};

/// Quoted-text blocks inside message bodies
pub const QUOTE_SELECTOR: &str = "div.email-body .quoted-text";

/// Quotes with more lines than this start folded
pub const FOLD_THRESHOLD: usize = 3;

/// Number of `\n`-separated lines in `text`
pub fn line_count(text: &str) -> usize {
    text.split('\n').count()
}

pub fn should_fold(text: &str) -> bool {
    line_count(text) > FOLD_THRESHOLD
}

/// One quoted-text section and its visibility
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuotedBlock {
    text: String,
    visible: bool,
}

impl QuotedBlock {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            visible: true,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Hide the block if it is too long. Never re-shows a block.
    ///
    /// Returns true when this call collapsed it.
    pub fn fold(&mut self) -> bool {
        if self.visible && should_fold(&self.text) {
            self.visible = false;
            return true;
        }
        false
    }

    /// The "show/hide quote" switch
    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }
}

/// A page of reply markup with its quoted sections
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    html: String,
    quotes: Vec<QuotedBlock>,
}

impl Fragment {
    /// Parse reply markup, collecting quoted-text sections in document order
    pub fn parse(html: &str) -> Self {
        let quotes = match Selector::parse(QUOTE_SELECTOR) {
            Ok(selector) => Html::parse_fragment(html)
                .select(&selector)
                .map(|el| QuotedBlock::new(el.text().collect::<String>()))
                .collect(),
            Err(e) => {
                tracing::error!(error = %e, "Invalid quote selector");
                Vec::new()
            }
        };

        Self {
            html: html.to_string(),
            quotes,
        }
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    pub fn quotes(&self) -> &[QuotedBlock] {
        &self.quotes
    }

    pub fn quote_mut(&mut self, index: usize) -> Option<&mut QuotedBlock> {
        self.quotes.get_mut(index)
    }

    /// Apply the fold rule to every quote, returning how many were collapsed
    pub fn fold_quotes(&mut self) -> usize {
        let mut folded = 0;
        for quote in &mut self.quotes {
            if quote.fold() {
                folded += 1;
            }
        }
        folded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_lines_stay_visible() {
        let mut block = QuotedBlock::new("one\ntwo\nthree");
        assert!(!block.fold());
        assert!(block.is_visible());
    }

    #[test]
    fn test_four_lines_fold() {
        let mut block = QuotedBlock::new("one\ntwo\nthree\nfour");
        assert!(block.fold());
        assert!(!block.is_visible());
    }

    #[test]
    fn test_fold_is_idempotent() {
        let mut long = QuotedBlock::new("a\nb\nc\nd\ne");
        long.fold();
        let after_first = long.clone();
        assert!(!long.fold());
        assert_eq!(long, after_first);

        let mut short = QuotedBlock::new("a\nb");
        short.fold();
        short.fold();
        assert!(short.is_visible());
    }

    #[test]
    fn test_trailing_newline_counts_as_line() {
        assert_eq!(line_count("a\nb\nc\n"), 4);
        assert!(should_fold("a\nb\nc\n"));
    }

    #[test]
    fn test_parse_finds_quotes_in_bodies() {
        let html = r##"
<div class="email"><div class="email-body">
<p>Agreed.</p>
<div class="quoted-switch"><a href="#">...</a></div>
<div class="quoted-text">line 1
line 2
line 3
line 4</div>
</div></div>
<div class="email"><div class="email-body">
<div class="quoted-text">short</div>
</div></div>
<div class="quoted-text">outside any body</div>"##;

        let mut fragment = Fragment::parse(html);
        assert_eq!(fragment.quotes().len(), 2);
        assert_eq!(fragment.fold_quotes(), 1);
        assert!(!fragment.quotes()[0].is_visible());
        assert!(fragment.quotes()[1].is_visible());
        assert_eq!(fragment.fold_quotes(), 0);
    }

    #[test]
    fn test_toggle_reveals_folded_quote() {
        let mut fragment = Fragment::parse(
            r#"<div class="email-body"><div class="quoted-text">1
2
3
4</div></div>"#,
        );
        fragment.fold_quotes();
        fragment.quote_mut(0).unwrap().toggle();
        assert!(fragment.quotes()[0].is_visible());
    }
}
