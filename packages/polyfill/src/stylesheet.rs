//! Stylesheet source text handed to the polyfill.

/// Stylesheet source together with a label for where it came from.
///
/// The origin is only used for diagnostics and output labeling; it is never parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StylesheetText {
    text: String,
    origin: String,
}

impl StylesheetText {
    pub fn new(text: impl Into<String>, origin: impl Into<String>) -> Self {
        StylesheetText {
            text: text.into(),
            origin: origin.into(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }
}
