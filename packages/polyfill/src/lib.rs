#![deny(clippy::all)]

//! Scope Polyfill
//!
//! Rewrites CSS `@scope` blocks into plain CSS for engines without native support.

pub mod chars;
pub mod scope_css;
pub mod selector_rewriter;
pub mod stylesheet;
pub mod text_scanner;

// Re-exports
pub use scope_css::{Construct, ScopeBlock, ScopeCss, ScopeOutput};
pub use stylesheet::StylesheetText;

/// Polyfill every `@scope` block in `css_text`.
///
/// `origin` labels the source for diagnostics only.
pub fn polyfill_scope(css_text: &str, origin: &str) -> ScopeOutput {
    ScopeCss::new().extract(&StylesheetText::new(css_text, origin))
}
