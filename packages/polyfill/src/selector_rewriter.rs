//! Selector Rewriter
//!
//! Rewrites a single selector from inside an `@scope` block so that it only
//! matches within the scope root.

use once_cell::sync::Lazy;
use regex::{NoExpand, Regex};

use crate::chars;
use crate::text_scanner::quote_segments;

/// `:scope`, tolerating whitespace after the colon (`: scope`).
static SCOPE_PSEUDO_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i):\s*scope\b").unwrap());

/// Which rewrite a selector receives. Exactly one applies per selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewriteRule {
    /// Blank selector, rewritten to nothing and dropped by the caller.
    Empty,
    /// `:scope` is replaced by the root selector.
    ScopePlaceholder,
    /// `&` is replaced by the root selector.
    NestingPlaceholder,
    /// The root selector is prepended with a descendant combinator.
    ImplicitDescendant,
}

/// Decides which rewrite applies. `:scope` takes priority over `&`.
///
/// Placeholders inside quoted strings or escaped (`[href*="&"]`, `\&`) are
/// attribute text, not placeholders.
pub fn classify_selector(selector: &str) -> RewriteRule {
    let selector = selector.trim();
    if selector.is_empty() {
        return RewriteRule::Empty;
    }
    let segments = quote_segments(selector);
    let structural = || segments.iter().filter(|(literal, _)| !literal).map(|(_, s)| *s);
    if structural().any(|s| SCOPE_PSEUDO_RE.is_match(s)) {
        RewriteRule::ScopePlaceholder
    } else if structural().any(|s| s.contains(chars::AMPERSAND)) {
        RewriteRule::NestingPlaceholder
    } else {
        RewriteRule::ImplicitDescendant
    }
}

fn replace_unquoted(selector: &str, replace: impl Fn(&str) -> String) -> String {
    quote_segments(selector)
        .into_iter()
        .map(|(literal, part)| if literal { part.to_string() } else { replace(part) })
        .collect()
}

/// Rewrite one selector under `root_selector`.
///
/// ```
/// use scope_polyfill::selector_rewriter::rewrite_selector;
///
/// assert_eq!(rewrite_selector("img", ".card"), ".card img");
/// assert_eq!(rewrite_selector(":scope > h2", ".card"), ".card > h2");
/// assert_eq!(rewrite_selector("&:hover", ".card"), ".card:hover");
/// ```
pub fn rewrite_selector(selector: &str, root_selector: &str) -> String {
    let selector = selector.trim();
    match classify_selector(selector) {
        RewriteRule::Empty => String::new(),
        RewriteRule::ScopePlaceholder => replace_unquoted(selector, |part| {
            SCOPE_PSEUDO_RE
                .replace_all(part, NoExpand(root_selector))
                .into_owned()
        }),
        RewriteRule::NestingPlaceholder => {
            replace_unquoted(selector, |part| part.replace(chars::AMPERSAND, root_selector))
        }
        RewriteRule::ImplicitDescendant => {
            format!("{}{}{}", root_selector, chars::SPACE, selector)
        }
    }
}
