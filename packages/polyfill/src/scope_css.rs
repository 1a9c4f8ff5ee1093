//! Scope CSS
//!
//! Rewrites `@scope (<root>) { ... }` blocks into plain style rules that
//! emulate the scoping with ordinary selectors, for engines without native
//! `@scope` support.
//!
//! The scan works on brace depth rather than a full CSS grammar: every
//! top-level unit of a scope body is a plain rule, a definition at-rule
//! (`@keyframes`, `@font-face`) or a grouping at-rule (`@media`, `@supports`,
//! `@layer`, ...).

use once_cell::sync::Lazy;
use regex::Regex;

use crate::chars;
use crate::selector_rewriter::rewrite_selector;
use crate::stylesheet::StylesheetText;
use crate::text_scanner::{
    find_matching_brace, find_matching_paren, find_unquoted, split_on_top_level_commas,
    strip_statement_prefix,
};

const SELECTOR_SEPARATOR: &str = ", ";
const CONSTRUCT_SEPARATOR: &str = "\n";
const BLOCK_SEPARATOR: &str = "\n";

/// Grouping at-rules nested deeper than this inside one scope body are
/// dropped together with their rules.
pub const MAX_NESTING_DEPTH: usize = 128;

static COMMENT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"/\*[\s\S]*?\*/").unwrap());

/// `@scope` followed by the opening paren of its root selector.
static SCOPE_HEAD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)@scope\s*\(").unwrap());

/// At-rules whose bodies are not selector-bearing rules.
static DEFINITION_AT_RULE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^@(?:-[a-z]+-)?(?:keyframes|font-face)\b").unwrap());

/// One `@scope` occurrence found in a stylesheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeBlock {
    /// Trimmed text between the parens of the `@scope` head. Opaque.
    pub root_selector: String,
    /// Exact text between the block's braces.
    pub body: String,
}

/// A top-level unit inside a scope body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Construct {
    PlainRule {
        selector_list: String,
        declarations: String,
    },
    /// `@keyframes` / `@font-face`; passed through verbatim.
    DefinitionAtRule { header: String, body: String },
    /// Any other at-rule; its body is scoped recursively.
    GroupingAtRule { header: String, body: String },
}

impl Construct {
    fn classify(header: &str, body: &str) -> Self {
        if header.starts_with(chars::AT) {
            if DEFINITION_AT_RULE_RE.is_match(header) {
                Construct::DefinitionAtRule {
                    header: header.to_string(),
                    body: body.to_string(),
                }
            } else {
                Construct::GroupingAtRule {
                    header: header.to_string(),
                    body: body.to_string(),
                }
            }
        } else {
            Construct::PlainRule {
                selector_list: header.to_string(),
                declarations: body.to_string(),
            }
        }
    }
}

/// Result of polyfilling one stylesheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScopeOutput {
    /// At least one `@scope` block was found. The text may be empty when
    /// every block scoped down to nothing.
    Transformed(String),
    /// The stylesheet has no `@scope` block; nothing should be injected.
    NoMatch,
}

impl ScopeOutput {
    /// The generated CSS, `None` when nothing should be injected.
    pub fn into_css(self) -> Option<String> {
        match self {
            ScopeOutput::Transformed(css) => Some(css),
            ScopeOutput::NoMatch => None,
        }
    }
}

/// Remove `/* ... */` comments. Runs once, before any structural scan.
pub fn strip_comments(css_text: &str) -> String {
    COMMENT_RE.replace_all(css_text, "").into_owned()
}

/// The `@scope` rewriting engine. Holds no state; one instance can be shared
/// across threads.
#[derive(Debug, Default, Clone, Copy)]
pub struct ScopeCss;

impl ScopeCss {
    pub fn new() -> Self {
        ScopeCss
    }

    /// Polyfill every `@scope` block of a stylesheet.
    pub fn extract(&self, stylesheet: &StylesheetText) -> ScopeOutput {
        self.polyfill_css_text(stylesheet.text())
    }

    /// Same as [`ScopeCss::extract`] on bare text.
    pub fn polyfill_css_text(&self, css_text: &str) -> ScopeOutput {
        let css_text = strip_comments(css_text);
        let blocks = self.find_scope_blocks(&css_text);
        if blocks.is_empty() {
            return ScopeOutput::NoMatch;
        }

        let segments: Vec<String> = blocks
            .iter()
            .map(|block| self.transform_block(&block.body, &block.root_selector))
            .collect();
        ScopeOutput::Transformed(segments.join(BLOCK_SEPARATOR))
    }

    /// Locate every `@scope (<root>) { ... }` in already comment-stripped text.
    ///
    /// Each search resumes after the previous block, so an `@scope` nested in
    /// another one is left to [`ScopeCss::transform_block`]. Heads with no
    /// body (the `to (...)` form), an empty root, or unbalanced parens/braces
    /// are skipped.
    pub fn find_scope_blocks(&self, css_text: &str) -> Vec<ScopeBlock> {
        let mut blocks = Vec::new();
        let mut search_from = 0;

        while let Some(head) = SCOPE_HEAD_RE.find_at(css_text, search_from) {
            search_from = head.end();
            let paren_open = head.end() - 1;
            let Some(paren_close) = find_matching_paren(css_text, paren_open) else {
                continue;
            };

            let after_root = &css_text[paren_close + 1..];
            let brace_open = paren_close + 1 + (after_root.len() - after_root.trim_start().len());
            if !css_text[brace_open..].starts_with(chars::LBRACE) {
                continue;
            }
            let Some(brace_close) = find_matching_brace(css_text, brace_open) else {
                continue;
            };

            let root_selector = css_text[paren_open + 1..paren_close].trim();
            if !root_selector.is_empty() {
                blocks.push(ScopeBlock {
                    root_selector: root_selector.to_string(),
                    body: css_text[brace_open + 1..brace_close].to_string(),
                });
            }
            search_from = brace_close + 1;
        }

        blocks
    }

    /// Split a rule body into its top-level constructs, in source order.
    ///
    /// Stops quietly at the first `{` that has no matching `}`. Text after the
    /// last construct has no body and is dropped.
    pub fn parse_constructs(&self, body: &str) -> Vec<Construct> {
        let mut constructs = Vec::new();
        let mut cursor = 0;

        while let Some(open) = find_unquoted(body, cursor, chars::LBRACE) {
            let Some(close) = find_matching_brace(body, open) else {
                break;
            };
            let header = strip_statement_prefix(&body[cursor..open]).trim();
            constructs.push(Construct::classify(header, &body[open + 1..close]));
            cursor = close + 1;
        }

        constructs
    }

    /// Scope a rule body under `root_selector`, recursing into grouping at-rules
    /// up to [`MAX_NESTING_DEPTH`] levels.
    pub fn transform_block(&self, body: &str, root_selector: &str) -> String {
        self.transform_nested(body, root_selector, 0)
    }

    fn transform_nested(&self, body: &str, root_selector: &str, depth: usize) -> String {
        self.parse_constructs(body)
            .iter()
            .filter_map(|construct| self.emit_construct(construct, root_selector, depth))
            .collect::<Vec<_>>()
            .join(CONSTRUCT_SEPARATOR)
    }

    fn emit_construct(
        &self,
        construct: &Construct,
        root_selector: &str,
        depth: usize,
    ) -> Option<String> {
        match construct {
            Construct::DefinitionAtRule { header, body } => Some(format!("{} {{{}}}", header, body)),
            Construct::GroupingAtRule { .. } if depth >= MAX_NESTING_DEPTH => None,
            Construct::GroupingAtRule { header, body } => Some(format!(
                "{} {{\n{}\n}}",
                header,
                self.transform_nested(body, root_selector, depth + 1)
            )),
            Construct::PlainRule {
                selector_list,
                declarations,
            } => {
                let selectors = self.scope_selector_list(selector_list, root_selector);
                if selectors.is_empty() {
                    None
                } else {
                    Some(format!("{} {{{}}}", selectors, declarations))
                }
            }
        }
    }

    /// Rewrite each selector of a comma separated list, dropping blank ones.
    pub fn scope_selector_list(&self, selector_list: &str, root_selector: &str) -> String {
        split_on_top_level_commas(selector_list)
            .iter()
            .map(|selector| rewrite_selector(selector.trim(), root_selector))
            .filter(|selector| !selector.is_empty())
            .collect::<Vec<_>>()
            .join(SELECTOR_SEPARATOR)
    }
}
