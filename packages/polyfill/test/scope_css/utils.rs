//! Scope CSS Test Utils
//!
//! Shared helpers for the scope_css integration tests.
#![allow(dead_code)]

use regex::Regex;
use scope_polyfill::{ScopeCss, ScopeOutput};

/// Polyfill `css`, panicking when no `@scope` block is found.
pub fn polyfill(css: &str) -> String {
    match ScopeCss::new().polyfill_css_text(css) {
        ScopeOutput::Transformed(out) => out,
        ScopeOutput::NoMatch => panic!("Expected '{}' to contain an @scope block", css),
    }
}

pub fn transform(body: &str, root_selector: &str) -> String {
    ScopeCss::new().transform_block(body, root_selector)
}

pub fn extract_css_content(css: &str) -> String {
    let re1 = Regex::new(r"\s+").unwrap();
    let re2 = Regex::new(r"\{\s+").unwrap();
    let re3 = Regex::new(r"\s+\}").unwrap();

    let mut result = re1.replace_all(css, " ").to_string();
    result = re2.replace_all(&result, "{").to_string();
    result = re3.replace_all(&result, "}").to_string();
    result.trim().to_string()
}

pub fn assert_equal_css(actual: &str, expected: &str) {
    let actual_css = extract_css_content(actual);
    let expected_css = extract_css_content(expected);
    assert_eq!(
        actual_css, expected_css,
        "Expected '{}' to equal '{}'",
        actual_css, expected_css
    );
}

pub fn assert_not_contains(actual: &str, expected: &str) {
    assert!(
        !actual.contains(expected),
        "Expected '{}' to not contain '{}'",
        actual,
        expected
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_css_content() {
        let css = "  \n  one {\n color: red;\n }  \n  ";
        assert_eq!(extract_css_content(css), "one {color: red;}");
    }
}
