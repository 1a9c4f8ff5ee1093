//! Scope Block Extraction Tests
//!
//! Finding `@scope` blocks in a whole stylesheet.

mod utils;
use scope_polyfill::{polyfill_scope, ScopeBlock, ScopeCss, ScopeOutput, StylesheetText};
use utils::{assert_equal_css, polyfill};

#[test]
fn should_report_no_match_without_scope_blocks() {
    let css = "img { border-radius: 50%; } @media print { p { color: black; } }";
    assert_eq!(ScopeCss::new().polyfill_css_text(css), ScopeOutput::NoMatch);
    assert_eq!(ScopeCss::new().polyfill_css_text(""), ScopeOutput::NoMatch);
}

#[test]
fn should_extract_from_stylesheet_text() {
    let sheet = StylesheetText::new("@scope (.card) { img { width: 1px; } }", "card.css");
    let output = ScopeCss::new().extract(&sheet);
    assert_eq!(output.into_css().as_deref(), Some(".card img { width: 1px; }"));
    assert_eq!(sheet.origin(), "card.css");
}

#[test]
fn should_process_independent_blocks_in_source_order() {
    let css = "@scope (.a) { p { color: red; } }\nbody { margin: 0; }\n@scope (.b) { p { color: blue; } }";
    assert_eq!(polyfill(css), ".a p { color: red; }\n.b p { color: blue; }");
}

#[test]
fn should_find_block_boundaries() {
    let css = "@scope (.a) { p {x} } @scope (.b) {q {y}}";
    assert_eq!(
        ScopeCss::new().find_scope_blocks(css),
        vec![
            ScopeBlock {
                root_selector: ".a".to_string(),
                body: " p {x} ".to_string(),
            },
            ScopeBlock {
                root_selector: ".b".to_string(),
                body: "q {y}".to_string(),
            },
        ]
    );
}

#[test]
fn should_trim_the_root_selector() {
    assert_eq!(polyfill("@scope ( .card ) {p{}}"), ".card p {}");
    assert_eq!(polyfill("@scope(.card){p{}}"), ".card p {}");
}

#[test]
fn should_match_the_keyword_case_insensitively() {
    assert_eq!(polyfill("@SCOPE (.a) {p{}}"), ".a p {}");
}

#[test]
fn should_keep_nested_parens_in_the_root_selector() {
    assert_eq!(
        polyfill("@scope (.a:not(.b)) { p {} }"),
        ".a:not(.b) p {}"
    );
}

#[test]
fn should_distinguish_an_empty_result_from_no_match() {
    assert_eq!(
        ScopeCss::new().polyfill_css_text("@scope (.a) {}"),
        ScopeOutput::Transformed(String::new())
    );
}

#[test]
fn should_strip_comments_before_scanning() {
    assert_eq!(
        polyfill_scope("/* @scope (.a) { p {} } */ p {}", "inline"),
        ScopeOutput::NoMatch
    );
    assert_eq!(
        polyfill("@scope (.a) { /* note */ p { x: y; } }"),
        ".a p { x: y; }"
    );
}

#[test]
fn should_skip_the_two_boundary_form() {
    assert_eq!(
        ScopeCss::new().polyfill_css_text("@scope (.a) to (.b) { p {} }"),
        ScopeOutput::NoMatch
    );
}

#[test]
fn should_skip_an_empty_root_selector() {
    assert_eq!(
        ScopeCss::new().polyfill_css_text("@scope () { p {} }"),
        ScopeOutput::NoMatch
    );
}

#[test]
fn should_skip_an_unbalanced_block_and_keep_scanning() {
    let css = "@scope (.a) { h1 {} @scope (.b) { p {} }";
    assert_eq!(polyfill(css), ".b p {}");
}

#[test]
fn should_treat_a_nested_scope_as_a_grouping_rule() {
    let css = "@scope (.a) { @scope (.b) { p { x } } }";
    assert_equal_css(&polyfill(css), "@scope (.b) { .a p { x } }");
}

#[test]
fn should_scope_a_realistic_stylesheet() {
    let css = "
        .card { display: block; }
        @scope (.card) {
          img { border-radius: 50%; }
          :scope { background: #fff; }
          @media (max-width: 500px) {
            h2 { font-size: 1rem; }
          }
          @keyframes spin { to { transform: rotate(360deg); } }
        }
    ";
    let expected = "
        .card img { border-radius: 50%; }
        .card { background: #fff; }
        @media (max-width: 500px) { .card h2 { font-size: 1rem; } }
        @keyframes spin { to { transform: rotate(360deg); } }
    ";
    assert_equal_css(&polyfill(css), expected);
}
