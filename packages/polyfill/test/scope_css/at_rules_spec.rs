//! At Rules Tests
//!
//! Grouping at-rules are scoped recursively, definition at-rules pass through.

mod utils;
use utils::{assert_equal_css, polyfill, transform};

#[test]
fn should_scope_rules_inside_media() {
    let body = "@media (max-width: 500px) { h2 { font-size: 1rem; } }";
    assert_eq!(
        transform(body, ".card"),
        "@media (max-width: 500px) {\n.card h2 { font-size: 1rem; }\n}"
    );
}

#[test]
fn should_never_rewrite_the_media_condition() {
    let body = "@media screen and (min-width: 10px), print { :scope { a: b; } }";
    assert_eq!(
        transform(body, ".card"),
        "@media screen and (min-width: 10px), print {\n.card { a: b; }\n}"
    );
}

#[test]
fn should_recurse_through_nested_grouping_rules() {
    let body = "@supports (display: grid) { @media print { p { a } } }";
    assert_eq!(
        transform(body, ".r"),
        "@supports (display: grid) {\n@media print {\n.r p { a }\n}\n}"
    );
}

#[test]
fn should_scope_layer_and_container_rules() {
    assert_eq!(
        transform("@layer base { p { a } }", ".r"),
        "@layer base {\n.r p { a }\n}"
    );
    assert_equal_css(
        &transform("@container sidebar (min-width: 400px) { & > p { a } }", ".r"),
        "@container sidebar (min-width: 400px) { .r > p { a } }",
    );
}

#[test]
fn should_pass_keyframes_through_unchanged() {
    let body = "@keyframes spin { from { transform: rotate(0deg); } to { transform: rotate(360deg); } }";
    assert_eq!(transform(body, ".card"), body);
    assert_eq!(transform(body, "#other > .root"), body);
}

#[test]
fn should_not_rewrite_placeholders_inside_keyframes() {
    let body = "@keyframes pulse { from { --x: \"&\"; } to { --y: \":scope\"; } }";
    assert_eq!(transform(body, ".card"), body);
}

#[test]
fn should_pass_vendor_keyframes_through_unchanged() {
    let body = "@-webkit-keyframes fade { 0% { opacity: 0; } }";
    assert_eq!(transform(body, ".r"), body);
}

#[test]
fn should_pass_font_face_through_unchanged() {
    let body = "@font-face { font-family: \"X\"; src: url(x.woff); }";
    assert_eq!(transform(body, ".r"), body);
}

#[test]
fn should_keep_keyframes_inside_media_unchanged() {
    let css = "@scope (.card) { @media print { @keyframes k { to { a: b; } } p { c: d; } } }";
    assert_equal_css(
        &polyfill(css),
        "@media print { @keyframes k { to { a: b; } } .card p { c: d; } }",
    );
}

#[test]
fn should_survive_deeply_nested_grouping_rules() {
    let levels = 20_000;
    let css = format!(
        "@scope (.r) {{{}p {{ x: y; }}{}}} @scope (.s) {{ a {{ b: c; }} }}",
        "@media print {".repeat(levels),
        "}".repeat(levels)
    );
    let out = polyfill(&css);
    assert!(!out.contains(".r p"));
    assert!(out.ends_with(".s a { b: c; }"));
}
