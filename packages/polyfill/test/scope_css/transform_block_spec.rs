//! Block Transform Tests
//!
//! Scoping the rules of a single `@scope` body.

mod utils;
use utils::{assert_not_contains, transform};

#[test]
fn should_preserve_rule_order() {
    let body = "img { border-radius: 50%; } :scope { background: #fff; }";
    assert_eq!(
        transform(body, ".card"),
        ".card img { border-radius: 50%; }\n.card { background: #fff; }"
    );
}

#[test]
fn should_rewrite_every_selector_of_a_list() {
    let body = "h1, :scope > h2,, &.active { color: red; }";
    assert_eq!(
        transform(body, ".card"),
        ".card h1, .card > h2, .card.active { color: red; }"
    );
}

#[test]
fn should_not_split_inside_functional_pseudo_classes() {
    assert_eq!(
        transform(":is(.a, .b), .c { x: y; }", ".r"),
        ".r :is(.a, .b), .r .c { x: y; }"
    );
}

#[test]
fn should_not_split_inside_attribute_strings() {
    assert_eq!(
        transform(r#"[title="a,b"] { x: y; }"#, ".r"),
        r#".r [title="a,b"] { x: y; }"#
    );
}

#[test]
fn should_leave_declarations_untouched() {
    let body = "a { background: url(\"a&b.png\"); --s: :scope; }";
    assert_eq!(
        transform(body, ".r"),
        ".r a { background: url(\"a&b.png\"); --s: :scope; }"
    );
}

#[test]
fn should_drop_rules_without_a_selector() {
    assert_eq!(transform(", { color: red; } p { x }", ".r"), ".r p { x }");
    assert_eq!(transform("{ color: red; }", ".r"), "");
}

#[test]
fn should_discard_trailing_text_without_a_body() {
    assert_eq!(transform("p {a} stray", ".r"), ".r p {a}");
}

#[test]
fn should_drop_statements_before_a_rule() {
    assert_eq!(transform("color: red; img { x }", ".card"), ".card img { x }");
    assert_eq!(
        transform("@import url(\"a;b.css\"); p {y}", ".r"),
        ".r p {y}"
    );
}

#[test]
fn should_stop_at_an_unmatched_brace() {
    let body = "h1 { color: red; } h2 { color: blue; ";
    let result = transform(body, ".card");
    assert_eq!(result, ".card h1 { color: red; }");
    assert_not_contains(&result, "h2");
}

#[test]
fn should_ignore_braces_inside_strings() {
    let body = "p::after { content: \"}\"; } a { b: c; }";
    assert_eq!(
        transform(body, ".x"),
        ".x p::after { content: \"}\"; }\n.x a { b: c; }"
    );
}

#[test]
fn should_keep_nested_rule_bodies_as_declarations() {
    // Plain rule bodies are never parsed, even when they hold nested rules.
    assert_eq!(
        transform(".a { & .b { c: d; } }", ".r"),
        ".r .a { & .b { c: d; } }"
    );
}

#[test]
fn should_handle_an_empty_body() {
    assert_eq!(transform("", ".r"), "");
    assert_eq!(transform("   \n  ", ".r"), "");
}

#[test]
fn should_not_treat_quoted_placeholders_as_the_scope_root() {
    assert_eq!(
        transform(r#"a[href*="&"] { x: y; }"#, ".card"),
        r#".card a[href*="&"] { x: y; }"#
    );
    assert_eq!(
        transform(r#"[title=":scope"] { x: y; }"#, ".card"),
        r#".card [title=":scope"] { x: y; }"#
    );
}
