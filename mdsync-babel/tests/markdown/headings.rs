//! Heading rule tests (`<hN>` → ATX heading with attribute list)

use mdsync_babel::formats::markdown::heading_rule;
use mdsync_babel::Converter;

fn to_markdown(html: &str) -> String {
    Converter::default()
        .render_to_markdown(html)
        .expect("html should convert")
}

#[test]
fn test_heading_rule_at_every_level() {
    let attrs = vec![("id".to_string(), "x".to_string())];
    for level in 1..=6u8 {
        let expected = format!("{} Title {{#x}}\n", "#".repeat(usize::from(level)));
        assert_eq!(heading_rule(level, "Title", &attrs), expected);
    }
}

#[test]
fn test_heading_with_id_at_every_level() {
    for level in 1..=6 {
        let html = format!("<h{level} id=\"x\">Title</h{level}>");
        let expected = format!("{} Title {{#x}}", "#".repeat(level));
        assert_eq!(to_markdown(&html), expected);
    }
}

#[test]
fn test_heading_without_attributes() {
    assert_eq!(to_markdown("<h2>Plain</h2>"), "## Plain");
}

#[test]
fn test_heading_attribute_order() {
    assert_eq!(
        to_markdown(r#"<h3 data-x="1" class="b a" id="foo">T</h3>"#),
        "### T {#foo .b .a data-x=1}"
    );
}

#[test]
fn test_heading_with_quoted_value() {
    assert_eq!(
        to_markdown(r#"<h1 title="Two words">T</h1>"#),
        "# T {title=\"Two words\"}"
    );
}

#[test]
fn test_heading_keeps_inline_markup() {
    assert_eq!(
        to_markdown("<h2 id=\"s\">Use <code>mdsync</code> <em>now</em></h2>"),
        "## Use `mdsync` *now* {#s}"
    );
}

#[test]
fn test_heading_followed_by_paragraph() {
    assert_eq!(
        to_markdown("<h1 id=\"t\">Title</h1><p>Body</p>"),
        "# Title {#t}\n\nBody"
    );
}
