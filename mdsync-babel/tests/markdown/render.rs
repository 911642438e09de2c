//! Generic element mapping tests

use mdsync_babel::Converter;

fn to_markdown(html: &str) -> String {
    Converter::default()
        .render_to_markdown(html)
        .expect("html should convert")
}

#[test]
fn test_paragraphs() {
    assert_eq!(to_markdown("<p>one</p>\n\n<p>two</p>"), "one\n\ntwo");
}

#[test]
fn test_inline_formatting() {
    assert_eq!(
        to_markdown("<p><b>bold</b>, <i>it</i>, <del>old</del> and <code>x</code></p>"),
        "**bold**, *it*, ~~old~~ and `x`"
    );
}

#[test]
fn test_links_and_images() {
    assert_eq!(
        to_markdown(
            r#"<p><a href="https://example.com" title="Home" target="_blank">site</a> <img src="a.png" alt="logo"></p>"#
        ),
        "[site](https://example.com \"Home\") ![logo](a.png)"
    );
}

#[test]
fn test_lists() {
    assert_eq!(
        to_markdown("<ul><li>a</li><li>b<ol start=\"3\"><li>c</li></ol></li></ul>"),
        "- a\n- b\n  3. c"
    );
}

#[test]
fn test_code_block_is_fenced_with_language() {
    assert_eq!(
        to_markdown("<pre><code class=\"language-rust\">let x = 1;\n</code></pre>"),
        "```rust\nlet x = 1;\n```"
    );
}

#[test]
fn test_blockquote_and_rule() {
    assert_eq!(
        to_markdown("<blockquote><p>quoted</p></blockquote><hr>"),
        "> quoted\n\n-----"
    );
}

#[test]
fn test_table() {
    let markdown = to_markdown(
        "<table><thead><tr><th>a</th><th align=\"right\">b</th></tr></thead>\
         <tbody><tr><td>1</td><td>2</td></tr></tbody></table>",
    );
    let lines: Vec<_> = markdown.lines().collect();
    assert_eq!(lines.len(), 3, "{markdown}");
    assert!(lines[0].contains('a') && lines[0].contains('b'), "{markdown}");
    assert!(lines[1].contains("-:"), "{markdown}");

    let html = Converter::default().render_to_html(&markdown).unwrap();
    assert!(html.contains("<th align=\"right\">b</th>"), "{html}");
    assert!(html.contains("<td>1</td>"), "{html}");
}

#[test]
fn test_unknown_elements_delegate_to_children() {
    assert_eq!(
        to_markdown("<section><article><p>Hello <span class=\"x\">world</span></p></article></section>"),
        "Hello world"
    );
}

#[test]
fn test_scripts_and_comments_are_dropped() {
    assert_eq!(
        to_markdown("<p>a<!-- hidden --></p><script>alert(1)</script><style>p{}</style>"),
        "a"
    );
}

#[test]
fn test_full_document_uses_body() {
    assert_eq!(
        to_markdown("<!DOCTYPE html><html><head><title>T</title></head><body><p>x</p></body></html>"),
        "x"
    );
}

#[test]
fn test_empty_input() {
    assert_eq!(to_markdown(""), "");
}
