//! Rendering tests for standard markup elements

use insta::assert_snapshot;
use mdsync_babel::Converter;

fn to_html(markup: &str) -> String {
    Converter::default()
        .render_to_html(markup)
        .expect("markup should render")
}

#[test]
fn test_heading_with_attribute_list() {
    let html = to_html("# this is a test content {#header .header}");
    assert_eq!(
        html,
        "<h1 id=\"header\" class=\"header\">this is a test content</h1>\n"
    );
}

#[test]
fn test_heading_with_pass_through_attributes() {
    let html = to_html("## Setup {#setup data-step=1 title=\"First step\"}");
    assert_snapshot!(html, @r#"<h2 id="setup" data-step="1" title="First step">Setup</h2>"#);
}

#[test]
fn test_escaped_or_encoded_braces_are_heading_text() {
    assert_eq!(to_html("## Set \\{#x\\}"), "<h2>Set {#x}</h2>\n");
    assert_eq!(to_html("## Set &#123;#x}"), "<h2>Set {#x}</h2>\n");
}

#[test]
fn test_heading_with_event_handler_attributes() {
    assert_eq!(
        to_html("# T {@click=go v-on:click=go}"),
        "<h1 @click=\"go\" v-on:click=\"go\">T</h1>\n"
    );
}

#[test]
fn test_heading_without_attribute_list() {
    assert_eq!(to_html("### Plain"), "<h3>Plain</h3>\n");
}

#[test]
fn test_every_line_break_is_hard() {
    let html = to_html("first line\nsecond line\nthird");
    assert_eq!(
        html,
        "<p>first line<br />\nsecond line<br />\nthird</p>\n"
    );
}

#[test]
fn test_inline_formatting() {
    let html = to_html("Some *em*, **strong**, ~~gone~~ and `code`.");
    assert_eq!(
        html,
        "<p>Some <em>em</em>, <strong>strong</strong>, <del>gone</del> and <code>code</code>.</p>\n"
    );
}

#[test]
fn test_pipe_table() {
    let html = to_html("| Name | Size |\n|:-----|-----:|\n| a | 1 |\n");
    assert_snapshot!(html, @r#"
    <table>
    <thead>
    <tr>
    <th align="left">Name</th>
    <th align="right">Size</th>
    </tr>
    </thead>
    <tbody>
    <tr>
    <td align="left">a</td>
    <td align="right">1</td>
    </tr>
    </tbody>
    </table>
    "#);
}

#[test]
fn test_lists() {
    let html = to_html("- one\n- two\n  1. nested\n");
    assert_snapshot!(html, @r#"
    <ul>
    <li>one</li>
    <li>two
    <ol>
    <li>nested</li>
    </ol>
    </li>
    </ul>
    "#);
}

#[test]
fn test_code_block_and_quote() {
    let html = to_html("> quoted\n\n```sh\necho <hi>\n```\n");
    assert_eq!(
        html,
        "<blockquote>\n<p>quoted</p>\n</blockquote>\n<pre><code class=\"language-sh\">echo &lt;hi&gt;\n</code></pre>\n"
    );
}

#[test]
fn test_raw_html_passes_through() {
    let html = to_html("<aside class=\"x\">note</aside>\n\nText with <kbd>Ctrl</kbd>.\n");
    assert_eq!(
        html,
        "<aside class=\"x\">note</aside>\n<p>Text with <kbd>Ctrl</kbd>.</p>\n"
    );
}

#[test]
fn test_empty_input() {
    assert_eq!(to_html(""), "");
}
