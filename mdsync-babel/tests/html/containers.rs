//! Fenced container tests

use mdsync_babel::{Converter, CONTAINER_MARKER};

fn to_html(markup: &str) -> String {
    Converter::default()
        .render_to_html(markup)
        .expect("markup should render")
}

#[test]
fn test_empty_attribute_list_renders_marked_div() {
    let html = to_html(":::{}\nthis is a test content\n:::\n");
    assert!(html.starts_with("<div "), "{html}");
    assert!(html.contains(CONTAINER_MARKER), "{html}");
    assert!(!html.contains("{}"), "{html}");
    assert!(html.contains("<p>this is a test content</p>"), "{html}");
}

#[test]
fn test_container_attributes_precede_marker() {
    let html = to_html(":::{#main .container data-section=content}\nTest content\n:::\n");
    assert_eq!(
        html,
        "<div id=\"main\" class=\"container\" data-section=\"content\" data-fence=\"0\">\n<p>Test content</p>\n</div>\n"
    );
}

#[test]
fn test_marker_counts_containers_in_document_order() {
    let html = to_html(":::\na\n:::\n\n:::{.outer}\n:::{.inner}\nb\n:::\n:::\n");
    let first = html.find("data-fence=\"0\"").expect("first container");
    let second = html.find("data-fence=\"1\"").expect("outer container");
    let third = html.find("data-fence=\"2\"").expect("inner container");
    assert!(first < second && second < third, "{html}");
}

#[test]
fn test_container_holds_block_content() {
    let html = to_html(":::{.note}\n## Heads up {#up}\n\n- a\n- b\n:::\n");
    assert_eq!(
        html,
        "<div class=\"note\" data-fence=\"0\">\n<h2 id=\"up\">Heads up</h2>\n<ul>\n<li>a</li>\n<li>b</li>\n</ul>\n</div>\n"
    );
}

#[test]
fn test_unclosed_container_is_closed_at_end() {
    let html = to_html("before\n\n:::\nleft open\n");
    assert_eq!(
        html,
        "<p>before</p>\n<div data-fence=\"0\">\n<p>left open</p>\n</div>\n"
    );
}

#[test]
fn test_fence_inside_code_block_is_code() {
    let html = to_html("```\n:::\n```\n");
    assert_eq!(html, "<pre><code>:::\n</code></pre>\n");
}
