//! Link-safety tests

use mdsync_babel::{ConvertOptions, Converter};

fn to_html(markup: &str, link_target_blank: bool) -> String {
    Converter::new(ConvertOptions { link_target_blank })
        .render_to_html(markup)
        .expect("markup should render")
}

#[test]
fn test_external_link_gets_target_and_rel() {
    let html = to_html("[docs](https://example.com/docs)", true);
    assert_eq!(
        html,
        "<p><a href=\"https://example.com/docs\" target=\"_blank\" rel=\"noopener noreferrer\">docs</a></p>\n"
    );
}

#[test]
fn test_same_document_anchors_are_untouched() {
    let html = to_html("[a](#section) and [b](/#section)", true);
    assert!(!html.contains("target"), "{html}");
    assert!(!html.contains("rel="), "{html}");
}

#[test]
fn test_relative_paths_are_external() {
    let html = to_html("[guide](/guide)", true);
    assert!(html.contains("target=\"_blank\""), "{html}");
}

#[test]
fn test_disabled_by_default() {
    let html = to_html("[docs](https://example.com)", false);
    assert_eq!(html, "<p><a href=\"https://example.com\">docs</a></p>\n");
}

#[test]
fn test_links_inside_containers_and_headings() {
    let html = to_html(":::\n# [Top](https://a.dev)\n\n> [q](https://b.dev)\n:::\n", true);
    assert_eq!(html.matches("target=\"_blank\"").count(), 2, "{html}");
}

#[test]
fn test_raw_html_anchors_are_not_rewritten() {
    let html = to_html("<a href=\"https://example.com\">raw</a>\n", true);
    assert!(!html.contains("target"), "{html}");
}

#[test]
fn test_destinations_are_percent_encoded_like_comrak() {
    for link_target_blank in [false, true] {
        let html = to_html("[a](<https://x.dev/a b>) [b](https://x.dev/ä)", link_target_blank);
        assert!(html.contains("href=\"https://x.dev/a%20b\""), "{html}");
        assert!(html.contains("href=\"https://x.dev/%C3%A4\""), "{html}");
    }
}

#[test]
fn test_image_sources_are_percent_encoded() {
    let html = to_html("![i](<a b.png>)", true);
    assert_eq!(html, "<p><img src=\"a%20b.png\" alt=\"i\" /></p>\n");
}
