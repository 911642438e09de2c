//! Round-trip tests
//!
//! HTML produced by the forward pipeline must survive the reverse pipeline: converting it
//! back to markup and rendering that again yields the same HTML.

use mdsync_babel::{ConvertOptions, Converter};

const DOCUMENTS: &[&str] = &[
    "# Title {#t .x}\n\n:::{#main .note}\nSome **bold** text.\n:::\n",
    "Plain paragraph with a [link](https://example.com \"Home\").\n",
    "one\ntwo\nthree\n",
    "- a\n  - b\n- c\n",
    "1. first\n\n2. second\n",
    "> quoted *text*\n",
    "```rust\nfn main() {}\n```\n",
    "| a | b |\n|:--|--:|\n| 1 | 2 |\n",
    ":::{.outer data-role=box}\n## Inner {#inner}\n\n:::{.inner}\nDeep ~~old~~ new.\n:::\n:::\n",
    ":::\nBare container\n:::\n\nAfter.\n\n---\n",
    "## Attrs {#a .b .c data-x=1 title=\"two words\"}\n",
    "\\:::\n",
    "before\n\\:::{.x}\nafter\n",
    "## Set \\{#x\\}\n",
    "# T {@click=go v-on:click=go id=\"two words\"}\n",
];

fn forward(converter: &Converter, markup: &str) -> String {
    converter.render_to_html(markup).expect("forward render")
}

fn reverse(converter: &Converter, html: &str) -> String {
    converter.render_to_markdown(html).expect("reverse render")
}

#[test]
fn test_forward_html_survives_reverse_pipeline() {
    let converter = Converter::default();
    for markup in DOCUMENTS {
        let html = forward(&converter, markup);
        let back = reverse(&converter, &html);
        assert_eq!(forward(&converter, &back), html, "markup:\n{markup}\nback:\n{back}");
    }
}

#[test]
fn test_markup_is_stable_after_one_trip() {
    let converter = Converter::default();
    for markup in DOCUMENTS {
        let once = reverse(&converter, &forward(&converter, markup));
        let twice = reverse(&converter, &forward(&converter, &once));
        assert_eq!(once, twice, "markup:\n{markup}");
    }
}

#[test]
fn test_attribute_documents_return_verbatim() {
    let converter = Converter::default();
    for markup in [
        "# Title {#t .x}\n\n:::{#main .note}\nSome **bold** text.\n:::",
        ":::{#main .container data-section=content}\nTest content\n:::",
        "### Heading {#h data-level=3}",
    ] {
        let html = forward(&converter, markup);
        assert_eq!(reverse(&converter, &html), markup, "html:\n{html}");
    }
}

#[test]
fn test_link_safety_attributes_do_not_leak_into_markup() {
    let converter = Converter::new(ConvertOptions {
        link_target_blank: true,
    });
    let html = forward(&converter, "[x](https://example.com)");
    assert!(html.contains("target=\"_blank\""));
    assert_eq!(reverse(&converter, &html), "[x](https://example.com)");
}

#[test]
fn test_html_headings_survive_reverse_pipeline() {
    let converter = Converter::default();
    for html in [
        "<h1 @click=\"go\" v-on:click=\"go\">T</h1>\n",
        "<h2>Title {#x}</h2>\n",
        "<h2>Title {.x}</h2>\n",
        "<h2 id=\"a b\" class=\"x {y}\">Odd</h2>\n",
        "<p>:::</p>\n",
    ] {
        let back = reverse(&converter, html);
        assert_eq!(forward(&converter, &back), html, "back:\n{back}");
    }
}
