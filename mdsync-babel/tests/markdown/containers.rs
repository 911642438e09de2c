//! Container rule tests (`<div>` → fenced container)

use mdsync_babel::Converter;

fn to_markdown(html: &str) -> String {
    Converter::default()
        .render_to_markdown(html)
        .expect("html should convert")
}

#[test]
fn test_div_without_attributes() {
    assert_eq!(
        to_markdown("<div>Important information</div>"),
        ":::\nImportant information\n:::"
    );
}

#[test]
fn test_div_with_id_class_and_data_attribute() {
    assert_eq!(
        to_markdown(
            r#"<div id="main" class="container" data-section="content">Test content</div>"#
        ),
        ":::{#main .container data-section=content}\nTest content\n:::"
    );
}

#[test]
fn test_marker_never_reaches_markup() {
    for html in [
        r#"<div data-fence="0">x</div>"#,
        r#"<div data-fence="">x</div>"#,
        r#"<div class="a" data-fence="7">x</div>"#,
    ] {
        let markdown = to_markdown(html);
        assert!(!markdown.contains("data-fence"), "{markdown}");
        assert!(!markdown.contains("{}"), "{markdown}");
    }
}

#[test]
fn test_class_list_with_repeated_spaces() {
    assert_eq!(
        to_markdown(r#"<div class="a  b   c">x</div>"#),
        ":::{.a .b .c}\nx\n:::"
    );
}

#[test]
fn test_nested_divs() {
    let markdown = to_markdown(
        r#"<div class="outer"><p>a</p><div class="inner"><p>b</p></div></div>"#,
    );
    assert_eq!(markdown, ":::{.outer}\na\n\n:::{.inner}\nb\n:::\n:::");
}

#[test]
fn test_div_between_paragraphs() {
    let markdown = to_markdown("<p>before</p><div>inside</div><p>after</p>");
    assert_eq!(markdown, "before\n\n:::\ninside\n:::\n\nafter");
}

#[test]
fn test_empty_div() {
    assert_eq!(to_markdown("<div></div>"), ":::\n\n:::");
}
