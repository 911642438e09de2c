//! Markup rules for the elements comrak cannot express
//!
//! Fenced containers and heading attribute lists have no comrak node, so the reverse
//! pipeline renders them to literal markup here and splices the result into the comrak
//! tree as raw blocks. Both rules take their notation from
//! [`format_attribute_list`](crate::attributes::format_attribute_list), so a heading and a
//! container with the same attributes print the same `{...}`.

use crate::attributes::format_attribute_list;

/// Render a `<div>` as a fenced container.
///
/// `:::` + notation, newline, the trimmed inner markup, newline, `:::` and a blank line.
/// The container marker never appears in the notation.
pub fn container_rule(attrs: &[(String, String)], inner: &str) -> String {
    format!(
        ":::{}\n{}\n:::\n\n",
        format_attribute_list(attrs),
        inner.trim()
    )
}

/// Render an `<hN>` as an ATX heading with an optional trailing attribute list.
pub fn heading_rule(level: u8, text: &str, attrs: &[(String, String)]) -> String {
    let hashes = "#".repeat(usize::from(level.clamp(1, 6)));
    let notation = format_attribute_list(attrs);
    if notation.is_empty() {
        format!("{hashes} {text}\n")
    } else {
        format!("{hashes} {text} {notation}\n")
    }
}
