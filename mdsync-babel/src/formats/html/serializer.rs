//! HTML serialization (IR → HTML export)
//!
//! Renders IR documents to an HTML fragment.
//! Pipeline: IR → Comrak AST → HTML string
//!
//! The IR is built into a comrak tree and printed by `comrak::format_html`, so plain markup
//! renders byte for byte as it would through `comrak::markdown_to_html`. Headings,
//! containers and links with attributes are spliced in as raw HTML by
//! [`TreeBuilder`](crate::formats::common::tree::TreeBuilder), with their values escaped by
//! comrak's own escapers.

use crate::error::FormatError;
use crate::formats::common::tree::{Target, TreeBuilder};
use crate::ir::nodes::Document;
use comrak::Arena;

/// Serialize an IR document to an HTML fragment
pub fn serialize_to_html(doc: &Document) -> Result<String, FormatError> {
    let arena = Arena::new();
    TreeBuilder::new(&arena, Target::Html).render(&doc.children)
}
