//! Markdown serialization (IR → Markdown export)
//!
//! Pipeline: IR → Comrak AST → Markdown string
//!
//! Standard blocks and inlines become comrak nodes and are printed by
//! `comrak::format_commonmark`. Headings and containers go through the rules in `rules.rs`:
//! their inner content is formatted by comrak first, then wrapped and spliced back into the
//! tree as a raw HTML block, which comrak writes out verbatim. The tree itself is built by
//! [`TreeBuilder`](crate::formats::common::tree::TreeBuilder), shared with the HTML export.

use crate::error::FormatError;
use crate::formats::common::tree::{Target, TreeBuilder};
use crate::ir::nodes::Document;
use comrak::Arena;

/// Serialize an IR document to Markdown
///
/// The result is trimmed of leading and trailing whitespace.
pub fn serialize_to_markdown(doc: &Document) -> Result<String, FormatError> {
    let arena = Arena::new();
    let markdown = TreeBuilder::new(&arena, Target::Markdown).render(&doc.children)?;
    Ok(markdown.trim().to_string())
}
