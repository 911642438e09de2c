//! IR transforms run between parsing and serialization
//!
//! The only transform today is the link-safety pass applied by the forward pipeline when
//! `ConvertOptions::link_target_blank` is set.

use crate::ir::nodes::{Block, Document, Inline};

/// Whether a link destination points inside the current document.
///
/// Destinations starting with `#` or `/#` are same-document anchors and are left alone.
pub fn is_same_document_anchor(url: &str) -> bool {
    url.starts_with('#') || url.starts_with("/#")
}

/// Make every outbound link open in a new browsing context.
///
/// Links that are not same-document anchors get `target="_blank"` and
/// `rel="noopener noreferrer"`, replacing any value already set. Only link nodes are
/// touched; raw HTML anchors are not.
pub fn apply_link_safety(doc: &mut Document) {
    for block in &mut doc.children {
        visit_block(block);
    }
}

fn visit_block(block: &mut Block) {
    match block {
        Block::Paragraph(inlines) => visit_inlines(inlines),
        Block::Heading(heading) => visit_inlines(&mut heading.content),
        Block::Container(container) => container.children.iter_mut().for_each(visit_block),
        Block::BlockQuote(children) => children.iter_mut().for_each(visit_block),
        Block::List(list) => list
            .items
            .iter_mut()
            .flat_map(|item| item.children.iter_mut())
            .for_each(visit_block),
        Block::Table(table) => table
            .rows
            .iter_mut()
            .flat_map(|row| row.cells.iter_mut())
            .for_each(|cell| visit_inlines(cell)),
        Block::CodeBlock(_) | Block::Html(_) | Block::ThematicBreak => {}
    }
}

fn visit_inlines(inlines: &mut [Inline]) {
    for inline in inlines {
        match inline {
            Inline::Link(link) => {
                if !is_same_document_anchor(&link.url) {
                    link.attributes.set("target", "_blank");
                    link.attributes.set("rel", "noopener noreferrer");
                }
                visit_inlines(&mut link.content);
            }
            Inline::Emphasis(children)
            | Inline::Strong(children)
            | Inline::Strikethrough(children) => visit_inlines(children),
            Inline::Text(_)
            | Inline::Code(_)
            | Inline::Image(_)
            | Inline::Html(_)
            | Inline::LineBreak => {}
        }
    }
}
