//! Markdown parsing (Markdown → IR)
//!
//! Pipeline: Markdown string → container segments → Comrak AST (per segment) → IR
//!
//! Fenced containers are split out first (see `fences.rs`); every stretch of plain markup
//! between fences is parsed by comrak on its own and converted to IR blocks.
//!
//! Heading attribute lists are found on the raw heading line, not in comrak's decoded text,
//! so `\{#x\}` and `&#123;#x}` stay prose. A first comrak pass locates the headings by
//! source position; their lists are cut from the source and the trimmed source is parsed
//! again.

use super::fences::{split_containers, Segment};
use crate::attributes::{split_trailing_attribute_list, Attributes};
use crate::error::FormatError;
use crate::ir::nodes::{
    plain_text, Block, CodeBlock, Container, Document, Heading, Image, Inline, Link, List,
    ListItem, Table, TableCellAlignment, TableRow,
};
use comrak::nodes::{AstNode, ListType, NodeValue, TableAlignment};
use comrak::{parse_document, Arena, ComrakOptions};
use std::collections::HashMap;

/// Attribute lists lifted off heading lines, keyed by the heading's first source line.
type HeadingAttributes = HashMap<usize, Attributes>;

/// Parse a Markdown string into an IR document.
///
/// Never fails on malformed markup: unclosed containers are closed at the end of input
/// and anything comrak cannot place becomes paragraph text.
pub fn parse_from_markdown(source: &str) -> Result<Document, FormatError> {
    let segments = split_containers(source);
    Ok(Document::new(segments_to_blocks(&segments)))
}

fn default_comrak_options() -> ComrakOptions<'static> {
    let mut options = ComrakOptions::default();
    options.extension.table = true;
    options.extension.strikethrough = true;
    options.extension.autolink = true;
    options
}

fn segments_to_blocks(segments: &[Segment]) -> Vec<Block> {
    let mut blocks = Vec::new();
    for segment in segments {
        match segment {
            Segment::Markup(text) => blocks.extend(parse_markup(text)),
            Segment::Container {
                attributes,
                children,
            } => blocks.push(Block::Container(Container {
                attributes: attributes.clone(),
                children: segments_to_blocks(children),
            })),
        }
    }
    blocks
}

fn parse_markup(source: &str) -> Vec<Block> {
    let options = default_comrak_options();
    let (source, lifted) = lift_heading_attributes(source, &options);
    let arena = Arena::new();
    let root = parse_document(&arena, &source, &options);
    convert_blocks(root, &lifted)
}

/// Cut trailing attribute lists off heading lines.
///
/// Returns the source with the lists removed (line count unchanged) and the parsed lists.
fn lift_heading_attributes(source: &str, options: &ComrakOptions) -> (String, HeadingAttributes) {
    let arena = Arena::new();
    let root = parse_document(&arena, source, options);

    let mut lines: Vec<String> = source.split_inclusive('\n').map(str::to_string).collect();
    let mut lifted = HeadingAttributes::new();

    for node in root.descendants() {
        let ast = node.data.borrow();
        let NodeValue::Heading(heading) = &ast.value else {
            continue;
        };
        let start = ast.sourcepos.start.line;
        // Setext content ends on the line above the underline
        let line_number = if heading.setext {
            ast.sourcepos.end.line.saturating_sub(1)
        } else {
            start
        };
        let Some(line) = line_number.checked_sub(1).and_then(|i| lines.get_mut(i)) else {
            continue;
        };

        let content = line.trim_end_matches(['\n', '\r']);
        let ending = line[content.len()..].to_string();
        let content = if heading.setext {
            content
        } else {
            strip_closing_sequence(content)
        };
        let Some((text, attributes)) = split_trailing_attribute_list(content) else {
            continue;
        };
        if heading.setext && text.trim().is_empty() {
            continue;
        }
        let rewritten = format!("{text}{ending}");
        *line = rewritten;
        lifted.insert(start, attributes);
    }

    (lines.concat(), lifted)
}

/// Drop an ATX closing `#` run, which follows the attribute list when present.
fn strip_closing_sequence(line: &str) -> &str {
    let trimmed = line.trim_end();
    let without = trimmed.trim_end_matches('#');
    if without.len() < trimmed.len() && without.ends_with([' ', '\t']) {
        without.trim_end()
    } else {
        line
    }
}

fn convert_blocks<'a>(node: &'a AstNode<'a>, lifted: &HeadingAttributes) -> Vec<Block> {
    node.children()
        .filter_map(|child| convert_block(child, lifted))
        .collect()
}

fn convert_block<'a>(node: &'a AstNode<'a>, lifted: &HeadingAttributes) -> Option<Block> {
    let value = node.data.borrow().value.clone();
    let block = match value {
        NodeValue::Paragraph => Block::Paragraph(convert_inlines(node)),

        NodeValue::Heading(heading) => {
            let start = node.data.borrow().sourcepos.start.line;
            let attributes = lifted.get(&start).cloned().unwrap_or_default();
            Block::Heading(Heading::new(heading.level, attributes, convert_inlines(node)))
        }

        NodeValue::BlockQuote => Block::BlockQuote(convert_blocks(node, lifted)),

        NodeValue::List(list) => Block::List(List {
            ordered: list.list_type == ListType::Ordered,
            start: list.start,
            tight: list.tight,
            items: node
                .children()
                .map(|item| ListItem {
                    children: convert_blocks(item, lifted),
                })
                .collect(),
        }),

        NodeValue::CodeBlock(code_block) => {
            let language = code_block
                .info
                .split_whitespace()
                .next()
                .map(str::to_string);
            Block::CodeBlock(CodeBlock {
                language,
                content: code_block.literal,
            })
        }

        NodeValue::HtmlBlock(html) => Block::Html(html.literal),

        NodeValue::ThematicBreak => Block::ThematicBreak,

        NodeValue::Table(table) => {
            let alignments = table
                .alignments
                .iter()
                .map(|alignment| match alignment {
                    TableAlignment::Left => TableCellAlignment::Left,
                    TableAlignment::Right => TableCellAlignment::Right,
                    TableAlignment::Center => TableCellAlignment::Center,
                    TableAlignment::None => TableCellAlignment::None,
                })
                .collect();
            let rows = node.children().filter_map(convert_table_row).collect();
            Block::Table(Table { alignments, rows })
        }

        // Front matter, footnote definitions and other extensions are not enabled
        _ => return None,
    };
    Some(block)
}

fn convert_table_row<'a>(node: &'a AstNode<'a>) -> Option<TableRow> {
    let header = match &node.data.borrow().value {
        NodeValue::TableRow(header) => *header,
        _ => return None,
    };
    Some(TableRow {
        header,
        cells: node.children().map(convert_inlines).collect(),
    })
}

fn convert_inlines<'a>(node: &'a AstNode<'a>) -> Vec<Inline> {
    let mut inlines = Vec::new();
    for child in node.children() {
        collect_inline(child, &mut inlines);
    }
    inlines
}

fn collect_inline<'a>(node: &'a AstNode<'a>, inlines: &mut Vec<Inline>) {
    let value = node.data.borrow().value.clone();
    match value {
        NodeValue::Text(text) => push_text(inlines, &text),
        // Every line break inside a paragraph is a hard break
        NodeValue::SoftBreak | NodeValue::LineBreak => inlines.push(Inline::LineBreak),
        NodeValue::Code(code) => inlines.push(Inline::Code(code.literal)),
        NodeValue::HtmlInline(html) => inlines.push(Inline::Html(html)),
        NodeValue::Emph => inlines.push(Inline::Emphasis(convert_inlines(node))),
        NodeValue::Strong => inlines.push(Inline::Strong(convert_inlines(node))),
        NodeValue::Strikethrough => inlines.push(Inline::Strikethrough(convert_inlines(node))),
        NodeValue::Link(link) => inlines.push(Inline::Link(Link {
            url: link.url,
            title: non_empty(link.title),
            attributes: Attributes::new(),
            content: convert_inlines(node),
        })),
        NodeValue::Image(link) => inlines.push(Inline::Image(Image {
            src: link.url,
            alt: plain_text(&convert_inlines(node)),
            title: non_empty(link.title),
        })),
        _ => {
            for child in node.children() {
                collect_inline(child, inlines);
            }
        }
    }
}

/// Append text, merging with a preceding text run.
fn push_text(inlines: &mut Vec<Inline>, text: &str) {
    if let Some(Inline::Text(previous)) = inlines.last_mut() {
        previous.push_str(text);
    } else {
        inlines.push(Inline::Text(text.to_string()));
    }
}

fn non_empty(value: String) -> Option<String> {
    (!value.is_empty()).then_some(value)
}
