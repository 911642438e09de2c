//! IR → comrak tree, shared by the Markdown and HTML exporters
//!
//! Standard blocks and inlines become comrak nodes and are printed by comrak itself, with
//! `format_commonmark` or `format_html`, so plain markup comes out exactly as comrak would
//! write it (hrefs percent-encoded, text escaped, tight list items without `<p>`).
//!
//! comrak has no node for headings with attribute lists, fenced containers or links with
//! extra attributes. Those are rendered here and spliced into the tree as raw HTML, which
//! both printers write out verbatim. Attribute values always go through comrak's own
//! escapers.

use crate::attributes::{split_trailing_attribute_list, CONTAINER_MARKER};
use crate::error::FormatError;
use crate::formats::markdown::rules::{container_rule, heading_rule};
use crate::ir::nodes::{Block, Container, Heading, Inline, Link, List, Table, TableCellAlignment};
use comrak::html::{escape, escape_href, write_opening_tag};
use comrak::nodes::{
    Ast, AstNode, ListDelimType, ListType, NodeCode, NodeCodeBlock, NodeHtmlBlock, NodeLink,
    NodeList, NodeTable, NodeValue, TableAlignment,
};
use comrak::{format_commonmark, format_html, Arena, ComrakOptions};
use std::borrow::Cow;
use std::cell::RefCell;
use std::io::{self, Write};

/// Which comrak printer the tree is built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Target {
    Markdown,
    Html,
}

pub(crate) struct TreeBuilder<'a> {
    arena: &'a Arena<AstNode<'a>>,
    target: Target,
    options: ComrakOptions<'static>,
    /// Next value of the container marker, counted per document
    next_fence: usize,
}

impl<'a> TreeBuilder<'a> {
    pub(crate) fn new(arena: &'a Arena<AstNode<'a>>, target: Target) -> Self {
        Self {
            arena,
            target,
            options: comrak_options(target),
            next_fence: 0,
        }
    }

    /// Format a run of blocks under a fresh document root.
    pub(crate) fn render(&mut self, blocks: &[Block]) -> Result<String, FormatError> {
        let root = self.node(NodeValue::Document);
        for block in blocks {
            self.append_block(root, block)?;
        }
        self.format(root)
    }

    fn format(&self, root: &'a AstNode<'a>) -> Result<String, FormatError> {
        let mut output = Vec::new();
        let written = match self.target {
            Target::Markdown => format_commonmark(root, &self.options, &mut output),
            Target::Html => format_html(root, &self.options, &mut output),
        };
        written.map_err(write_error)?;

        let text = String::from_utf8(output)
            .map_err(|e| FormatError::SerializationError(format!("UTF-8 conversion failed: {e}")))?;

        Ok(match self.target {
            // Remove Comrak's "end list" HTML comments which appear between consecutive lists
            Target::Markdown => text.replace("<!-- end list -->\n\n", ""),
            Target::Html => text,
        })
    }

    /// Format inline content on its own, as it would read inside a paragraph.
    fn render_inlines(&mut self, inlines: &[Inline]) -> Result<String, FormatError> {
        let root = self.node(NodeValue::Document);
        let paragraph = self.node(NodeValue::Paragraph);
        root.append(paragraph);
        self.append_inlines(paragraph, inlines, false)?;
        let text = self.format(root)?;

        Ok(match self.target {
            Target::Markdown => text.trim().replace("\\\n", " ").replace('\n', " "),
            Target::Html => {
                let text = text.trim_end_matches('\n');
                text.strip_prefix("<p>")
                    .and_then(|inner| inner.strip_suffix("</p>"))
                    .unwrap_or(text)
                    .to_string()
            }
        })
    }

    fn node(&self, value: NodeValue) -> &'a AstNode<'a> {
        self.arena
            .alloc(AstNode::new(RefCell::new(Ast::new(value, (0, 0).into()))))
    }

    fn raw_block(&self, literal: &str) -> &'a AstNode<'a> {
        self.node(NodeValue::HtmlBlock(NodeHtmlBlock {
            block_type: 0,
            literal: literal.trim_end_matches('\n').to_string(),
        }))
    }

    fn append_block(&mut self, parent: &'a AstNode<'a>, block: &Block) -> Result<(), FormatError> {
        match block {
            Block::Paragraph(inlines) => {
                let paragraph = self.node(NodeValue::Paragraph);
                parent.append(paragraph);
                self.append_paragraph_inlines(paragraph, inlines)?;
            }

            Block::Heading(heading) => self.append_heading(parent, heading)?,

            Block::Container(container) => self.append_container(parent, container)?,

            Block::List(list) => self.append_list(parent, list)?,

            Block::BlockQuote(children) => {
                let quote = self.node(NodeValue::BlockQuote);
                parent.append(quote);
                for child in children {
                    self.append_block(quote, child)?;
                }
            }

            Block::CodeBlock(code) => parent.append(self.node(NodeValue::CodeBlock(NodeCodeBlock {
                fenced: true,
                fence_char: b'`',
                fence_length: 3,
                fence_offset: 0,
                info: code.language.clone().unwrap_or_default(),
                literal: code.content.clone(),
            }))),

            Block::Table(table) => self.append_table(parent, table)?,

            Block::Html(html) => parent.append(self.raw_block(html)),

            Block::ThematicBreak => parent.append(self.node(NodeValue::ThematicBreak)),
        }
        Ok(())
    }

    fn append_heading(
        &mut self,
        parent: &'a AstNode<'a>,
        heading: &Heading,
    ) -> Result<(), FormatError> {
        let text = self.render_inlines(&heading.content)?;
        let literal = match self.target {
            Target::Markdown => heading_rule(
                heading.level(),
                &escape_trailing_list(&text),
                heading.attributes.as_slice(),
            ),
            Target::Html => {
                let tag = format!("h{}", heading.level());
                let mut open = Vec::new();
                write_opening_tag(&mut open, &tag, heading.attributes.iter()).map_err(write_error)?;
                format!("{}{text}</{tag}>", String::from_utf8_lossy(&open))
            }
        };
        parent.append(self.raw_block(&literal));
        Ok(())
    }

    fn append_container(
        &mut self,
        parent: &'a AstNode<'a>,
        container: &Container,
    ) -> Result<(), FormatError> {
        match self.target {
            Target::Markdown => {
                let inner = self.render(&container.children)?;
                let literal = container_rule(container.attributes.as_slice(), &inner);
                parent.append(self.raw_block(&literal));
            }
            Target::Html => {
                let fence = self.next_fence.to_string();
                self.next_fence += 1;

                let attributes = container
                    .attributes
                    .iter()
                    .filter(|(key, _)| *key != CONTAINER_MARKER)
                    .chain(std::iter::once((CONTAINER_MARKER, fence.as_str())));
                let mut open = Vec::new();
                write_opening_tag(&mut open, "div", attributes).map_err(write_error)?;
                parent.append(self.raw_block(&String::from_utf8_lossy(&open)));

                // Own root so paragraphs keep their <p> inside tight list items
                let body = self.node(NodeValue::Document);
                parent.append(body);
                for child in &container.children {
                    self.append_block(body, child)?;
                }
                parent.append(self.raw_block("</div>"));
            }
        }
        Ok(())
    }

    fn append_list(&mut self, parent: &'a AstNode<'a>, list: &List) -> Result<(), FormatError> {
        let node_list = NodeList {
            list_type: if list.ordered {
                ListType::Ordered
            } else {
                ListType::Bullet
            },
            marker_offset: 0,
            padding: 0,
            start: list.start,
            delimiter: ListDelimType::Period,
            bullet_char: b'-',
            tight: list.tight,
        };

        let list_node = self.node(NodeValue::List(node_list));
        parent.append(list_node);
        for item in &list.items {
            let item_node = self.node(NodeValue::Item(node_list));
            list_node.append(item_node);
            for child in &item.children {
                self.append_block(item_node, child)?;
            }
        }
        Ok(())
    }

    fn append_table(&mut self, parent: &'a AstNode<'a>, table: &Table) -> Result<(), FormatError> {
        let columns = table.num_columns();
        // comrak cannot print a table without rows or columns
        if columns == 0 || table.rows.is_empty() {
            return Ok(());
        }

        let alignments = (0..columns)
            .map(|index| match table.alignments.get(index).copied().unwrap_or_default() {
                TableCellAlignment::Left => TableAlignment::Left,
                TableCellAlignment::Right => TableAlignment::Right,
                TableCellAlignment::Center => TableAlignment::Center,
                TableCellAlignment::None => TableAlignment::None,
            })
            .collect();

        let table_node = self.node(NodeValue::Table(NodeTable {
            alignments,
            num_columns: columns,
            num_rows: table.rows.len(),
            num_nonempty_cells: 0,
        }));
        parent.append(table_node);

        for (index, row) in table.rows.iter().enumerate() {
            // GFM tables always open with a header row
            let row_node = self.node(NodeValue::TableRow(index == 0));
            table_node.append(row_node);
            for column in 0..columns {
                let cell_node = self.node(NodeValue::TableCell);
                row_node.append(cell_node);
                if let Some(cell) = row.cells.get(column) {
                    self.append_inlines(cell_node, cell, true)?;
                }
            }
        }
        Ok(())
    }

    /// Paragraph content, kept from reading back as a container fence.
    fn append_paragraph_inlines(
        &mut self,
        paragraph: &'a AstNode<'a>,
        inlines: &[Inline],
    ) -> Result<(), FormatError> {
        let mut line_start = true;
        for inline in inlines {
            if let Inline::Text(text) = inline {
                if line_start && self.target == Target::Markdown && text.starts_with(":::") {
                    paragraph.append(self.node(NodeValue::HtmlInline("\\".to_string())));
                }
            }
            self.append_inline(paragraph, inline, false)?;
            line_start = matches!(inline, Inline::LineBreak);
        }
        Ok(())
    }

    fn append_inlines(
        &mut self,
        parent: &'a AstNode<'a>,
        inlines: &[Inline],
        in_table_cell: bool,
    ) -> Result<(), FormatError> {
        for inline in inlines {
            self.append_inline(parent, inline, in_table_cell)?;
        }
        Ok(())
    }

    fn append_inline(
        &mut self,
        parent: &'a AstNode<'a>,
        inline: &Inline,
        in_table_cell: bool,
    ) -> Result<(), FormatError> {
        let wrap = |builder: &mut Self, value: NodeValue, children: &[Inline]| {
            let node = builder.node(value);
            parent.append(node);
            builder.append_inlines(node, children, in_table_cell)
        };

        match inline {
            Inline::Text(text) => parent.append(self.node(NodeValue::Text(text.clone()))),
            Inline::Emphasis(children) => wrap(self, NodeValue::Emph, children)?,
            Inline::Strong(children) => wrap(self, NodeValue::Strong, children)?,
            Inline::Strikethrough(children) => wrap(self, NodeValue::Strikethrough, children)?,
            Inline::Code(code) => parent.append(self.node(NodeValue::Code(NodeCode {
                num_backticks: 1,
                literal: code.clone(),
            }))),
            Inline::Link(link) if self.target == Target::Html && !link.attributes.is_empty() => {
                let open = link_open_tag(link).map_err(write_error)?;
                parent.append(self.node(NodeValue::HtmlInline(open)));
                self.append_inlines(parent, &link.content, in_table_cell)?;
                parent.append(self.node(NodeValue::HtmlInline("</a>".to_string())));
            }
            Inline::Link(link) => wrap(
                self,
                NodeValue::Link(NodeLink {
                    url: link.url.clone(),
                    title: link.title.clone().unwrap_or_default(),
                }),
                &link.content,
            )?,
            Inline::Image(image) => {
                let node = self.node(NodeValue::Image(NodeLink {
                    url: image.src.clone(),
                    title: image.title.clone().unwrap_or_default(),
                }));
                parent.append(node);
                node.append(self.node(NodeValue::Text(image.alt.clone())));
            }
            Inline::Html(html) => parent.append(self.node(NodeValue::HtmlInline(html.clone()))),
            // A newline would end the table row
            Inline::LineBreak if in_table_cell && self.target == Target::Markdown => {
                parent.append(self.node(NodeValue::HtmlInline("<br />".to_string())))
            }
            Inline::LineBreak => parent.append(self.node(NodeValue::LineBreak)),
        }
        Ok(())
    }
}

fn comrak_options(target: Target) -> ComrakOptions<'static> {
    let mut options = ComrakOptions::default();
    options.extension.table = true;
    options.extension.strikethrough = true;
    options.render.unsafe_ = true;
    if target == Target::Markdown {
        // Line breaks are written as plain newlines; the import side reads every one as hard
        options.render.hardbreaks = true;
        options.render.prefer_fenced = true;
    }
    options
}

fn write_error(e: io::Error) -> FormatError {
    FormatError::SerializationError(format!("Comrak serialization failed: {e}"))
}

/// Opening `<a>` tag for a link carrying attributes beyond href and title.
///
/// Written the way comrak writes links: the href percent-encoded, then the title, then the
/// remaining attributes in declared order.
fn link_open_tag(link: &Link) -> io::Result<String> {
    let mut out = Vec::new();
    out.write_all(b"<a href=\"")?;
    escape_href(&mut out, link.url.as_bytes())?;
    out.write_all(b"\"")?;
    if let Some(title) = link.title.as_deref().filter(|title| !title.is_empty()) {
        out.write_all(b" title=\"")?;
        escape(&mut out, title.as_bytes())?;
        out.write_all(b"\"")?;
    }
    for (key, value) in link
        .attributes
        .iter()
        .filter(|(key, _)| !matches!(*key, "href" | "title"))
    {
        write!(out, " {key}=\"")?;
        escape(&mut out, value.as_bytes())?;
        out.write_all(b"\"")?;
    }
    out.write_all(b">")?;
    Ok(String::from_utf8_lossy(&out).into_owned())
}

/// Keep heading text that ends like an attribute list from reading back as one.
fn escape_trailing_list(text: &str) -> Cow<'_, str> {
    if split_trailing_attribute_list(text).is_none() {
        return Cow::Borrowed(text);
    }
    let body = text.trim_end();
    match body.strip_suffix('}') {
        Some(head) => Cow::Owned(format!("{head}\\}}{}", &text[body.len()..])),
        None => Cow::Borrowed(text),
    }
}
