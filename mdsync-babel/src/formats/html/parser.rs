//! HTML parsing (HTML → IR import)
//!
//! Pipeline: HTML string → html5ever RcDom → IR
//!
//! The DOM is walked depth first. Block-level elements map to IR blocks; text and inline
//! elements sitting directly inside a block container are gathered into paragraphs. Unknown
//! elements are delegated to their children, as blocks when they are block-level
//! containers (`<section>`, `<article>`, ...) and as inline content otherwise.
//!
//! Whitespace follows HTML rendering rather than source layout: runs collapse to a single
//! space, edges of paragraphs and the text around `<br>` are trimmed, and spaces at the
//! edges of emphasis or links are moved outside the delimiters so the markup stays valid.

use crate::attributes::Attributes;
use crate::error::FormatError;
use crate::ir::nodes::{
    Block, CodeBlock, Container, Document, Heading, Image, Inline, Link, List, ListItem, Table,
    TableCellAlignment, TableRow,
};
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData, RcDom};

/// Parse an HTML document or fragment into an IR document
pub fn parse_from_html(source: &str) -> Result<Document, FormatError> {
    let dom = parse_document(RcDom::default(), Default::default())
        .from_utf8()
        .read_from(&mut source.as_bytes())
        .map_err(|e| FormatError::ParseError(format!("HTML parsing failed: {e}")))?;

    let children = match find_element(&dom.document, "body") {
        Some(body) => blocks_from_children(&body),
        None => Vec::new(),
    };
    Ok(Document::new(children))
}

/// Elements whose children are read as blocks without producing a node of their own.
const TRANSPARENT_BLOCKS: &[&str] = &[
    "html",
    "body",
    "main",
    "section",
    "article",
    "header",
    "footer",
    "nav",
    "aside",
    "figure",
    "figcaption",
    "details",
    "summary",
    "dl",
    "dt",
    "dd",
    "address",
    "form",
    "fieldset",
    "center",
    "li",
];

/// Elements dropped together with their content.
const IGNORED: &[&str] = &[
    "head", "script", "style", "template", "noscript", "title", "meta", "link",
];

fn element_name(handle: &Handle) -> Option<&str> {
    match &handle.data {
        NodeData::Element { name, .. } => Some(&*name.local),
        _ => None,
    }
}

fn is_block(name: &str) -> bool {
    matches!(
        name,
        "p" | "h1"
            | "h2"
            | "h3"
            | "h4"
            | "h5"
            | "h6"
            | "div"
            | "ul"
            | "ol"
            | "pre"
            | "blockquote"
            | "hr"
            | "table"
    ) || TRANSPARENT_BLOCKS.contains(&name)
}

fn find_element(handle: &Handle, tag: &str) -> Option<Handle> {
    if element_name(handle) == Some(tag) {
        return Some(handle.clone());
    }
    handle
        .children
        .borrow()
        .iter()
        .find_map(|child| find_element(child, tag))
}

fn element_attributes(handle: &Handle) -> Attributes {
    match &handle.data {
        NodeData::Element { attrs, .. } => attrs
            .borrow()
            .iter()
            .map(|attr| (attr.name.local.to_string(), attr.value.to_string()))
            .collect(),
        _ => Attributes::new(),
    }
}

fn attribute(handle: &Handle, key: &str) -> Option<String> {
    element_attributes(handle).get(key).map(str::to_string)
}

fn text_content(handle: &Handle) -> String {
    let mut out = String::new();
    collect_text(handle, &mut out);
    out
}

fn collect_text(handle: &Handle, out: &mut String) {
    match &handle.data {
        NodeData::Text { contents } => out.push_str(&contents.borrow()),
        NodeData::Element { name, .. } if &*name.local == "br" => out.push('\n'),
        _ => {
            for child in handle.children.borrow().iter() {
                collect_text(child, out);
            }
        }
    }
}

/// Read the children of a block container, wrapping loose inline content in paragraphs.
fn blocks_from_children(handle: &Handle) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut run = InlineRun::new();
    for child in handle.children.borrow().iter() {
        match element_name(child) {
            Some(name) if IGNORED.contains(&name) => {}
            Some(name) if is_block(name) => {
                run.flush_paragraph(&mut blocks);
                blocks.extend(convert_block(child, name));
            }
            _ => run.collect(child),
        }
    }
    run.flush_paragraph(&mut blocks);
    blocks
}

fn convert_block(handle: &Handle, name: &str) -> Vec<Block> {
    let block = match name {
        "p" => {
            let inlines = inlines_from_children(handle);
            if inlines.is_empty() {
                return Vec::new();
            }
            Block::Paragraph(inlines)
        }
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
            let level = name[1..].parse().unwrap_or(1);
            Block::Heading(Heading::new(
                level,
                element_attributes(handle),
                inlines_from_children(handle),
            ))
        }
        "div" => Block::Container(Container {
            attributes: element_attributes(handle),
            children: blocks_from_children(handle),
        }),
        "ul" | "ol" => Block::List(convert_list(handle, name == "ol")),
        "pre" => Block::CodeBlock(convert_code_block(handle)),
        "blockquote" => Block::BlockQuote(blocks_from_children(handle)),
        "hr" => Block::ThematicBreak,
        "table" => match convert_table(handle) {
            Some(table) => Block::Table(table),
            None => return Vec::new(),
        },
        _ => return blocks_from_children(handle),
    };
    vec![block]
}

fn convert_list(handle: &Handle, ordered: bool) -> List {
    let start = attribute(handle, "start")
        .and_then(|start| start.trim().parse().ok())
        .unwrap_or(1);

    let mut items = Vec::new();
    let mut tight = true;
    for child in handle.children.borrow().iter() {
        match element_name(child) {
            Some("li") => {
                if child
                    .children
                    .borrow()
                    .iter()
                    .any(|grandchild| element_name(grandchild) == Some("p"))
                {
                    tight = false;
                }
                items.push(ListItem {
                    children: blocks_from_children(child),
                });
            }
            Some(name) if IGNORED.contains(&name) => {}
            Some(name) => items.push(ListItem {
                children: convert_block(child, name),
            }),
            None => {
                // Stray text between items
                let mut run = InlineRun::new();
                run.collect(child);
                let mut blocks = Vec::new();
                run.flush_paragraph(&mut blocks);
                if !blocks.is_empty() {
                    items.push(ListItem { children: blocks });
                }
            }
        }
    }

    List {
        ordered,
        start,
        tight,
        items,
    }
}

fn convert_code_block(pre: &Handle) -> CodeBlock {
    let code = pre
        .children
        .borrow()
        .iter()
        .find(|child| element_name(child) == Some("code"))
        .cloned();

    let language = code
        .iter()
        .chain(std::iter::once(pre))
        .filter_map(|handle| attribute(handle, "class"))
        .find_map(|class| {
            class
                .split_whitespace()
                .find_map(|token| token.strip_prefix("language-"))
                .map(str::to_string)
        });

    let mut content = text_content(pre);
    if !content.is_empty() && !content.ends_with('\n') {
        content.push('\n');
    }
    CodeBlock { language, content }
}

fn convert_table(handle: &Handle) -> Option<Table> {
    let mut rows = Vec::new();
    let mut alignments: Vec<TableCellAlignment> = Vec::new();
    collect_table_rows(handle, false, &mut rows, &mut alignments);

    let first = rows.first_mut()?;
    first.header = true;
    let mut table = Table { alignments, rows };

    let columns = table.num_columns();
    table
        .alignments
        .resize(columns, TableCellAlignment::default());
    for row in &mut table.rows {
        row.cells.resize(columns, Vec::new());
    }
    Some(table)
}

fn collect_table_rows(
    handle: &Handle,
    in_head: bool,
    rows: &mut Vec<TableRow>,
    alignments: &mut Vec<TableCellAlignment>,
) {
    for child in handle.children.borrow().iter() {
        match element_name(child) {
            Some("thead") => collect_table_rows(child, true, rows, alignments),
            Some("tbody") | Some("tfoot") => collect_table_rows(child, false, rows, alignments),
            Some("tr") => {
                let mut cells = Vec::new();
                let mut all_th = true;
                for cell in child.children.borrow().iter() {
                    let Some(cell_name @ ("th" | "td")) = element_name(cell) else {
                        continue;
                    };
                    all_th &= cell_name == "th";
                    if rows.is_empty() {
                        alignments.push(cell_alignment(cell));
                    }
                    cells.push(inlines_from_children(cell));
                }
                if cells.is_empty() {
                    continue;
                }
                // Only a leading row can be the header
                let header = rows.is_empty() && (in_head || all_th);
                rows.push(TableRow { header, cells });
            }
            _ => {}
        }
    }
}

fn cell_alignment(cell: &Handle) -> TableCellAlignment {
    if let Some(align) = attribute(cell, "align") {
        return TableCellAlignment::from_name(&align);
    }
    attribute(cell, "style")
        .and_then(|style| {
            style.split(';').find_map(|declaration| {
                let (property, value) = declaration.split_once(':')?;
                (property.trim().eq_ignore_ascii_case("text-align"))
                    .then(|| TableCellAlignment::from_name(value))
            })
        })
        .unwrap_or_default()
}

fn inlines_from_children(handle: &Handle) -> Vec<Inline> {
    let mut run = InlineRun::new();
    for child in handle.children.borrow().iter() {
        run.collect(child);
    }
    run.finish()
}

/// Accumulates inline content while collapsing whitespace.
///
/// A whitespace run becomes a single pending space that is only written once more visible
/// content follows, so trailing whitespace and whitespace before `<br>` vanish.
struct InlineRun {
    inlines: Vec<Inline>,
    pending_space: bool,
    at_start: bool,
}

impl InlineRun {
    fn new() -> Self {
        Self {
            inlines: Vec::new(),
            pending_space: false,
            at_start: true,
        }
    }

    fn collect(&mut self, handle: &Handle) {
        let mut inlines = std::mem::take(&mut self.inlines);
        self.collect_into(handle, &mut inlines);
        self.inlines = inlines;
    }

    fn collect_into(&mut self, handle: &Handle, out: &mut Vec<Inline>) {
        let name = match &handle.data {
            NodeData::Text { contents } => {
                self.text(&contents.borrow(), out);
                return;
            }
            NodeData::Element { name, .. } => &*name.local,
            _ => return,
        };

        match name {
            _ if IGNORED.contains(&name) => {}
            "br" => {
                self.pending_space = false;
                self.at_start = true;
                out.push(Inline::LineBreak);
            }
            "strong" | "b" => out.push(Inline::Strong(self.children(handle))),
            "em" | "i" => out.push(Inline::Emphasis(self.children(handle))),
            "del" | "s" | "strike" => out.push(Inline::Strikethrough(self.children(handle))),
            "code" => {
                let code = collapse_whitespace(&text_content(handle));
                if !code.trim().is_empty() {
                    self.visible(out);
                    out.push(Inline::Code(code));
                }
            }
            "a" => {
                let mut attributes = element_attributes(handle);
                let url = attributes.remove("href").unwrap_or_default();
                let title = attributes.remove("title");
                let content = self.children(handle);
                out.push(Inline::Link(Link {
                    url,
                    title,
                    attributes,
                    content,
                }));
            }
            "img" => {
                let attributes = element_attributes(handle);
                self.visible(out);
                out.push(Inline::Image(Image {
                    src: attributes.get("src").unwrap_or_default().to_string(),
                    alt: attributes.get("alt").unwrap_or_default().to_string(),
                    title: attributes.get("title").map(str::to_string),
                }));
            }
            _ => {
                // Block elements met in inline context still separate their words
                let block = is_block(name);
                if block && !self.at_start {
                    self.pending_space = true;
                }
                for child in handle.children.borrow().iter() {
                    self.collect_into(child, out);
                }
                if block && !self.at_start {
                    self.pending_space = true;
                }
            }
        }
    }

    fn children(&mut self, handle: &Handle) -> Vec<Inline> {
        let mut inner = Vec::new();
        for child in handle.children.borrow().iter() {
            self.collect_into(child, &mut inner);
        }
        inner
    }

    fn text(&mut self, text: &str, out: &mut Vec<Inline>) {
        let mut buffer = String::new();
        for c in text.chars() {
            if c.is_whitespace() {
                if !self.at_start {
                    self.pending_space = true;
                }
                continue;
            }
            if self.pending_space {
                buffer.push(' ');
                self.pending_space = false;
            }
            buffer.push(c);
            self.at_start = false;
        }
        if !buffer.is_empty() {
            push_text(out, &buffer);
        }
    }

    /// Write the pending space ahead of non-text visible content.
    fn visible(&mut self, out: &mut Vec<Inline>) {
        if self.pending_space {
            push_text(out, " ");
            self.pending_space = false;
        }
        self.at_start = false;
    }

    fn finish(mut self) -> Vec<Inline> {
        let mut inlines = tidy(std::mem::take(&mut self.inlines));
        while matches!(inlines.last(), Some(Inline::LineBreak)) {
            inlines.pop();
        }
        inlines
    }

    fn flush_paragraph(&mut self, blocks: &mut Vec<Block>) {
        let run = std::mem::replace(self, InlineRun::new());
        let inlines = run.finish();
        if !inlines.is_empty() {
            blocks.push(Block::Paragraph(inlines));
        }
    }
}

fn push_text(inlines: &mut Vec<Inline>, text: &str) {
    if let Some(Inline::Text(previous)) = inlines.last_mut() {
        previous.push_str(text);
    } else {
        inlines.push(Inline::Text(text.to_string()));
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Move edge spaces out of emphasis and links, drop empty emphasis, merge text runs.
fn tidy(inlines: Vec<Inline>) -> Vec<Inline> {
    let mut out = Vec::new();
    for inline in inlines {
        match inline {
            Inline::Text(text) => push_text(&mut out, &text),
            Inline::Emphasis(children) => wrap(&mut out, children, Inline::Emphasis, false),
            Inline::Strong(children) => wrap(&mut out, children, Inline::Strong, false),
            Inline::Strikethrough(children) => {
                wrap(&mut out, children, Inline::Strikethrough, false)
            }
            Inline::Link(mut link) => {
                let children = std::mem::take(&mut link.content);
                wrap(
                    &mut out,
                    children,
                    |content| Inline::Link(Link { content, ..link }),
                    true,
                )
            }
            other => out.push(other),
        }
    }
    out
}

fn wrap(
    out: &mut Vec<Inline>,
    children: Vec<Inline>,
    build: impl FnOnce(Vec<Inline>) -> Inline,
    keep_empty: bool,
) {
    let mut children = tidy(children);

    let mut leading = false;
    if let Some(Inline::Text(first)) = children.first_mut() {
        if let Some(rest) = first.strip_prefix(' ') {
            leading = true;
            *first = rest.to_string();
        }
    }
    let mut trailing = false;
    if let Some(Inline::Text(last)) = children.last_mut() {
        if let Some(rest) = last.strip_suffix(' ') {
            trailing = true;
            *last = rest.to_string();
        }
    }
    children.retain(|child| !matches!(child, Inline::Text(text) if text.is_empty()));

    if leading {
        push_text(out, " ");
    }
    if keep_empty || !children.is_empty() {
        out.push(build(children));
    }
    if trailing {
        push_text(out, " ");
    }
}
