//! Core data structures for the Intermediate Representation (IR).

use crate::attributes::Attributes;

/// Represents the root of a document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    pub children: Vec<Block>,
}

impl Document {
    pub fn new(children: Vec<Block>) -> Self {
        Self { children }
    }
}

/// A block-level node.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Paragraph(Vec<Inline>),
    Heading(Heading),
    Container(Container),
    List(List),
    BlockQuote(Vec<Block>),
    CodeBlock(CodeBlock),
    Table(Table),
    /// Raw HTML passed through untouched.
    Html(String),
    ThematicBreak,
}

/// Represents a heading with a specific level.
#[derive(Debug, Clone, PartialEq)]
pub struct Heading {
    level: u8,
    pub attributes: Attributes,
    pub content: Vec<Inline>,
}

impl Heading {
    /// Levels outside `1..=6` are clamped into range.
    pub fn new(level: u8, attributes: Attributes, content: Vec<Inline>) -> Self {
        Self {
            level: level.clamp(1, 6),
            attributes,
            content,
        }
    }

    pub fn level(&self) -> u8 {
        self.level
    }
}

/// A fenced `:::` container, rendered as a `<div>`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Container {
    pub attributes: Attributes,
    pub children: Vec<Block>,
}

/// Represents a list of items.
#[derive(Debug, Clone, PartialEq)]
pub struct List {
    pub ordered: bool,
    /// First number of an ordered list.
    pub start: usize,
    /// Tight lists render their paragraphs without `<p>` wrappers.
    pub tight: bool,
    pub items: Vec<ListItem>,
}

/// Represents an item in a list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListItem {
    pub children: Vec<Block>,
}

/// Represents a block of verbatim text.
#[derive(Debug, Clone, PartialEq)]
pub struct CodeBlock {
    pub language: Option<String>,
    pub content: String,
}

/// Represents a table.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub alignments: Vec<TableCellAlignment>,
    pub rows: Vec<TableRow>,
}

impl Table {
    pub fn header(&self) -> Option<&TableRow> {
        self.rows.first().filter(|row| row.header)
    }

    pub fn body(&self) -> &[TableRow] {
        match self.header() {
            Some(_) => &self.rows[1..],
            None => &self.rows,
        }
    }

    pub fn num_columns(&self) -> usize {
        self.rows
            .iter()
            .map(|row| row.cells.len())
            .chain(std::iter::once(self.alignments.len()))
            .max()
            .unwrap_or(0)
    }
}

/// Represents a table row.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub header: bool,
    pub cells: Vec<Vec<Inline>>,
}

/// Alignment of a table column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TableCellAlignment {
    Left,
    Center,
    Right,
    #[default]
    None,
}

impl TableCellAlignment {
    pub fn as_str(&self) -> Option<&'static str> {
        match self {
            TableCellAlignment::Left => Some("left"),
            TableCellAlignment::Center => Some("center"),
            TableCellAlignment::Right => Some("right"),
            TableCellAlignment::None => None,
        }
    }

    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "left" | "start" => TableCellAlignment::Left,
            "center" => TableCellAlignment::Center,
            "right" | "end" => TableCellAlignment::Right,
            _ => TableCellAlignment::None,
        }
    }
}

/// Represents inline content, such as text, emphasis, links etc.
#[derive(Debug, Clone, PartialEq)]
pub enum Inline {
    Text(String),
    Emphasis(Vec<Inline>),
    Strong(Vec<Inline>),
    Strikethrough(Vec<Inline>),
    Code(String),
    Link(Link),
    Image(Image),
    /// Raw inline HTML passed through untouched.
    Html(String),
    LineBreak,
}

/// Represents a hyperlink.
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub url: String,
    pub title: Option<String>,
    pub attributes: Attributes,
    pub content: Vec<Inline>,
}

/// Represents an image.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    pub src: String,
    pub alt: String,
    pub title: Option<String>,
}

/// Concatenated plain text of a run of inlines, as used for `alt` text.
pub fn plain_text(inlines: &[Inline]) -> String {
    let mut out = String::new();
    collect_plain_text(inlines, &mut out);
    out
}

fn collect_plain_text(inlines: &[Inline], out: &mut String) {
    for inline in inlines {
        match inline {
            Inline::Text(text) | Inline::Code(text) => out.push_str(text),
            Inline::Emphasis(children)
            | Inline::Strong(children)
            | Inline::Strikethrough(children) => collect_plain_text(children, out),
            Inline::Link(link) => collect_plain_text(&link.content, out),
            Inline::Image(image) => out.push_str(&image.alt),
            Inline::LineBreak => out.push(' '),
            Inline::Html(_) => {}
        }
    }
}
