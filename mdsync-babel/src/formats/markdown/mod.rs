//! Markdown format implementation
//!
//! This module implements bidirectional conversion between the IR and CommonMark markup
//! extended with fenced containers and heading attribute lists.
//!
//! # Library Choice
//!
//! We use the `comrak` crate for Markdown parsing and serialization:
//! - Single crate for both parsing and serialization
//! - CommonMark compliant, with GFM tables, strikethrough and autolinks
//!
//! comrak knows neither `:::` containers nor `{...}` attribute lists. Containers are split
//! out before comrak sees the text (`fences.rs`), heading attribute lists are cut from the
//! raw heading line before the final comrak pass, and on export both are written by the
//! rules in `rules.rs`.
//!
//! # Element Mapping Table
//!
//! | IR Element       | Markdown Equivalent          | Export Notes                          | Import Notes                           |
//! |------------------|------------------------------|---------------------------------------|----------------------------------------|
//! | Heading          | `# Text {#id .class k=v}`    | Heading rule, notation when non-empty | Trailing list stripped from the text   |
//! | Container        | `:::{…}` … `:::`             | Container rule, marker never printed  | `:::{…}` opens, bare `:::` closes      |
//! | Paragraph        | Paragraph                    | Direct mapping                        | Direct mapping                         |
//! | List             | `-` / `1.`                   | Start number and tightness kept       | Direct mapping                         |
//! | CodeBlock        | Fenced code block            | Always fenced                         | First info word → language             |
//! | Table            | GFM pipe table               | First row is the header               | Direct mapping                         |
//! | Inline:          |                              |                                       |                                        |
//! |   LineBreak      | Newline                      | Plain newline                         | Soft and hard breaks alike             |
//! |   Link           | `[text](url "title")`        | Extra attributes dropped              | No attributes                          |
//!
//! # Lossy Conversions
//!
//! - Link attributes other than the title have no markup form
//! - Reference-style links are resolved; they do not cross container fences
//! - A paragraph line starting with `:::` is written as `\:::` so it stays text

pub mod fences;
pub mod parser;
pub mod rules;
pub mod serializer;

pub use parser::parse_from_markdown;
pub use rules::{container_rule, heading_rule};
pub use serializer::serialize_to_markdown;

use crate::error::FormatError;
use crate::format::Format;
use crate::ir::nodes::Document;

/// Format implementation for Markdown
#[derive(Debug, Default, Clone, Copy)]
pub struct MarkdownFormat;

impl Format for MarkdownFormat {
    fn name(&self) -> &str {
        "markdown"
    }

    fn description(&self) -> &str {
        "CommonMark with fenced containers and heading attributes"
    }

    fn file_extensions(&self) -> &[&str] {
        &["md", "markdown"]
    }

    fn parse(&self, source: &str) -> Result<Document, FormatError> {
        parser::parse_from_markdown(source)
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        serializer::serialize_to_markdown(doc)
    }
}
