//! Format trait definition
//!
//! This module defines the Format trait both document formats implement, and the
//! [`DocumentFormat`] selector used to pick one by name or file extension.

use crate::error::FormatError;
use crate::formats::{HtmlFormat, MarkdownFormat};
use crate::ir::nodes::Document;
use std::fmt;
use std::path::Path;

/// Trait for document formats
///
/// Implementors read their text representation into the IR and write the IR back out.
pub trait Format: Send + Sync {
    /// The name of this format (e.g., "markdown", "html")
    fn name(&self) -> &str;

    /// Optional description of this format
    fn description(&self) -> &str {
        ""
    }

    /// File extensions associated with this format, without the leading dot
    fn file_extensions(&self) -> &[&str] {
        &[]
    }

    /// Parse source text into a Document
    fn parse(&self, source: &str) -> Result<Document, FormatError>;

    /// Serialize a Document into source text
    fn serialize(&self, doc: &Document) -> Result<String, FormatError>;
}

/// The formats mdsync converts between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentFormat {
    Markdown,
    Html,
}

impl DocumentFormat {
    pub const ALL: [DocumentFormat; 2] = [DocumentFormat::Markdown, DocumentFormat::Html];

    /// The format implementation behind this selector.
    pub fn format(&self) -> &'static dyn Format {
        match self {
            DocumentFormat::Markdown => &MarkdownFormat,
            DocumentFormat::Html => &HtmlFormat,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DocumentFormat::Markdown => "markdown",
            DocumentFormat::Html => "html",
        }
    }

    /// The format on the other side of a conversion.
    pub fn counterpart(&self) -> DocumentFormat {
        match self {
            DocumentFormat::Markdown => DocumentFormat::Html,
            DocumentFormat::Html => DocumentFormat::Markdown,
        }
    }

    /// Look a format up by name or file extension (case-insensitive).
    pub fn from_name(name: &str) -> Option<DocumentFormat> {
        let name = name.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|format| {
            format.name() == name || format.format().file_extensions().contains(&name.as_str())
        })
    }

    /// Detect a format from a file path's extension.
    pub fn from_path(path: &Path) -> Option<DocumentFormat> {
        let extension = path.extension()?.to_str()?;
        let extension = extension.to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|format| format.format().file_extensions().contains(&extension.as_str()))
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
