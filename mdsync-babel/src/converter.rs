//! The conversion service
//!
//! [`Converter`] exposes the two pipelines as operations of one value. Both are pure: every
//! call builds and drops its own trees, so a single converter can be shared across threads.

use crate::error::FormatError;
use crate::format::{DocumentFormat, Format};
use crate::formats::{HtmlFormat, MarkdownFormat};
use crate::transforms::apply_link_safety;
use serde::{Deserialize, Serialize};

/// Options fixed when the converter is built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvertOptions {
    /// Add `target="_blank"` and `rel="noopener noreferrer"` to outbound links in HTML output
    #[serde(default)]
    pub link_target_blank: bool,
}

/// Converts between markup and HTML.
#[derive(Debug, Clone, Default)]
pub struct Converter {
    options: ConvertOptions,
}

impl Converter {
    pub fn new(options: ConvertOptions) -> Self {
        Self { options }
    }

    /// Render markup to an HTML fragment.
    ///
    /// Malformed markup is never an error; the only failures come from the rendering
    /// libraries. On error no partial output is returned.
    pub fn render_to_html(&self, markup: &str) -> Result<String, FormatError> {
        let mut doc = MarkdownFormat.parse(markup)?;
        if self.options.link_target_blank {
            apply_link_safety(&mut doc);
        }
        HtmlFormat.serialize(&doc)
    }

    /// Render an HTML fragment or document back to markup.
    ///
    /// `<div>` elements become fenced containers and headings keep their attributes as a
    /// trailing `{...}` list. The result is trimmed.
    pub fn render_to_markdown(&self, html: &str) -> Result<String, FormatError> {
        let doc = HtmlFormat.parse(html)?;
        MarkdownFormat.serialize(&doc)
    }

    /// Convert between two formats by name.
    pub fn convert(
        &self,
        source: &str,
        from: DocumentFormat,
        to: DocumentFormat,
    ) -> Result<String, FormatError> {
        match (from, to) {
            (DocumentFormat::Markdown, DocumentFormat::Html) => self.render_to_html(source),
            (DocumentFormat::Html, DocumentFormat::Markdown) => self.render_to_markdown(source),
            (from, to) => Err(FormatError::UnsupportedConversion(format!(
                "{from} to {to}"
            ))),
        }
    }
}
