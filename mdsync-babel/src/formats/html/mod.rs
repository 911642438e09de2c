//! HTML format implementation
//!
//! This module implements bidirectional conversion between the IR and HTML fragments.
//!
//! # Library Choice
//!
//! Import uses the `html5ever` + `markup5ever_rcdom` pair:
//! - `html5ever`: Browser-grade HTML5 parser from the Servo project
//! - `markup5ever_rcdom`: Reference-counted DOM tree implementation
//!
//! It handles malformed HTML the way browsers do, so remote fragments with unclosed tags or
//! stray text still produce a usable tree.
//!
//! Export builds a comrak tree and prints it with `comrak::format_html` rather than going
//! through a DOM serializer: raw HTML blocks from the markup have to be emitted untouched,
//! which a DOM round trip would normalise, and links and images must be percent-encoded
//! exactly as comrak encodes them.
//!
//! # Element Mapping Table
//!
//! | IR Element       | HTML Equivalent                         | Export Notes                       | Import Notes                                 |
//! |------------------|-----------------------------------------|------------------------------------|----------------------------------------------|
//! | Paragraph        | `<p>`                                   | Direct mapping                     | Loose inline content is wrapped too          |
//! | Heading          | `<h1>`…`<h6>` + attributes              | Attributes in declared order       | All attributes kept                          |
//! | Container        | `<div … data-fence="N">`                | Marker counts containers, from 0   | All attributes kept, marker included         |
//! | List / ListItem  | `<ul>`/`<ol start>` + `<li>`            | Tight items have no `<p>`          | Loose when any item holds a `<p>`            |
//! | CodeBlock        | `<pre><code class="language-x">`        | Content escaped                    | Language from `language-*` class             |
//! | Table            | `<table>` `<thead>` `<tbody>`           | First row is the header            | `align` or `text-align` style                |
//! | BlockQuote       | `<blockquote>`                          | Direct mapping                     | Direct mapping                               |
//! | ThematicBreak    | `<hr />`                                | Direct mapping                     | Direct mapping                               |
//! | Html             | Raw HTML                                | Passed through unescaped           | Never produced                               |
//! | Inline:          |                                         |                                    |                                              |
//! |   Strong         | `<strong>`                              | Semantic tag                       | Parse both strong and b                      |
//! |   Emphasis       | `<em>`                                  | Semantic tag                       | Parse both em and i                          |
//! |   Strikethrough  | `<del>`                                 | Semantic tag                       | Parse del, s and strike                      |
//! |   Link           | `<a href title …>`                      | href percent-encoded, then extras  | Extra attributes kept                        |
//! |   Image          | `<img src alt title />`                 | src percent-encoded                | Direct mapping                               |
//! |   LineBreak      | `<br />`                                | Every markup line break            | Direct mapping                               |
//!
//! # Trust Boundary
//!
//! Markup is authored by a trusted local user. Raw HTML in it is passed through as is and
//! the export is not a sanitizer; do not feed it untrusted input and serve the result.
//!
//! # Lossy Conversions
//!
//! - Whitespace is normalised the way a browser renders it
//! - `<span>`, `<u>`, `<sup>` and other unmapped inline elements keep only their text
//! - Comments, scripts and styles are dropped
//! - A `<div>` in inline context (inside a `<p>`, `<td>` or `<li>` text run) is flattened
//!   into the surrounding inlines and its attributes are dropped; only block-level divs
//!   become containers
//! - A table without a header row gets its first row promoted to the header on export

mod parser;
mod serializer;

pub use parser::parse_from_html;
pub use serializer::serialize_to_html;

use crate::error::FormatError;
use crate::format::Format;
use crate::ir::nodes::Document;

/// Format implementation for HTML fragments
#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlFormat;

impl Format for HtmlFormat {
    fn name(&self) -> &str {
        "html"
    }

    fn description(&self) -> &str {
        "HTML fragment"
    }

    fn file_extensions(&self) -> &[&str] {
        &["html", "htm"]
    }

    fn parse(&self, source: &str) -> Result<Document, FormatError> {
        parser::parse_from_html(source)
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        serializer::serialize_to_html(doc)
    }
}
