//! Bidirectional Markdown ↔ HTML transcoding for mdsync
//!
//!     Documentation lives in two places: a local markup file and a remote HTML page. This
//!     crate keeps the two interchangeable, preserving element ids, class lists, arbitrary
//!     attributes, nesting and link-safety attributes across the trip.
//!
//!     This is a pure lib: it powers mdsync-cli but is shell agnostic, so no code here prints,
//!     reads env vars or touches the filesystem.
//!
//! Architecture
//!
//!     Both directions go through a small IR (./ir/nodes.rs) that, unlike the comrak AST,
//!     carries ordered attribute lists on headings, containers and links.
//!
//!         Forward:  markup → fence scan → comrak AST → IR → (link pass) → HTML string
//!         Reverse:  HTML → html5ever RcDom → IR → comrak AST (+ rules) → markup
//!
//!     The two pipelines share nothing at runtime apart from the IR types and the attribute
//!     codec (./attributes.rs), which is the single source of `{...}` notation.
//!
//!     The file structure :
//!     .
//!     ├── attributes.rs           # Attribute list type and compact notation codec
//!     ├── converter.rs            # Converter service (render_to_html / render_to_markdown)
//!     ├── error.rs
//!     ├── format.rs               # Format trait and DocumentFormat selector
//!     ├── formats
//!     │   ├── html
//!     │   │   ├── parser.rs       # RcDom → IR
//!     │   │   └── serializer.rs   # IR → HTML string
//!     │   └── markdown
//!     │       ├── fences.rs       # `:::` container scanning
//!     │       ├── parser.rs       # comrak AST → IR
//!     │       ├── rules.rs        # Container and heading rules
//!     │       └── serializer.rs   # IR → comrak AST → markup
//!     ├── ir                      # Intermediate Representation
//!     ├── lib.rs
//!     └── transforms.rs           # Link-safety pass
//!
//! Testing
//!     tests
//!     ├── lib.rs
//!     ├── html                    # Markup → HTML
//!     ├── markdown                # HTML → markup
//!     └── roundtrip.rs
//!
//!     Note that rust does not by default discover tests in subdirectories, so we need to include these
//!     in the mod.
//!
//! Library Choices
//!
//!     Parsing is offloaded to specialized crates: comrak for markup (and for writing it back
//!     out), html5ever for HTML. The scope here is adapting their trees to and from the IR.

pub mod attributes;
pub mod converter;
pub mod error;
pub mod format;
pub mod formats;
pub mod ir;
pub mod transforms;

pub use attributes::{encode_attributes, Attributes, CONTAINER_MARKER};
pub use converter::{ConvertOptions, Converter};
pub use error::FormatError;
pub use format::{DocumentFormat, Format};
