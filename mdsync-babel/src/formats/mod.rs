//! Format implementations
//!
//! This module contains the two formats mdsync converts between. Each reads its text into
//! the IR and writes the IR back out.

pub(crate) mod common;
pub mod html;
pub mod markdown;

pub use html::HtmlFormat;
pub use markdown::MarkdownFormat;
