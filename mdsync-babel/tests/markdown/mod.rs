//! Markdown output tests
//!
//! Tests for the reverse pipeline (HTML → markup).

mod containers;
mod headings;
mod render;
