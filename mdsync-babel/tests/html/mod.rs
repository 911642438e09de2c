//! HTML output tests
//!
//! Tests for the forward pipeline (markup → HTML).

mod containers;
mod links;
mod render;
