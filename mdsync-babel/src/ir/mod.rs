//! Intermediate Representation (IR) for mdsync documents.
//!
//! Both pipelines meet here: markup is read into these nodes and rendered as HTML, and HTML
//! is read into the same nodes and rendered as markup. Unlike the comrak AST, the IR carries
//! ordered attribute lists on headings, containers and links.

pub mod nodes;
