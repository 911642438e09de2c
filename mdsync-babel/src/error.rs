//! Error types for conversion operations

use std::fmt;

/// Errors that can occur while converting between markdown and HTML.
///
/// Malformed input is never an error on its own: both pipelines degrade
/// gracefully. These variants only cover failures inside the parsing and
/// rendering libraries, which are surfaced unchanged.
#[derive(Debug, Clone, PartialEq)]
pub enum FormatError {
    /// The input could not be read into a tree
    ParseError(String),
    /// The output writer failed or produced invalid UTF-8
    SerializationError(String),
    /// The requested source/target pair has no pipeline
    UnsupportedConversion(String),
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::ParseError(msg) => write!(f, "Parse error: {msg}"),
            FormatError::SerializationError(msg) => write!(f, "Serialization error: {msg}"),
            FormatError::UnsupportedConversion(msg) => {
                write!(f, "Conversion not supported: {msg}")
            }
        }
    }
}

impl std::error::Error for FormatError {}
