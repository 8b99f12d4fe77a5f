//! Error type for rendering operations

use std::fmt;

/// Errors that can occur while producing HTML fragments.
///
/// The rendering core assumes a well-formed tree (the parser guarantees it),
/// so the only failure mode is the HTML serializer itself.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderError {
    Serialization(String),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::Serialization(msg) => write!(f, "Serialization error: {msg}"),
        }
    }
}

impl std::error::Error for RenderError {}
