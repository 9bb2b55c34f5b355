//! Crate-level error type
//!
//! Every failure mode of the check pipeline folds into [`FontCheckError`].
//! Nothing is recovered locally: an error aborts the whole run, and the CLI
//! turns it into a structured error payload using [`FontCheckError::kind`].

use crate::parser::ParseError;
use std::path::PathBuf;
use thiserror::Error;

/// Unified error type for font check operations
#[derive(Debug, Error)]
pub enum FontCheckError {
    /// The caller's invocation was invalid (e.g. no input path)
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A filesystem read failed
    #[error("cannot read '{path}': {source}")]
    Io {
        /// Path that failed to read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The input file is not a valid ASS document
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// The font pool could not be constructed
    #[error("font pool error: {0}")]
    FontPool(String),
}

impl FontCheckError {
    /// Stable machine-readable error kind for structured output
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "invalid_input",
            Self::Io { .. } => "io",
            Self::Parse(_) => "parse",
            Self::FontPool(_) => "font_pool",
        }
    }
}
