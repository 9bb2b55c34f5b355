//! Parser error types for ASS script parsing
//!
//! Unrecoverable failures are reported through [`ParseError`]; recoverable
//! problems (malformed data lines, stray content) are collected as
//! [`ParseIssue`]s on the parsed script so a single bad line never aborts a
//! font check.

use thiserror::Error;

/// Primary parse error type for ASS scripts
///
/// Represents unrecoverable parsing errors that prevent script construction.
/// Use [`ParseIssue`] for recoverable warnings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Input contains no recognizable ASS section at all
    #[error("input is not an ASS document: no [Script Info], [V4+ Styles] or [Events] section found")]
    NotAssDocument,

    /// Input is empty (or whitespace only)
    #[error("input is empty")]
    EmptyInput,
}

/// Recoverable problem encountered while parsing
///
/// Carries the 1-based source line and a human-readable description. Issues
/// never prevent script construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIssue {
    /// 1-based line number in the source text
    pub line: usize,
    /// Description of the problem
    pub message: String,
}

impl ParseIssue {
    pub(crate) fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }
}

impl core::fmt::Display for ParseIssue {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}
