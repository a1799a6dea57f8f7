//! Structured error records supplied by the parser.

use serde::{Deserialize, Serialize};

/// A parser-reported error position.
///
/// When a parser already knows where an error is, it passes one or more
/// `ErrorDetail`s to [`CompileError::with_errors`](crate::CompileError::with_errors).
/// The first record's row and column become the error's location, and no
/// scan of the source is needed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Line number (1-indexed)
    pub row: usize,
    /// Column, counted the same way as [`Location::column`](crate::Location::column)
    pub col: usize,
    /// What the parser found wrong at this position
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ErrorDetail {
    pub fn new(row: usize, col: usize) -> Self {
        ErrorDetail {
            row,
            col,
            message: None,
        }
    }

    /// Attach a message to this record.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn col(&self) -> usize {
        self.col
    }
}
