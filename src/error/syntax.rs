use thiserror::Error;

/// Error reported by the text engine while scanning a document.
///
/// The marshalling core never produces this itself; it only surfaces it
/// unchanged through [`LoadError::Syntax`](super::LoadError).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("syntax error at line {line}, column {column}: {message}")]
pub struct SyntaxError {
    pub message: String,
    pub line: usize,
    pub column: usize,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            message: message.into(),
            line,
            column,
        }
    }
}
