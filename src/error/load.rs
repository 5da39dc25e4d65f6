use thiserror::Error;

use super::SyntaxError;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    #[error("Malformed scalar for tag {tag}: {detail}")]
    MalformedScalar { tag: String, detail: String },

    #[error("Unexpected shape for tag {tag}: expected {expected}")]
    UnexpectedShape { tag: String, expected: &'static str },

    #[error("Malformed mapping: {0}")]
    MalformedMapping(String),

    #[error("Nesting depth exceeds limit ({0})")]
    DepthExceeded(usize),

    #[error("Constructor for tag {tag} failed: {detail}")]
    Construct { tag: String, detail: String },
}
