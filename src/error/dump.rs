use thiserror::Error;

#[derive(Debug, Error)]
pub enum DumpError {
    #[error("Invalid sink: {0}")]
    InvalidSink(String),

    #[error("Sink failure: {0}")]
    Sink(String),

    #[error("Representer for {shape} failed: {detail}")]
    Represent { shape: String, detail: String },

    #[error("Nesting depth exceeds limit ({0})")]
    DepthExceeded(usize),
}
