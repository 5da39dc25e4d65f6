//! Source and sink seams to the text engine.
//!
//! The marshalling core never touches text. It pulls finished trees from
//! a [`NodeSource`] and pushes finished trees into a [`NodeSink`]; both
//! are borrowed for the duration of one conversion call and never closed
//! or retained. [`TreeSource`] and [`VecSink`] are the in-memory
//! implementations used by tests and embeddings without a text engine.

use super::tree::NodeRef;
use crate::error::{DumpError, SyntaxError};

/// Pull side of the text engine: yields one root node per document.
pub trait NodeSource {
    /// Returns the next document root, or `None` once the source is
    /// exhausted.
    fn next_document(&mut self) -> Result<Option<NodeRef>, SyntaxError>;
}

/// In-memory source over already-built trees. One-pass and
/// non-restartable, like a real parser.
#[derive(Debug)]
pub struct TreeSource {
    docs: std::vec::IntoIter<NodeRef>,
}

impl TreeSource {
    pub fn new(docs: Vec<NodeRef>) -> Self {
        Self {
            docs: docs.into_iter(),
        }
    }

    pub fn single(doc: NodeRef) -> Self {
        Self::new(vec![doc])
    }
}

impl NodeSource for TreeSource {
    fn next_document(&mut self) -> Result<Option<NodeRef>, SyntaxError> {
        Ok(self.docs.next())
    }
}

/// Push side of the text engine: receives finished trees for emission.
pub trait NodeSink {
    /// Called exactly once per dump call, before any tree is produced.
    /// A sink that cannot accept output must fail here, so that no
    /// partial output ever exists.
    fn begin(&mut self) -> Result<(), DumpError> {
        Ok(())
    }

    /// Receives one finished document tree.
    fn emit(&mut self, node: NodeRef) -> Result<(), DumpError>;
}

/// In-memory sink that collects emitted trees.
#[derive(Debug, Default)]
pub struct VecSink {
    pub docs: Vec<NodeRef>,
}

impl VecSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl NodeSink for VecSink {
    fn emit(&mut self, node: NodeRef) -> Result<(), DumpError> {
        self.docs.push(node);
        Ok(())
    }
}
