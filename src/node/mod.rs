//! Generic tagged node tree and the seams to the text engine.
//!
//! - [`tree`] — the node shapes: [`Node`], [`NodeBody`], [`NodeRef`],
//!   [`NodeId`] pointer identity.
//! - [`stream`] — [`NodeSource`]/[`NodeSink`] traits plus the in-memory
//!   [`TreeSource`] and [`VecSink`].
//!
//! This is the sole contract the text engine and the marshalling core
//! agree on.

pub mod stream;
pub mod tree;

pub use stream::{NodeSink, NodeSource, TreeSource, VecSink};
pub use tree::{tagged, Node, NodeBody, NodeId, NodeKind, NodeRef};
