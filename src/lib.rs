//! Identity-preserving marshalling between tagged node trees and native
//! value graphs.
//!
//! The crate converts in both directions around a shared tag registry:
//! a [`Loader`] turns a parsed node tree into host values, a [`Dumper`]
//! turns host values back into a tree, and both are guarded by per-call
//! identity maps so aliases, shared substructure and cycles survive the
//! round trip. The textual syntax itself lives behind the
//! [`NodeSource`]/[`NodeSink`] seams and is someone else's problem.

/// Builtin codec library: scalar lexical rules and tag constants.
pub mod codec;
/// Conversion limits and labels, with environment overrides.
pub mod config;
/// Value graph → node tree conversion.
pub mod dumper;
/// Common error types: syntax, load, dump.
pub mod error;
/// Node tree → value graph conversion.
pub mod loader;
/// Generic tagged node tree and the text-engine seams.
pub mod node;
/// Type tag registries consulted by both directions.
pub mod registry;
/// Host-native values: scalars, containers, keys, shapes.
pub mod value;

// -----------------------------------------------------------------------------
//  Frequently used public types
// -----------------------------------------------------------------------------

pub use config::MarshalConfig;
pub use dumper::Dumper;
pub use error::{DumpError, LoadError, SyntaxError};
pub use loader::{Documents, Loader};
pub use node::{
    tagged, Node, NodeBody, NodeId, NodeKind, NodeRef, NodeSink, NodeSource, TreeSource, VecSink,
};
pub use registry::{ConstructorRegistry, Rep, RepresenterRegistry};
pub use value::{ScalarKey, Shape, Value};
