//! Decode-side type tag registry.

use std::collections::HashMap;

use crate::{codec::tags, error::LoadError, node::Node, value::Value};

/// Decode function: receives the node and its fully-converted structural
/// value, returns the final value.
pub type ConstructFn = Box<dyn Fn(&Node, Value) -> Result<Value, LoadError>>;

/// Exact-string mapping from tag to decode function.
///
/// Populated during setup, then moved into a [`Loader`](crate::Loader);
/// nothing can register while a conversion is running.
#[derive(Default)]
pub struct ConstructorRegistry {
    tags: HashMap<String, ConstructFn>,
}

impl ConstructorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `construct` under an exact tag string.
    pub fn register<F>(&mut self, tag: impl Into<String>, construct: F)
    where
        F: Fn(&Node, Value) -> Result<Value, LoadError> + 'static,
    {
        self.tags.insert(tag.into(), Box::new(construct));
    }

    /// Registers under `tag:yaml.org,2002:<short>`.
    pub fn register_builtin<F>(&mut self, short: &str, construct: F)
    where
        F: Fn(&Node, Value) -> Result<Value, LoadError> + 'static,
    {
        self.register(tags::builtin(short), construct);
    }

    /// Registers under `tag:<domain>:<short>`.
    pub fn register_domain<F>(&mut self, domain: &str, short: &str, construct: F)
    where
        F: Fn(&Node, Value) -> Result<Value, LoadError> + 'static,
    {
        self.register(tags::domain(domain, short), construct);
    }

    /// Registers under `x-private:<short>`.
    pub fn register_private<F>(&mut self, short: &str, construct: F)
    where
        F: Fn(&Node, Value) -> Result<Value, LoadError> + 'static,
    {
        self.register(tags::private(short), construct);
    }

    /// Exact-string lookup. A miss is not an error; the caller passes
    /// the structural value through unchanged.
    pub fn resolve(&self, tag: &str) -> Option<&ConstructFn> {
        self.tags.get(tag)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}
