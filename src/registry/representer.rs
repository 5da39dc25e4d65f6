//! Encode-side dispatch: an ordered override table in front of the
//! closed builtin shape dispatch.

use crate::{
    error::DumpError,
    value::{Shape, Value},
};

/// Shallow representation of one value: the node to produce, with any
/// children left as raw values for the dumper to convert.
#[derive(Debug, Clone)]
pub enum Rep {
    Scalar { text: String, tag: Option<String> },
    Seq { items: Vec<Value>, tag: Option<String> },
    Map { entries: Vec<(Value, Value)>, tag: Option<String> },
}

/// Encode function: produces the shallow representation of a value.
pub type RepresentFn = Box<dyn Fn(&Value) -> Result<Rep, DumpError>>;

/// Override table consulted before the builtin dispatch, in registration
/// order. Register the most specific shapes first; the first match wins.
///
/// Like the decode registry, this is populated during setup and then
/// moved into a [`Dumper`](crate::Dumper).
#[derive(Default)]
pub struct RepresenterRegistry {
    overrides: Vec<(Shape, RepresentFn)>,
}

impl RepresenterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an override for every value of the given shape.
    pub fn register<F>(&mut self, shape: Shape, represent: F)
    where
        F: Fn(&Value) -> Result<Rep, DumpError> + 'static,
    {
        self.overrides.push((shape, Box::new(represent)));
    }

    /// The first registered override matching the value's shape, if any.
    pub fn resolve(&self, value: &Value) -> Option<&RepresentFn> {
        let shape = value.shape();
        self.overrides
            .iter()
            .find(|(candidate, _)| *candidate == shape)
            .map(|(_, represent)| represent)
    }

    pub fn len(&self) -> usize {
        self.overrides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty()
    }
}
