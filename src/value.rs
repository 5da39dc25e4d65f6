//! Host-native values produced by the loader and consumed by the dumper.

use std::{cell::RefCell, rc::Rc};

use chrono::{DateTime, Utc};
use indexmap::{IndexMap, IndexSet};
use ordered_float::OrderedFloat;

/// A generic host-native value.
///
/// This is the primary container for everything the marshalling layer
/// can express: scalars (null, booleans, integers, floats, strings,
/// byte blobs, timestamps) and containers (sequences, key-unique
/// mappings, ordered pair sequences, sets).
///
/// Strings, byte blobs and containers are reference-counted, so shared
/// occurrences carry an identity: cloning a `Value` shares the payload,
/// and [`Value::identity`] tells two occurrences of the same allocation
/// apart from two equal copies. This is what lets cycles and shared
/// substructure survive a round trip.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Absence of a value.
    Null,
    /// A boolean.
    Bool(bool),
    /// A 64-bit signed integer.
    Int(i64),
    /// A 64-bit floating-point number.
    Float(f64),
    /// A shared immutable string.
    Str(Rc<str>),
    /// A shared immutable byte blob.
    Bytes(Rc<[u8]>),
    /// A UTC timestamp with microsecond precision.
    Timestamp(DateTime<Utc>),
    /// An ordered sequence.
    Seq(Rc<RefCell<Vec<Value>>>),
    /// An insertion-ordered, key-unique mapping.
    Map(Rc<RefCell<IndexMap<ScalarKey, Value>>>),
    /// An ordered pair sequence (omap/pairs, and the fallback form for
    /// mappings whose keys collide or are not hashable).
    Pairs(Rc<RefCell<Vec<(Value, Value)>>>),
    /// An insertion-ordered set.
    Set(Rc<RefCell<IndexSet<ScalarKey>>>),
}

/// The hashable subset of [`Value`], used as mapping keys and set
/// members. A container has no `ScalarKey` form; that is exactly what
/// "unhashable key" means in this crate.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ScalarKey {
    Null,
    Bool(bool),
    Int(i64),
    Float(OrderedFloat<f64>),
    Str(Rc<str>),
    Bytes(Rc<[u8]>),
    Timestamp(DateTime<Utc>),
}

/// Runtime shape of a [`Value`], the dispatch key of the dump side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    Null,
    Bool,
    Int,
    Float,
    Str,
    Bytes,
    Timestamp,
    Seq,
    Map,
    Pairs,
    Set,
}

impl Shape {
    pub fn name(&self) -> &'static str {
        match self {
            Shape::Null => "null",
            Shape::Bool => "bool",
            Shape::Int => "int",
            Shape::Float => "float",
            Shape::Str => "str",
            Shape::Bytes => "bytes",
            Shape::Timestamp => "timestamp",
            Shape::Seq => "seq",
            Shape::Map => "map",
            Shape::Pairs => "pairs",
            Shape::Set => "set",
        }
    }
}

impl Value {
    /// A shared string value.
    pub fn string(s: impl AsRef<str>) -> Value {
        Value::Str(Rc::from(s.as_ref()))
    }

    /// A shared byte-blob value.
    pub fn bytes(b: impl AsRef<[u8]>) -> Value {
        Value::Bytes(Rc::from(b.as_ref()))
    }

    /// A fresh sequence container.
    pub fn seq(items: Vec<Value>) -> Value {
        Value::Seq(Rc::new(RefCell::new(items)))
    }

    /// A fresh mapping container. Later duplicates of a key overwrite
    /// earlier ones.
    pub fn map(entries: Vec<(ScalarKey, Value)>) -> Value {
        Value::Map(Rc::new(RefCell::new(entries.into_iter().collect())))
    }

    /// A fresh ordered pair-sequence container.
    pub fn pairs(entries: Vec<(Value, Value)>) -> Value {
        Value::Pairs(Rc::new(RefCell::new(entries)))
    }

    /// A fresh set container. Duplicate members collapse.
    pub fn set(members: Vec<ScalarKey>) -> Value {
        Value::Set(Rc::new(RefCell::new(members.into_iter().collect())))
    }

    pub fn shape(&self) -> Shape {
        match self {
            Value::Null => Shape::Null,
            Value::Bool(_) => Shape::Bool,
            Value::Int(_) => Shape::Int,
            Value::Float(_) => Shape::Float,
            Value::Str(_) => Shape::Str,
            Value::Bytes(_) => Shape::Bytes,
            Value::Timestamp(_) => Shape::Timestamp,
            Value::Seq(_) => Shape::Seq,
            Value::Map(_) => Shape::Map,
            Value::Pairs(_) => Shape::Pairs,
            Value::Set(_) => Shape::Set,
        }
    }

    /// The allocation identity of this value, if it has one.
    ///
    /// Plain scalars (`Null`, `Bool`, `Int`, `Float`, `Timestamp`) are
    /// copies without identity and return `None`.
    pub fn identity(&self) -> Option<usize> {
        match self {
            Value::Str(s) => Some(Rc::as_ptr(s) as *const u8 as usize),
            Value::Bytes(b) => Some(Rc::as_ptr(b) as *const u8 as usize),
            Value::Seq(rc) => Some(Rc::as_ptr(rc) as usize),
            Value::Map(rc) => Some(Rc::as_ptr(rc) as usize),
            Value::Pairs(rc) => Some(Rc::as_ptr(rc) as usize),
            Value::Set(rc) => Some(Rc::as_ptr(rc) as usize),
            _ => None,
        }
    }

    /// The hashable key form of this value, or `None` for containers.
    pub fn as_key(&self) -> Option<ScalarKey> {
        match self {
            Value::Null => Some(ScalarKey::Null),
            Value::Bool(b) => Some(ScalarKey::Bool(*b)),
            Value::Int(i) => Some(ScalarKey::Int(*i)),
            Value::Float(f) => Some(ScalarKey::Float(OrderedFloat(*f))),
            Value::Str(s) => Some(ScalarKey::Str(s.clone())),
            Value::Bytes(b) => Some(ScalarKey::Bytes(b.clone())),
            Value::Timestamp(t) => Some(ScalarKey::Timestamp(*t)),
            _ => None,
        }
    }
}

impl ScalarKey {
    pub fn into_value(self) -> Value {
        match self {
            ScalarKey::Null => Value::Null,
            ScalarKey::Bool(b) => Value::Bool(b),
            ScalarKey::Int(i) => Value::Int(i),
            ScalarKey::Float(f) => Value::Float(f.into_inner()),
            ScalarKey::Str(s) => Value::Str(s),
            ScalarKey::Bytes(b) => Value::Bytes(b),
            ScalarKey::Timestamp(t) => Value::Timestamp(t),
        }
    }

    pub fn to_value(&self) -> Value {
        self.clone().into_value()
    }
}

impl From<&str> for ScalarKey {
    fn from(s: &str) -> Self {
        ScalarKey::Str(Rc::from(s))
    }
}
