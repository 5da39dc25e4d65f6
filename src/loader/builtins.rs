//! Builtin decode table.
//!
//! Every entry receives the node and its fully-converted structural
//! value and produces the final value. The exact lexical rules live in
//! the `codec` modules; this file only wires them to tags.

use std::{cell::RefCell, rc::Rc};

use indexmap::IndexSet;

use crate::{
    codec::{binary, scalar, tags, timestamp},
    error::LoadError,
    node::Node,
    registry::ConstructorRegistry,
    value::{ScalarKey, Value},
};

/// Returns a registry pre-populated with every builtin type.
pub fn registry() -> ConstructorRegistry {
    let mut reg = ConstructorRegistry::new();
    install(&mut reg);
    reg
}

/// Installs the builtin decode table into `reg`.
pub fn install(reg: &mut ConstructorRegistry) {
    reg.register(tags::NULL, |_, _| Ok(Value::Null));
    reg.register(tags::BOOL_YES, |_, _| Ok(Value::Bool(true)));
    reg.register(tags::BOOL_NO, |_, _| Ok(Value::Bool(false)));
    reg.register(tags::BOOL, |_, v| {
        let text = scalar_text(&v, tags::BOOL)?;
        Ok(Value::Bool(scalar::parse_bool(text, tags::BOOL)?))
    });

    reg.register(tags::INT, int_decoder(tags::INT, 10));
    reg.register(tags::INT_HEX, int_decoder(tags::INT_HEX, 16));
    reg.register(tags::INT_OCT, int_decoder(tags::INT_OCT, 8));
    reg.register(tags::INT_BASE60, |_, v| {
        let text = scalar_text(&v, tags::INT_BASE60)?;
        Ok(Value::Int(scalar::parse_base60_int(text, tags::INT_BASE60)?))
    });

    reg.register(tags::FLOAT, float_decoder(tags::FLOAT));
    reg.register(tags::FLOAT_FIX, float_decoder(tags::FLOAT_FIX));
    reg.register(tags::FLOAT_EXP, float_decoder(tags::FLOAT_EXP));
    reg.register(tags::FLOAT_BASE60, |_, v| {
        let text = scalar_text(&v, tags::FLOAT_BASE60)?;
        Ok(Value::Float(scalar::parse_base60_float(
            text,
            tags::FLOAT_BASE60,
        )?))
    });
    reg.register(tags::FLOAT_INF, |_, _| Ok(Value::Float(f64::INFINITY)));
    reg.register(tags::FLOAT_NEGINF, |_, _| Ok(Value::Float(f64::NEG_INFINITY)));
    reg.register(tags::FLOAT_NAN, |_, _| Ok(Value::Float(f64::NAN)));

    reg.register(tags::BINARY, |_, v| {
        let text = scalar_text(&v, tags::BINARY)?;
        Ok(Value::Bytes(Rc::from(binary::decode(text, tags::BINARY)?)))
    });

    reg.register(tags::TIMESTAMP, timestamp_decoder(tags::TIMESTAMP));
    reg.register(tags::TIMESTAMP_YMD, timestamp_decoder(tags::TIMESTAMP_YMD));
    reg.register(
        tags::TIMESTAMP_ISO8601,
        timestamp_decoder(tags::TIMESTAMP_ISO8601),
    );
    reg.register(
        tags::TIMESTAMP_SPACED,
        timestamp_decoder(tags::TIMESTAMP_SPACED),
    );

    // Structural identities. The merge directive itself is resolved
    // during mapping construction; a standalone merge node degrades to
    // its structural value.
    reg.register(tags::STR, |_, v| Ok(v));
    reg.register(tags::SEQ, |_, v| Ok(v));
    reg.register(tags::MAP, |_, v| Ok(v));
    reg.register(tags::MERGE, |_, v| Ok(v));

    reg.register(tags::OMAP, |_, v| flatten_pairs(v, tags::OMAP));
    reg.register(tags::PAIRS, |_, v| flatten_pairs(v, tags::PAIRS));
    reg.register(tags::SET, |_, v| construct_set(v));
}

fn scalar_text<'a>(structural: &'a Value, tag: &'static str) -> Result<&'a str, LoadError> {
    match structural {
        Value::Str(text) => Ok(text),
        _ => Err(LoadError::UnexpectedShape {
            tag: tag.to_string(),
            expected: "scalar",
        }),
    }
}

fn int_decoder(
    tag: &'static str,
    radix: u32,
) -> impl Fn(&Node, Value) -> Result<Value, LoadError> {
    move |_, v| {
        let text = scalar_text(&v, tag)?;
        Ok(Value::Int(scalar::parse_int(text, radix, tag)?))
    }
}

fn float_decoder(tag: &'static str) -> impl Fn(&Node, Value) -> Result<Value, LoadError> {
    move |_, v| {
        let text = scalar_text(&v, tag)?;
        Ok(Value::Float(scalar::parse_float(text, tag)?))
    }
}

fn timestamp_decoder(tag: &'static str) -> impl Fn(&Node, Value) -> Result<Value, LoadError> {
    move |_, v| {
        let text = scalar_text(&v, tag)?;
        Ok(Value::Timestamp(timestamp::parse(text, tag)?))
    }
}

/// Flattens a sequence of mappings into an ordered pair sequence,
/// preserving duplicate keys in document order.
fn flatten_pairs(structural: Value, tag: &'static str) -> Result<Value, LoadError> {
    let items = match structural {
        Value::Seq(items) => items,
        _ => {
            return Err(LoadError::UnexpectedShape {
                tag: tag.to_string(),
                expected: "sequence of mappings",
            })
        }
    };
    let mut out = Vec::new();
    for item in items.borrow().iter() {
        match item {
            Value::Map(entries) => {
                for (key, value) in entries.borrow().iter() {
                    out.push((key.to_value(), value.clone()));
                }
            }
            _ => {
                return Err(LoadError::UnexpectedShape {
                    tag: tag.to_string(),
                    expected: "sequence of mappings",
                })
            }
        }
    }
    Ok(Value::pairs(out))
}

/// A set is a mapping whose values are discarded.
fn construct_set(structural: Value) -> Result<Value, LoadError> {
    match structural {
        Value::Map(entries) => {
            let members: IndexSet<ScalarKey> = entries.borrow().keys().cloned().collect();
            Ok(Value::Set(Rc::new(RefCell::new(members))))
        }
        _ => Err(LoadError::UnexpectedShape {
            tag: tags::SET.to_string(),
            expected: "mapping",
        }),
    }
}
