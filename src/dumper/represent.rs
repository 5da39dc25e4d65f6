//! Builtin shape dispatch: one shallow representation per value shape.
//!
//! Mirrors the builtin decode table exactly, so a dumped tree loads back
//! to an equal graph. Children of container representations stay raw
//! values; the dumper converts them.

use crate::{
    codec::{binary, scalar, tags, timestamp},
    error::DumpError,
    registry::Rep,
    value::Value,
};

/// Produces the builtin shallow representation of `value`.
pub fn represent(value: &Value) -> Result<Rep, DumpError> {
    Ok(match value {
        Value::Null => Rep::Scalar {
            text: scalar::NULL_TEXT.to_string(),
            tag: Some(tags::NULL.to_string()),
        },
        Value::Bool(b) => Rep::Scalar {
            text: scalar::render_bool(*b),
            tag: Some(tags::BOOL.to_string()),
        },
        Value::Int(i) => Rep::Scalar {
            text: i.to_string(),
            tag: Some(tags::INT.to_string()),
        },
        Value::Float(f) => Rep::Scalar {
            text: scalar::render_float(*f),
            tag: Some(tags::FLOAT.to_string()),
        },
        Value::Str(s) => Rep::Scalar {
            text: s.to_string(),
            tag: Some(tags::STR.to_string()),
        },
        Value::Bytes(b) => Rep::Scalar {
            text: binary::encode(b),
            tag: Some(tags::BINARY.to_string()),
        },
        Value::Timestamp(t) => Rep::Scalar {
            text: timestamp::render(t),
            tag: Some(tags::TIMESTAMP.to_string()),
        },
        Value::Seq(items) => Rep::Seq {
            items: items.borrow().clone(),
            tag: Some(tags::SEQ.to_string()),
        },
        Value::Map(entries) => Rep::Map {
            entries: entries
                .borrow()
                .iter()
                .map(|(key, value)| (key.to_value(), value.clone()))
                .collect(),
            tag: Some(tags::MAP.to_string()),
        },
        // An ordered pair sequence renders as a sequence of single-entry
        // mappings, the shape the omap decoder expects back.
        Value::Pairs(entries) => {
            let entries = entries.borrow();
            let mut items = Vec::with_capacity(entries.len());
            for (key, value) in entries.iter() {
                let key = key.as_key().ok_or_else(|| DumpError::Represent {
                    shape: value.shape().name().to_string(),
                    detail: "pair key is not a scalar".to_string(),
                })?;
                items.push(Value::map(vec![(key, value.clone())]));
            }
            Rep::Seq {
                items,
                tag: Some(tags::OMAP.to_string()),
            }
        }
        // A set renders as a mapping with null values, the shape the set
        // decoder expects back.
        Value::Set(members) => Rep::Map {
            entries: members
                .borrow()
                .iter()
                .map(|member| (member.to_value(), Value::Null))
                .collect(),
            tag: Some(tags::SET.to_string()),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::ScalarKey;

    fn scalar_parts(rep: Rep) -> (String, Option<String>) {
        match rep {
            Rep::Scalar { text, tag } => (text, tag),
            other => panic!("expected a scalar representation, got {other:?}"),
        }
    }

    #[test]
    fn scalars_render_canonically() {
        assert_eq!(
            scalar_parts(represent(&Value::Null).unwrap()),
            ("~".to_string(), Some(tags::NULL.to_string()))
        );
        assert_eq!(
            scalar_parts(represent(&Value::Bool(true)).unwrap()),
            ("true".to_string(), Some(tags::BOOL.to_string()))
        );
        assert_eq!(
            scalar_parts(represent(&Value::Int(-12)).unwrap()),
            ("-12".to_string(), Some(tags::INT.to_string()))
        );
        assert_eq!(
            scalar_parts(represent(&Value::Float(f64::NEG_INFINITY)).unwrap()),
            ("-.inf".to_string(), Some(tags::FLOAT.to_string()))
        );
    }

    #[test]
    fn floats_keep_a_fractional_form() {
        let (text, _) = scalar_parts(represent(&Value::Float(1.0)).unwrap());
        assert_eq!(text, "1.0");
    }

    #[test]
    fn bytes_render_as_base64() {
        let (text, tag) = scalar_parts(represent(&Value::bytes(b"hello")).unwrap());
        assert_eq!(text, "aGVsbG8=");
        assert_eq!(tag.as_deref(), Some(tags::BINARY));
    }

    #[test]
    fn set_renders_as_null_valued_mapping() {
        let set = Value::set(vec![ScalarKey::from("a"), ScalarKey::from("b")]);
        match represent(&set).unwrap() {
            Rep::Map { entries, tag } => {
                assert_eq!(tag.as_deref(), Some(tags::SET));
                assert_eq!(entries.len(), 2);
                assert!(entries.iter().all(|(_, v)| *v == Value::Null));
            }
            other => panic!("expected a mapping representation, got {other:?}"),
        }
    }

    #[test]
    fn pairs_render_as_single_entry_mappings_under_omap() {
        let pairs = Value::pairs(vec![
            (Value::string("a"), Value::Int(1)),
            (Value::string("a"), Value::Int(2)),
        ]);
        match represent(&pairs).unwrap() {
            Rep::Seq { items, tag } => {
                assert_eq!(tag.as_deref(), Some(tags::OMAP));
                assert_eq!(items.len(), 2);
            }
            other => panic!("expected a sequence representation, got {other:?}"),
        }
    }

    #[test]
    fn container_keyed_pairs_cannot_render() {
        let pairs = Value::pairs(vec![(Value::seq(vec![]), Value::Int(1))]);
        assert!(matches!(
            represent(&pairs),
            Err(DumpError::Represent { .. })
        ));
    }
}
