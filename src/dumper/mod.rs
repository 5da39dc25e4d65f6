//! Value graph → node tree conversion.
//!
//! The dumper mirrors the loader: a shallow node is created and
//! registered against the source value's identity *before* children are
//! converted, so self-referential graphs terminate. A second occurrence
//! of an already-converted identity becomes a reference to the same
//! node — except for the freely-duplicable set, which is always
//! re-inlined.

pub mod represent;

use std::collections::HashMap;

use tracing::trace;

use crate::{
    config::MarshalConfig,
    error::DumpError,
    node::{Node, NodeBody, NodeRef, NodeSink},
    registry::{Rep, RepresenterRegistry},
    value::Value,
};

/// Converts value graphs into node trees, one tree per value.
///
/// Holds the representer registry and the conversion limits; all
/// per-call state lives in a fresh identity map.
pub struct Dumper {
    registry: RepresenterRegistry,
    max_depth: usize,
    anchor_prefix: String,
}

#[derive(Default)]
struct Memo {
    nodes: HashMap<usize, NodeRef>,
    anchors: usize,
}

impl Default for Dumper {
    /// A dumper with no overrides and default limits.
    fn default() -> Self {
        Self::new(RepresenterRegistry::new())
    }
}

impl Dumper {
    pub fn new(registry: RepresenterRegistry) -> Self {
        Self::with_config(registry, &MarshalConfig::default())
    }

    pub fn with_config(registry: RepresenterRegistry, config: &MarshalConfig) -> Self {
        Self {
            registry,
            max_depth: config.max_depth,
            anchor_prefix: config.anchor_prefix.clone(),
        }
    }

    /// Converts `value` and hands the finished tree to `sink`.
    ///
    /// `sink.begin()` runs before any conversion, so a rejected sink
    /// produces no partial output.
    pub fn dump<S: NodeSink>(&self, value: &Value, sink: &mut S) -> Result<(), DumpError> {
        sink.begin()?;
        let node = self.to_node(value)?;
        sink.emit(node)
    }

    /// Sequentially converts and emits one tree per value, each with a
    /// fresh identity map.
    pub fn dump_all<S, I>(&self, values: I, sink: &mut S) -> Result<(), DumpError>
    where
        S: NodeSink,
        I: IntoIterator<Item = Value>,
    {
        sink.begin()?;
        for value in values {
            let node = self.to_node(&value)?;
            sink.emit(node)?;
        }
        Ok(())
    }

    /// Converts one value graph into a node tree without emitting it.
    pub fn to_node(&self, value: &Value) -> Result<NodeRef, DumpError> {
        let mut memo = Memo::default();
        self.convert(value, &mut memo, 0)
    }

    fn convert(&self, value: &Value, memo: &mut Memo, depth: usize) -> Result<NodeRef, DumpError> {
        let aliasable = allow_alias(value);
        let identity = value.identity();
        if aliasable {
            if let Some(id) = identity {
                if let Some(existing) = memo.nodes.get(&id).cloned() {
                    trace!("emitting alias to an already-converted node");
                    self.assign_anchor(&existing, memo);
                    return Ok(existing);
                }
            }
        }
        if depth >= self.max_depth {
            return Err(DumpError::DepthExceeded(self.max_depth));
        }

        let rep = match self.registry.resolve(value) {
            Some(custom) => custom(value)?,
            None => represent::represent(value)?,
        };

        match rep {
            Rep::Scalar { text, tag } => {
                let node = Node::new(NodeBody::Scalar(text), tag, None);
                self.remember(value, aliasable, &node, memo);
                Ok(node)
            }
            Rep::Seq { items, tag } => {
                let node = Node::new(NodeBody::Seq(Vec::new()), tag, None);
                self.remember(value, aliasable, &node, memo);
                for item in items {
                    let child = self.convert(&item, memo, depth + 1)?;
                    if let NodeBody::Seq(children) = &mut node.borrow_mut().body {
                        children.push(child);
                    }
                }
                Ok(node)
            }
            Rep::Map { entries, tag } => {
                let node = Node::new(NodeBody::Map(Vec::new()), tag, None);
                self.remember(value, aliasable, &node, memo);
                for (key, val) in entries {
                    let key_node = self.convert(&key, memo, depth + 1)?;
                    let value_node = self.convert(&val, memo, depth + 1)?;
                    if let NodeBody::Map(pairs) = &mut node.borrow_mut().body {
                        pairs.push((key_node, value_node));
                    }
                }
                Ok(node)
            }
        }
    }

    /// Registers the produced node against the value identity, so later
    /// occurrences alias it.
    fn remember(&self, value: &Value, aliasable: bool, node: &NodeRef, memo: &mut Memo) {
        if aliasable {
            if let Some(id) = value.identity() {
                memo.nodes.insert(id, node.clone());
            }
        }
    }

    fn assign_anchor(&self, node: &NodeRef, memo: &mut Memo) {
        let mut node = node.borrow_mut();
        if node.anchor.is_none() {
            memo.anchors += 1;
            node.anchor = Some(format!("{}{:03}", self.anchor_prefix, memo.anchors));
        }
    }
}

/// Whether a second occurrence of this value may be emitted as an alias.
///
/// The freely-duplicable set is always re-inlined instead: null,
/// booleans, numeric scalars (and identityless timestamps), strings that
/// are empty or entirely alphanumeric, and sequences of length zero.
fn allow_alias(value: &Value) -> bool {
    match value {
        Value::Null
        | Value::Bool(_)
        | Value::Int(_)
        | Value::Float(_)
        | Value::Timestamp(_) => false,
        Value::Str(s) => !(s.is_empty() || s.chars().all(char::is_alphanumeric)),
        Value::Seq(items) => !items.borrow().is_empty(),
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::{
        codec::tags,
        node::{NodeId, VecSink},
        value::{ScalarKey, Shape},
    };

    fn to_node(value: &Value) -> NodeRef {
        Dumper::default().to_node(value).unwrap()
    }

    #[test]
    fn int_dumps_to_tagged_scalar() {
        let node = to_node(&Value::Int(42));
        let n = node.borrow();
        assert_eq!(n.scalar_text(), Some("42"));
        assert_eq!(n.tag.as_deref(), Some(tags::INT));
    }

    #[test]
    fn float_specials_dump_canonically() {
        let node = to_node(&Value::Float(f64::INFINITY));
        assert_eq!(node.borrow().scalar_text(), Some(".inf"));
    }

    #[test]
    fn sequences_dump_children_in_order() {
        let node = to_node(&Value::seq(vec![Value::Int(1), Value::string("two")]));
        let n = node.borrow();
        match &n.body {
            NodeBody::Seq(children) => {
                assert_eq!(children.len(), 2);
                assert_eq!(children[0].borrow().scalar_text(), Some("1"));
                assert_eq!(children[1].borrow().scalar_text(), Some("two"));
            }
            other => panic!("expected a sequence body, got {other:?}"),
        }
    }

    /// A shared non-exempt string is emitted once and aliased, and the
    /// shared node gets an anchor label.
    #[test]
    fn shared_string_is_aliased_with_anchor() {
        let shared = Value::string("hello world");
        let node = to_node(&Value::seq(vec![shared.clone(), shared]));
        let n = node.borrow();
        match &n.body {
            NodeBody::Seq(children) => {
                assert_eq!(NodeId::of(&children[0]), NodeId::of(&children[1]));
                assert_eq!(children[0].borrow().anchor.as_deref(), Some("id001"));
            }
            other => panic!("expected a sequence body, got {other:?}"),
        }
    }

    /// Alphanumeric strings are in the freely-duplicable set: the same
    /// allocation twice still produces two independent nodes.
    #[test]
    fn alphanumeric_string_is_reinlined() {
        let shared = Value::string("abc123");
        let node = to_node(&Value::seq(vec![shared.clone(), shared]));
        let n = node.borrow();
        match &n.body {
            NodeBody::Seq(children) => {
                assert_ne!(NodeId::of(&children[0]), NodeId::of(&children[1]));
                assert_eq!(children[0].borrow().anchor, None);
            }
            other => panic!("expected a sequence body, got {other:?}"),
        }
    }

    #[test]
    fn empty_sequence_is_reinlined() {
        let empty = Value::seq(vec![]);
        let node = to_node(&Value::seq(vec![empty.clone(), empty]));
        let n = node.borrow();
        match &n.body {
            NodeBody::Seq(children) => {
                assert_ne!(NodeId::of(&children[0]), NodeId::of(&children[1]));
            }
            other => panic!("expected a sequence body, got {other:?}"),
        }
    }

    #[test]
    fn numeric_scalars_are_never_aliased() {
        let node = to_node(&Value::seq(vec![Value::Int(7), Value::Int(7)]));
        let n = node.borrow();
        match &n.body {
            NodeBody::Seq(children) => {
                assert_ne!(NodeId::of(&children[0]), NodeId::of(&children[1]));
            }
            other => panic!("expected a sequence body, got {other:?}"),
        }
    }

    /// A sequence containing itself dumps to a node containing itself.
    #[test]
    fn self_referential_sequence_terminates() {
        let inner = Rc::new(std::cell::RefCell::new(Vec::new()));
        inner.borrow_mut().push(Value::Seq(inner.clone()));
        let value = Value::Seq(inner);

        let node = to_node(&value);
        let n = node.borrow();
        match &n.body {
            NodeBody::Seq(children) => {
                assert_eq!(children.len(), 1);
                assert_eq!(NodeId::of(&children[0]), NodeId::of(&node));
            }
            other => panic!("expected a sequence body, got {other:?}"),
        }
    }

    #[test]
    fn override_is_consulted_before_builtin_dispatch() {
        let mut registry = RepresenterRegistry::new();
        registry.register(Shape::Int, |value| match value {
            Value::Int(i) => Ok(Rep::Scalar {
                text: format!("{i:#x}"),
                tag: Some(tags::INT_HEX.to_string()),
            }),
            _ => Err(DumpError::Represent {
                shape: "int".to_string(),
                detail: "override applied to a non-integer".to_string(),
            }),
        });
        let dumper = Dumper::new(registry);
        let node = dumper.to_node(&Value::Int(255)).unwrap();
        let n = node.borrow();
        assert_eq!(n.scalar_text(), Some("0xff"));
        assert_eq!(n.tag.as_deref(), Some(tags::INT_HEX));
    }

    #[test]
    fn rejected_sink_means_no_partial_output() {
        struct ClosedSink {
            emitted: usize,
        }
        impl NodeSink for ClosedSink {
            fn begin(&mut self) -> Result<(), DumpError> {
                Err(DumpError::InvalidSink("sink is closed".to_string()))
            }
            fn emit(&mut self, _node: NodeRef) -> Result<(), DumpError> {
                self.emitted += 1;
                Ok(())
            }
        }

        let mut sink = ClosedSink { emitted: 0 };
        let err = Dumper::default()
            .dump(&Value::Int(1), &mut sink)
            .unwrap_err();
        assert!(matches!(err, DumpError::InvalidSink(_)));
        assert_eq!(sink.emitted, 0);
    }

    #[test]
    fn dump_all_emits_one_tree_per_value() {
        let mut sink = VecSink::new();
        Dumper::default()
            .dump_all(vec![Value::Int(1), Value::string("two")], &mut sink)
            .unwrap();
        assert_eq!(sink.docs.len(), 2);
    }

    #[test]
    fn depth_ceiling_is_enforced() {
        let mut value = Value::Int(0);
        for _ in 0..16 {
            value = Value::seq(vec![value]);
        }
        let config = MarshalConfig {
            max_depth: 8,
            ..MarshalConfig::default()
        };
        let dumper = Dumper::with_config(RepresenterRegistry::new(), &config);
        assert!(matches!(
            dumper.to_node(&value),
            Err(DumpError::DepthExceeded(8))
        ));
    }

    #[test]
    fn set_and_pairs_dump_in_decoder_shapes() {
        let set = Value::set(vec![ScalarKey::from("a")]);
        let node = to_node(&set);
        let n = node.borrow();
        assert_eq!(n.tag.as_deref(), Some(tags::SET));
        assert!(matches!(n.body, NodeBody::Map(_)));

        let pairs = Value::pairs(vec![(Value::string("k"), Value::Int(1))]);
        let node = to_node(&pairs);
        let n = node.borrow();
        assert_eq!(n.tag.as_deref(), Some(tags::OMAP));
        assert!(matches!(n.body, NodeBody::Seq(_)));
    }
}
