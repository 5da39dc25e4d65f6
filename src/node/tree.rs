//! The tagged tree element exchanged with the text engine.
//!
//! A node is one of three kinds (scalar, sequence, mapping), optionally
//! carrying a type tag and an anchor label. Nodes are shared through
//! [`NodeRef`] handles; two handles cloned from the same allocation are
//! the same logical node, which is how aliases and cycles travel across
//! the text-engine seam.

use std::{cell::RefCell, rc::Rc};

/// Shared handle to a node. Cloning the handle does not copy the node.
pub type NodeRef = Rc<RefCell<Node>>;

/// Closed set of node kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Scalar,
    Seq,
    Map,
}

/// Payload of a node, by kind.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeBody {
    /// Raw scalar text, before any codec is applied.
    Scalar(String),
    /// Ordered children.
    Seq(Vec<NodeRef>),
    /// Ordered key/value pairs, unique by node identity.
    Map(Vec<(NodeRef, NodeRef)>),
}

/// A tagged tree element.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Optional type identifier, e.g. `tag:yaml.org,2002:int`.
    pub tag: Option<String>,
    /// Optional identity label assigned when the node is shared.
    pub anchor: Option<String>,
    pub body: NodeBody,
}

impl Node {
    pub fn new(body: NodeBody, tag: Option<String>, anchor: Option<String>) -> NodeRef {
        Rc::new(RefCell::new(Node { tag, anchor, body }))
    }

    /// A fresh untagged scalar node.
    pub fn scalar(text: impl Into<String>) -> NodeRef {
        Self::new(NodeBody::Scalar(text.into()), None, None)
    }

    /// A fresh untagged sequence node.
    pub fn seq(children: Vec<NodeRef>) -> NodeRef {
        Self::new(NodeBody::Seq(children), None, None)
    }

    /// A fresh untagged mapping node.
    pub fn map(entries: Vec<(NodeRef, NodeRef)>) -> NodeRef {
        Self::new(NodeBody::Map(entries), None, None)
    }

    pub fn kind(&self) -> NodeKind {
        match self.body {
            NodeBody::Scalar(_) => NodeKind::Scalar,
            NodeBody::Seq(_) => NodeKind::Seq,
            NodeBody::Map(_) => NodeKind::Map,
        }
    }

    /// The raw text of a scalar node, if this is one.
    pub fn scalar_text(&self) -> Option<&str> {
        match &self.body {
            NodeBody::Scalar(text) => Some(text),
            _ => None,
        }
    }
}

/// Attaches `tag` to `node` and returns the same handle.
pub fn tagged(node: NodeRef, tag: impl Into<String>) -> NodeRef {
    node.borrow_mut().tag = Some(tag.into());
    node
}

/// Stable identity of a node within one conversion pass.
///
/// Derived from the node's allocation, so every clone of a [`NodeRef`]
/// maps to the same id while distinct nodes never collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub fn of(node: &NodeRef) -> Self {
        NodeId(Rc::as_ptr(node) as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_node_defaults() {
        let node = Node::scalar("hello");
        let n = node.borrow();
        assert_eq!(n.kind(), NodeKind::Scalar);
        assert_eq!(n.scalar_text(), Some("hello"));
        assert_eq!(n.tag, None);
        assert_eq!(n.anchor, None);
    }

    #[test]
    fn tagged_sets_tag_in_place() {
        let node = tagged(Node::scalar("1"), "tag:yaml.org,2002:int");
        assert_eq!(node.borrow().tag.as_deref(), Some("tag:yaml.org,2002:int"));
    }

    #[test]
    fn clones_share_identity() {
        let node = Node::seq(vec![Node::scalar("a")]);
        let other = node.clone();
        assert_eq!(NodeId::of(&node), NodeId::of(&other));
    }

    #[test]
    fn distinct_nodes_have_distinct_identity() {
        let a = Node::scalar("x");
        let b = Node::scalar("x");
        assert_ne!(NodeId::of(&a), NodeId::of(&b));
    }

    #[test]
    fn kinds_are_closed_over_the_three_bodies() {
        assert_eq!(Node::scalar("").borrow().kind(), NodeKind::Scalar);
        assert_eq!(Node::seq(vec![]).borrow().kind(), NodeKind::Seq);
        assert_eq!(Node::map(vec![]).borrow().kind(), NodeKind::Map);
    }

    /// A node can be made to contain itself; the handle graph holds the
    /// cycle without copying.
    #[test]
    fn self_referential_node_is_expressible() {
        let seq = Node::seq(vec![]);
        if let NodeBody::Seq(children) = &mut seq.borrow_mut().body {
            children.push(seq.clone());
        }
        let n = seq.borrow();
        if let NodeBody::Seq(children) = &n.body {
            assert_eq!(NodeId::of(&children[0]), NodeId::of(&seq));
        } else {
            panic!("expected a sequence body");
        }
    }
}
