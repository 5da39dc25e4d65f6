//! Node tree → value graph conversion.
//!
//! The loader walks one document tree per call, guarded by a fresh
//! identity map so that aliases resolve to one value instance and
//! self-referential trees terminate. Containers are registered in the
//! identity map *before* their children are converted; a child that
//! points back at an ancestor resolves against the still-filling
//! container.

pub mod builtins;

use std::{cell::RefCell, collections::HashMap, rc::Rc};

use indexmap::IndexMap;
use tracing::{debug, trace};

use crate::{
    codec::tags,
    config::MarshalConfig,
    error::LoadError,
    node::{NodeBody, NodeId, NodeRef, NodeSource},
    registry::ConstructorRegistry,
    value::{ScalarKey, Value},
};

type MapRef = Rc<RefCell<IndexMap<ScalarKey, Value>>>;

/// Converts node trees into value graphs, one document per call.
///
/// Holds the decode registry and the conversion limits; all per-call
/// state lives in an identity map scoped to one `load`.
pub struct Loader {
    registry: ConstructorRegistry,
    max_depth: usize,
}

impl Default for Loader {
    /// A loader with every builtin type registered and default limits.
    fn default() -> Self {
        Self::new(builtins::registry())
    }
}

impl Loader {
    pub fn new(registry: ConstructorRegistry) -> Self {
        Self::with_config(registry, &MarshalConfig::default())
    }

    pub fn with_config(registry: ConstructorRegistry, config: &MarshalConfig) -> Self {
        Self {
            registry,
            max_depth: config.max_depth,
        }
    }

    /// Converts the next document from `source`. `Ok(None)` means the
    /// source is exhausted.
    pub fn load<S: NodeSource>(&self, source: &mut S) -> Result<Option<Value>, LoadError> {
        match source.next_document()? {
            Some(root) => self.construct(&root).map(Some),
            None => Ok(None),
        }
    }

    /// Lazily converts every remaining document. One-pass and
    /// non-restartable; the stream fuses after the first error.
    pub fn load_all<S: NodeSource>(&self, source: S) -> Documents<'_, S> {
        Documents {
            loader: self,
            source,
            done: false,
        }
    }

    /// Converts a single tree already in hand.
    pub fn construct(&self, root: &NodeRef) -> Result<Value, LoadError> {
        let mut memo = HashMap::new();
        self.convert(root, &mut memo, 0)
    }

    fn convert(
        &self,
        node: &NodeRef,
        memo: &mut HashMap<NodeId, Value>,
        depth: usize,
    ) -> Result<Value, LoadError> {
        let id = NodeId::of(node);
        if let Some(seen) = memo.get(&id) {
            return Ok(seen.clone());
        }
        if depth >= self.max_depth {
            return Err(LoadError::DepthExceeded(self.max_depth));
        }

        let borrowed = node.borrow();
        let structural = match &borrowed.body {
            NodeBody::Scalar(text) => Value::string(text),
            NodeBody::Seq(children) => {
                let items = Rc::new(RefCell::new(Vec::with_capacity(children.len())));
                memo.insert(id, Value::Seq(items.clone()));
                for child in children {
                    let converted = self.convert(child, memo, depth + 1)?;
                    items.borrow_mut().push(converted);
                }
                Value::Seq(items)
            }
            NodeBody::Map(entries) => self.convert_map(id, entries, memo, depth)?,
        };

        let value = match borrowed.tag.as_deref() {
            Some(tag) => match self.registry.resolve(tag) {
                Some(construct) => construct(&*borrowed, structural)?,
                None => {
                    debug!(tag, "unregistered tag, passing structural value through");
                    structural
                }
            },
            None => structural,
        };

        memo.insert(id, value.clone());
        Ok(value)
    }

    /// Builds a key-unique mapping, resolving merge directives and
    /// falling back to an ordered pair sequence when converted keys
    /// collide or are not hashable.
    fn convert_map(
        &self,
        id: NodeId,
        entries: &[(NodeRef, NodeRef)],
        memo: &mut HashMap<NodeId, Value>,
        depth: usize,
    ) -> Result<Value, LoadError> {
        let map: MapRef = Rc::new(RefCell::new(IndexMap::with_capacity(entries.len())));
        memo.insert(id, Value::Map(map.clone()));

        let mut in_order: Vec<(Value, Value)> = Vec::with_capacity(entries.len());
        let mut merges: Vec<Value> = Vec::new();
        let mut unique = true;

        for (key_node, value_node) in entries {
            if is_merge_key(key_node) {
                merges.push(self.convert(value_node, memo, depth + 1)?);
                continue;
            }
            let key = self.convert(key_node, memo, depth + 1)?;
            let value = self.convert(value_node, memo, depth + 1)?;
            in_order.push((key.clone(), value.clone()));
            if !unique {
                continue;
            }
            match key.as_key() {
                Some(hashable) => {
                    if map.borrow_mut().insert(hashable, value).is_some() {
                        debug!("mapping key collision, falling back to ordered pairs");
                        unique = false;
                    }
                }
                None => {
                    debug!("unhashable mapping key, falling back to ordered pairs");
                    unique = false;
                }
            }
        }

        if !unique {
            // The key-unique form is abandoned. Two situations leave no
            // coherent result and are rejected instead.
            if !merges.is_empty() {
                return Err(LoadError::MalformedMapping(
                    "merge directive in a mapping with non-unique keys".to_string(),
                ));
            }
            if Rc::strong_count(&map) > 2 {
                return Err(LoadError::MalformedMapping(
                    "mapping with non-unique keys aliases itself".to_string(),
                ));
            }
            let pairs = Value::pairs(in_order);
            memo.insert(id, pairs.clone());
            return Ok(pairs);
        }

        if !merges.is_empty() {
            let own_len = map.borrow().len();
            self.apply_merges(&map, merges, own_len)?;
        }
        Ok(Value::Map(map))
    }

    /// Applies merge sources in document order. Own explicit keys always
    /// win; among the sources, later ones override earlier ones.
    fn apply_merges(
        &self,
        target: &MapRef,
        merges: Vec<Value>,
        own_len: usize,
    ) -> Result<(), LoadError> {
        trace!(sources = merges.len(), "applying merge directives");
        for source in merges {
            match source {
                Value::Map(single) => merge_one(target, &single, own_len),
                Value::Seq(list) => {
                    for item in list.borrow().iter() {
                        match item {
                            Value::Map(entries) => merge_one(target, entries, own_len),
                            _ => {
                                return Err(LoadError::UnexpectedShape {
                                    tag: tags::MERGE.to_string(),
                                    expected: "mapping or sequence of mappings",
                                })
                            }
                        }
                    }
                }
                _ => {
                    return Err(LoadError::UnexpectedShape {
                        tag: tags::MERGE.to_string(),
                        expected: "mapping or sequence of mappings",
                    })
                }
            }
        }
        Ok(())
    }
}

fn merge_one(target: &MapRef, source: &MapRef, own_len: usize) {
    // Merging a mapping into itself is a no-op (and would deadlock the
    // two borrows below).
    if Rc::ptr_eq(target, source) {
        return;
    }
    let source = source.borrow();
    let mut target = target.borrow_mut();
    for (key, value) in source.iter() {
        match target.get_index_of(key) {
            // An own explicit key: never overridden.
            Some(index) if index < own_len => {}
            // Absent, or contributed by an earlier source: the later
            // source wins. Insertion keeps the first position.
            _ => {
                target.insert(key.clone(), value.clone());
            }
        }
    }
}

fn is_merge_key(node: &NodeRef) -> bool {
    node.borrow().tag.as_deref() == Some(tags::MERGE)
}

/// Lazy document stream returned by [`Loader::load_all`].
pub struct Documents<'a, S> {
    loader: &'a Loader,
    source: S,
    done: bool,
}

impl<S: NodeSource> Iterator for Documents<'_, S> {
    type Item = Result<Value, LoadError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.loader.load(&mut self.source) {
            Ok(Some(value)) => Some(Ok(value)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}
