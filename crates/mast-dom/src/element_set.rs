//! Ordered sets of element nodes.

use std::fmt;

use crate::document::{Document, NodeId};
use crate::error::{DomError, Result};
use crate::selector::SelectorList;

/// An ordered, duplicate-free set of nodes from one document.
///
/// This is the result of every query. Operations that insert or replace need
/// exactly one element and fail with [`DomError::NotSingle`] otherwise.
#[derive(Clone)]
pub struct ElementSet {
    document: Document,
    nodes: Vec<NodeId>,
}

impl ElementSet {
    /// Create a set, dropping duplicate nodes.
    pub fn new(document: Document, nodes: Vec<NodeId>) -> Self {
        let mut unique = Vec::with_capacity(nodes.len());
        for node in nodes {
            if !unique.contains(&node) {
                unique.push(node);
            }
        }
        Self {
            document,
            nodes: unique,
        }
    }

    /// An empty set.
    pub fn empty(document: Document) -> Self {
        Self {
            document,
            nodes: Vec::new(),
        }
    }

    /// The document the nodes belong to.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The first node, if any.
    pub fn first(&self) -> Option<NodeId> {
        self.nodes.first().copied()
    }

    /// The nodes, in document order.
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    /// The only node of a one-element set.
    pub fn single(&self) -> Result<NodeId> {
        match self.nodes.as_slice() {
            [node] => Ok(*node),
            nodes => Err(DomError::NotSingle { len: nodes.len() }),
        }
    }

    /// Descendants of any node in the set matching `selector`.
    pub fn find(&self, selector: &str) -> Result<ElementSet> {
        let selector = SelectorList::parse(selector)?;
        let nodes = self
            .nodes
            .iter()
            .flat_map(|&node| self.document.select(node, &selector))
            .collect();
        Ok(ElementSet::new(self.document.clone(), nodes))
    }

    /// Append `child` to the single element of this set.
    pub fn append(&self, child: NodeId) -> Result<()> {
        self.document.append_child(self.single()?, child)
    }

    /// Replace the single element of this set with `node`.
    ///
    /// Returns `false` when the element is detached and nothing happened.
    pub fn replace_with(&self, node: NodeId) -> Result<bool> {
        self.document.replace_node(self.single()?, node)
    }

    /// Remove every node of the set from the document.
    pub fn remove(&self) -> usize {
        self.nodes
            .iter()
            .filter(|&&node| self.document.remove_node(node))
            .count()
    }
}

impl fmt::Debug for ElementSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.nodes).finish()
    }
}

impl fmt::Display for ElementSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, &node) in self.nodes.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", self.document.describe(node))?;
        }
        write!(f, "]")
    }
}
