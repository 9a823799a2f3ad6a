//! Node module for phylogenetic tree representation.

use crate::model::edge::EdgeIndex;

/// Index of a node in a tree (arena).
pub type NodeIndex = usize;

// =#========================================================================#=
// NODE
// =#========================================================================#=
/// Represents a node (vertex) of a phylogenetic tree.
///
/// Whether a node is a *tip* or *internal* is derived from its degree only:
/// a tip has exactly one incident edge, every other node is internal. This
/// holds for the root as well, so a root with a single child counts as a tip.
///
/// # Invariants
/// - `index` is index in arena
/// - `edges` lists incident edges in order: the edge to the parent first
///   (if any), followed by the edges to the children in input order
/// - `name` may be empty; uniqueness of names is not enforced
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Index of this node in the tree arena
    index: NodeIndex,
    /// Name (label) of this node, possibly empty
    name: String,
    /// Incident edges, parent edge first
    edges: Vec<EdgeIndex>,
}

impl Node {
    /// Creates a new node without incident edges.
    ///
    /// # Arguments
    /// * `index` - The unique index of this node in the tree (arena)
    /// * `name` - Name of the node, possibly empty
    pub(crate) fn new(index: NodeIndex, name: String) -> Self {
        Node {
            index,
            name,
            edges: Vec::new(),
        }
    }

    /// Returns the index of this node.
    pub fn index(&self) -> NodeIndex {
        self.index
    }

    /// Returns the name of this node (empty string if unnamed).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns whether this node carries a non-empty name.
    pub fn has_name(&self) -> bool {
        !self.name.is_empty()
    }

    /// Returns the incident edges of this node in order.
    pub fn edges(&self) -> &[EdgeIndex] {
        &self.edges
    }

    /// Returns the number of incident edges.
    pub fn degree(&self) -> usize {
        self.edges.len()
    }

    /// Returns `true` if this node has exactly one incident edge.
    pub fn is_tip(&self) -> bool {
        self.edges.len() == 1
    }

    /// Returns `true` if this node is not a tip.
    pub fn is_internal(&self) -> bool {
        !self.is_tip()
    }

    /// Sets the name in place. Only the owning tree may call this, since it
    /// has to invalidate its derived caches.
    pub(crate) fn set_name(&mut self, name: String) {
        self.name = name;
    }

    pub(crate) fn add_edge(&mut self, edge: EdgeIndex) {
        self.edges.push(edge);
    }
}
