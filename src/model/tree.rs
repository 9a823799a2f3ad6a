//! Provides the tree aggregate.
//!
//! Provides core data structures for representing phylogenetic trees:
//! * [Tree] - Main tree structure using the arena pattern for nodes and edges,
//!   owning the derived [TipIndex] and per-edge bipartition [Bitset]s.
//! * [CacheState] - Tracks whether the derived caches reflect current names.
//! * [PreOrderIter] and [PostOrderIter] for stable traversals.

use crate::model::bitset::Bitset;
use crate::model::edge::{BranchLength, Edge, EdgeIndex};
use crate::model::node::{Node, NodeIndex};
use crate::model::tip_index::TipIndex;
use crate::model::tree_error::TreeError;
use crate::newick;

// =$========================================================================$=
// CACHE STATE
// =$========================================================================$=
/// State of the derived caches ([TipIndex] and bipartitions) of a [Tree].
///
/// The only steady state that may be handed to consumers is
/// [CacheState::Reconciled]; every other state means the caches are dirty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheState {
    /// Tip index and bitsets match current names and topology.
    Reconciled,
    /// Names or topology changed since the last reconciliation.
    Stale,
    /// Tip index rebuilt, bitsets not yet recomputed.
    TipIndexRebuilt,
    /// Bitsets cleared, waiting for recomputation.
    BitsetsCleared,
}

// =$========================================================================$=
// TREE
// =$========================================================================$=
/// A phylogenetic tree of arbitrary degree, represented using the arena
/// pattern on [Node] and [Edge].
///
/// Nodes and edges are stored in contiguous vectors and referenced by
/// [NodeIndex] and [EdgeIndex]. The tree exclusively owns them as well as the
/// two derived caches: the [TipIndex] and the per-edge bipartition [Bitset]s.
///
/// # Structure
/// - Edges are directed from parent to child.
/// - A node's first incident edge is the edge to its parent (if any),
///   followed by the edges to its children in insertion order.
/// - Names may only be changed through [Tree::set_node_name], which marks the
///   derived caches as stale.
///
/// # Reconciliation
/// Derived caches are rebuilt in the fixed order
/// [update_tip_index](Tree::update_tip_index) →
/// [clear_bitsets](Tree::clear_bitsets) →
/// [update_bitsets](Tree::update_bitsets);
/// see [reconcile](crate::model::reconcile::reconcile).
#[derive(Debug, Clone)]
pub struct Tree {
    /// Nodes of this tree (arena pattern)
    nodes: Vec<Node>,

    /// Edges of this tree (arena pattern)
    edges: Vec<Edge>,

    /// Index of the root of this tree, if set
    root: Option<NodeIndex>,

    /// Length of a branch above the root, as allowed by Newick
    root_length: Option<BranchLength>,

    /// Name of tree; optional
    name: Option<String>,

    /// Derived tip name → position assignment
    tip_index: TipIndex,

    /// Whether the derived caches are up to date
    cache_state: CacheState,
}

// ============================================================================
// New, Getters / Accessors, etc. (pub)
// ============================================================================
impl Tree {
    /// Creates a new empty tree.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates a new empty tree with capacity for `num_nodes` nodes
    /// (and thus `num_nodes - 1` edges).
    pub fn with_capacity(num_nodes: usize) -> Self {
        Tree {
            nodes: Vec::with_capacity(num_nodes),
            edges: Vec::with_capacity(num_nodes.saturating_sub(1)),
            root: None,
            root_length: None,
            name: None,
            tip_index: TipIndex::default(),
            cache_state: CacheState::Stale,
        }
    }

    /// Attaches a name to this tree.
    pub fn with_name(mut self, name: String) -> Self {
        self.name = Some(name);
        self
    }

    /// Adds an unconnected node, assigning a unique index, which gets returned.
    pub fn add_node<S: Into<String>>(&mut self, name: S) -> NodeIndex {
        let index = self.nodes.len();
        self.nodes.push(Node::new(index, name.into()));
        self.cache_state = CacheState::Stale;
        index
    }

    /// Connects `parent` to `child` with a new edge, whose index gets returned.
    ///
    /// # Panics
    /// Panics if either index is out of bounds.
    pub fn connect(
        &mut self,
        parent: NodeIndex,
        child: NodeIndex,
        length: Option<BranchLength>,
    ) -> EdgeIndex {
        assert!(parent < self.nodes.len() && child < self.nodes.len());
        let index = self.edges.len();
        self.edges.push(Edge::new(index, parent, child, length));
        self.nodes[parent].add_edge(index);
        self.nodes[child].add_edge(index);
        self.cache_state = CacheState::Stale;
        index
    }

    /// Sets the root of this tree.
    ///
    /// # Panics
    /// Panics if `root` is out of bounds.
    pub fn set_root(&mut self, root: NodeIndex) {
        assert!(root < self.nodes.len());
        self.root = Some(root);
        self.cache_state = CacheState::Stale;
    }

    /// Returns the index of the root, or `None` if not set.
    pub fn root_index(&self) -> Option<NodeIndex> {
        self.root
    }

    /// Returns a reference to the root node, or `None` if not set.
    pub fn root(&self) -> Option<&Node> {
        self.root.map(|r| &self.nodes[r])
    }

    /// Returns the length of the branch above the root, if any.
    pub fn root_length(&self) -> Option<BranchLength> {
        self.root_length
    }

    /// Sets the length of the branch above the root.
    pub fn set_root_length(&mut self, length: Option<BranchLength>) {
        self.root_length = length;
    }

    /// Sets the length of an edge.
    ///
    /// # Panics
    /// Panics if `edge` is out of bounds.
    pub fn set_edge_length(&mut self, edge: EdgeIndex, length: Option<BranchLength>) {
        self.edges[edge].set_length(length);
    }

    /// Returns reference to name of this tree, or `None` if not set.
    pub fn name(&self) -> Option<&String> {
        self.name.as_ref()
    }

    /// Set a name for this tree.
    pub fn set_name(&mut self, name: String) {
        self.name = Some(name);
    }

    /// Returns all nodes in arena order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Returns all edges in arena order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Returns a reference to the node at the given index.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn node(&self, index: NodeIndex) -> &Node {
        &self.nodes[index]
    }

    /// Returns a reference to the edge at the given index.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn edge(&self, index: EdgeIndex) -> &Edge {
        &self.edges[index]
    }

    /// Returns an iterator over all tips in arena order.
    pub fn tips(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(|n| n.is_tip())
    }

    /// Returns the number of tips in this tree.
    pub fn num_tips(&self) -> usize {
        self.tips().count()
    }

    /// Returns the number of internal nodes in this tree.
    pub fn num_internal(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_internal()).count()
    }

    /// Returns the number of nodes in this tree.
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of edges in this tree.
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Returns the edge connecting `node` to its parent, or `None` for the root
    /// (and for nodes not yet connected).
    pub fn parent_edge(&self, node: NodeIndex) -> Option<EdgeIndex> {
        self.nodes[node]
            .edges()
            .first()
            .copied()
            .filter(|&e| self.edges[e].child() == node)
    }

    /// Returns the parent of `node`, or `None` for the root.
    pub fn parent(&self, node: NodeIndex) -> Option<NodeIndex> {
        self.parent_edge(node).map(|e| self.edges[e].parent())
    }

    /// Returns an iterator over the edges from `node` to its children, in order.
    pub fn child_edges(&self, node: NodeIndex) -> impl Iterator<Item = EdgeIndex> + '_ {
        self.nodes[node]
            .edges()
            .iter()
            .copied()
            .filter(move |&e| self.edges[e].parent() == node)
    }

    /// Returns an iterator over the children of `node`, in order.
    pub fn children(&self, node: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        self.child_edges(node).map(|e| self.edges[e].child())
    }

    /// Convenience method to convert this tree to a Newick string.
    pub fn to_newick(&self) -> String {
        newick::to_newick(self)
    }
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Index<NodeIndex> for Tree {
    type Output = Node;

    fn index(&self, index: NodeIndex) -> &Self::Output {
        &self.nodes[index]
    }
}

// ============================================================================
// Names and derived caches (pub)
// ============================================================================
impl Tree {
    /// Sets the name of a node in place and marks the derived caches stale.
    ///
    /// # Panics
    /// Panics if `node` is out of bounds.
    pub fn set_node_name<S: Into<String>>(&mut self, node: NodeIndex, name: S) {
        self.nodes[node].set_name(name.into());
        self.cache_state = CacheState::Stale;
    }

    /// Returns the current [CacheState].
    pub fn cache_state(&self) -> CacheState {
        self.cache_state
    }

    /// Returns `true` if the derived caches reflect current names and topology.
    pub fn is_reconciled(&self) -> bool {
        self.cache_state == CacheState::Reconciled
    }

    /// Returns the tip index. Only meaningful if [is_reconciled](Self::is_reconciled).
    pub fn tip_index(&self) -> &TipIndex {
        &self.tip_index
    }

    /// Rebuilds the [TipIndex] by enumerating tips in pre-order from the root
    /// and assigning sequential positions.
    pub fn update_tip_index(&mut self) {
        let tips: Vec<NodeIndex> = self
            .pre_order_iter()
            .filter(|n| n.is_tip())
            .map(|n| n.index())
            .collect();

        self.tip_index.clear();
        for tip in tips {
            self.tip_index.insert(tip, self.nodes[tip].name());
        }
        self.cache_state = CacheState::TipIndexRebuilt;
    }

    /// Clears (or allocates) the bipartition of every edge, sized to the
    /// number of indexed tips.
    ///
    /// # Errors
    /// * [TreeError::TipIndexStale] if names changed since the tip index was rebuilt
    /// * [TreeError::RootNotSet] if the tree has edges but no root
    pub fn clear_bitsets(&mut self) -> Result<(), TreeError> {
        if self.cache_state == CacheState::Stale {
            return Err(TreeError::TipIndexStale);
        }
        if self.root.is_none() && !self.edges.is_empty() {
            return Err(TreeError::RootNotSet);
        }

        let width = self.tip_index.len();
        for edge in &mut self.edges {
            let same_width = edge.bitset().is_some_and(|b| b.len() == width);
            if !same_width {
                edge.set_bitset(Bitset::new(width));
            } else if let Some(bitset) = edge.bitset_mut() {
                bitset.clear();
            }
        }
        self.cache_state = CacheState::BitsetsCleared;
        Ok(())
    }

    /// Recomputes the bipartition of every edge from the tip index and the
    /// current topology.
    ///
    /// Marks the tree as reconciled unless names changed since the tip index
    /// was last rebuilt.
    pub fn update_bitsets(&mut self) {
        let width = self.tip_index.len();
        let order: Vec<NodeIndex> = self.post_order_iter().map(|n| n.index()).collect();

        for node in order {
            let Some(parent_edge) = self.parent_edge(node) else {
                continue;
            };

            let mut bitset = Bitset::new(width);
            if let Some(position) = self.tip_index.position_of_node(node) {
                bitset.insert(position);
            }
            for child_edge in self.child_edges(node) {
                if let Some(child_bitset) = self.edges[child_edge].bitset() {
                    bitset.union_with(child_bitset);
                }
            }
            self.edges[parent_edge].set_bitset(bitset);
        }

        if self.cache_state != CacheState::Stale {
            self.cache_state = CacheState::Reconciled;
        }
    }

    /// Checks the derived cache invariants:
    /// - tree is marked reconciled
    /// - tip index covers all tips without gaps or duplicate positions
    /// - every edge carries a bitset whose width equals the number of tips
    pub fn caches_consistent(&self) -> bool {
        let num_tips = self.num_tips();
        self.is_reconciled()
            && self.tip_index.len() == num_tips
            && self.tip_index.is_gap_free()
            && self
                .edges
                .iter()
                .all(|e| e.bitset().is_some_and(|b| b.len() == num_tips))
    }
}

// =$========================================================================$=
// ITERATORS
// =$========================================================================$=
impl Tree {
    /// Returns an iterator over the tree in post-order (children before parents).
    ///
    /// Yields nothing if no root is set.
    pub fn post_order_iter(&self) -> PostOrderIter<'_> {
        PostOrderIter::new(self)
    }

    /// Returns an iterator over the tree in pre-order (parents before children),
    /// visiting children in insertion order.
    ///
    /// Yields nothing if no root is set.
    ///
    /// # Example
    /// ```
    /// use tipmap::model::Tree;
    ///
    /// let mut tree = Tree::new();
    /// let root = tree.add_node("");
    /// let a = tree.add_node("A");
    /// let b = tree.add_node("B");
    /// tree.connect(root, a, None);
    /// tree.connect(root, b, None);
    /// tree.set_root(root);
    ///
    /// let names: Vec<_> = tree.pre_order_iter().map(|n| n.name()).collect();
    /// assert_eq!(names, vec!["", "A", "B"]);
    /// ```
    pub fn pre_order_iter(&self) -> PreOrderIter<'_> {
        PreOrderIter::new(self)
    }
}

/// Iterator for post-order traversal (children before parents).
///
/// Stack-based, so deep trees do not recurse.
pub struct PostOrderIter<'a> {
    tree: &'a Tree,
    stack: Vec<(NodeIndex, bool)>, // (index, children_visited)
}

impl<'a> PostOrderIter<'a> {
    fn new(tree: &'a Tree) -> Self {
        let stack = tree.root.map(|r| vec![(r, false)]).unwrap_or_default();
        PostOrderIter { tree, stack }
    }
}

impl<'a> Iterator for PostOrderIter<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((index, children_visited)) = self.stack.pop() {
            if children_visited {
                return Some(&self.tree[index]);
            }

            self.stack.push((index, true));
            // Push children in reverse, so first child is processed first
            let children: Vec<NodeIndex> = self.tree.children(index).collect();
            for child in children.into_iter().rev() {
                self.stack.push((child, false));
            }
        }
        None
    }
}

/// Iterator for pre-order traversal (parents before children).
///
/// Stack-based, so deep trees do not recurse.
pub struct PreOrderIter<'a> {
    tree: &'a Tree,
    stack: Vec<NodeIndex>,
}

impl<'a> PreOrderIter<'a> {
    fn new(tree: &'a Tree) -> Self {
        let stack = tree.root.map(|r| vec![r]).unwrap_or_default();
        PreOrderIter { tree, stack }
    }
}

impl<'a> Iterator for PreOrderIter<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.stack.pop()?;

        let children: Vec<NodeIndex> = self.tree.children(index).collect();
        self.stack.extend(children.into_iter().rev());

        Some(&self.tree[index])
    }
}
