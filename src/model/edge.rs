//! Edge module for phylogenetic tree representation.

use crate::model::bitset::Bitset;
use crate::model::node::NodeIndex;
use std::fmt;
use std::ops::Deref;

/// Index of an edge in a tree (arena).
pub type EdgeIndex = usize;

// =#========================================================================#=
// EDGE
// =#========================================================================#=
/// Represents an edge (branch) of a phylogenetic tree.
///
/// Edges are stored directed from `parent` to `child`. The *designated side*
/// of the edge for bipartition encoding is the child side: bit `i` of the
/// cached [Bitset] is set iff the tip with position `i` in the tree's
/// [TipIndex](crate::model::TipIndex) lies in the subtree below `child`.
///
/// # Invariants
/// - `index` is index in the edge arena
/// - `length` is non-negative (enforced by [BranchLength]); might not be set
/// - `bitset` is `None` until the owning tree computed bipartitions, and is
///   only ever written by the tree itself
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    /// Index of this edge in the tree arena
    index: EdgeIndex,
    /// Endpoint closer to the root
    parent: NodeIndex,
    /// Endpoint further away from the root
    child: NodeIndex,
    /// Length of this branch (optional)
    length: Option<BranchLength>,
    /// Cached bipartition of the tips induced by this edge
    bitset: Option<Bitset>,
}

impl Edge {
    /// Creates a new edge without a bipartition.
    ///
    /// # Arguments
    /// * `index` - The unique index of this edge in the tree (arena)
    /// * `parent` - Endpoint closer to the root
    /// * `child` - Endpoint further away from the root
    /// * `length` - Optional branch length
    pub(crate) fn new(
        index: EdgeIndex,
        parent: NodeIndex,
        child: NodeIndex,
        length: Option<BranchLength>,
    ) -> Self {
        Edge {
            index,
            parent,
            child,
            length,
            bitset: None,
        }
    }

    /// Returns the index of this edge.
    pub fn index(&self) -> EdgeIndex {
        self.index
    }

    /// Returns the endpoint closer to the root.
    pub fn parent(&self) -> NodeIndex {
        self.parent
    }

    /// Returns the endpoint further away from the root.
    pub fn child(&self) -> NodeIndex {
        self.child
    }

    /// Returns both endpoints as `(parent, child)`.
    pub fn endpoints(&self) -> (NodeIndex, NodeIndex) {
        (self.parent, self.child)
    }

    /// Returns the endpoint opposite to `node`, or `None` if `node` is not
    /// an endpoint of this edge.
    pub fn opposite(&self, node: NodeIndex) -> Option<NodeIndex> {
        if node == self.parent {
            Some(self.child)
        } else if node == self.child {
            Some(self.parent)
        } else {
            None
        }
    }

    /// Returns the branch length, if set.
    pub fn length(&self) -> Option<BranchLength> {
        self.length
    }

    pub(crate) fn set_length(&mut self, length: Option<BranchLength>) {
        self.length = length;
    }

    /// Returns the cached bipartition, or `None` if never computed.
    pub fn bitset(&self) -> Option<&Bitset> {
        self.bitset.as_ref()
    }

    pub(crate) fn bitset_mut(&mut self) -> Option<&mut Bitset> {
        self.bitset.as_mut()
    }

    pub(crate) fn set_bitset(&mut self, bitset: Bitset) {
        self.bitset = Some(bitset);
    }
}

// =#========================================================================#=
// BRANCH LENGTH
// =#========================================================================#=
/// Branch length in a phylogenetic tree, enforced non-negative.
///
/// The value is guaranteed to be non-negative and finite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BranchLength(f64);

impl BranchLength {
    /// Creates a new branch length.
    ///
    /// # Panics
    /// Panics if `length` is negative or not finite.
    pub fn new(length: f64) -> Self {
        assert!(length >= 0.0, "Branch length must be non-negative, got {}", length);
        assert!(length.is_finite(), "Branch length must be finite, got {}", length);
        BranchLength(length)
    }

    /// Creates a new branch length, or returns `None` if `length` is
    /// negative or not finite.
    pub fn try_new(length: f64) -> Option<Self> {
        if length >= 0.0 && length.is_finite() {
            Some(BranchLength(length))
        } else {
            None
        }
    }
}

impl Deref for BranchLength {
    type Target = f64;
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl fmt::Display for BranchLength {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite_endpoint() {
        let edge = Edge::new(0, 3, 7, None);
        assert_eq!(edge.opposite(3), Some(7));
        assert_eq!(edge.opposite(7), Some(3));
        assert_eq!(edge.opposite(5), None);
    }

    #[test]
    fn test_branch_length_display_is_shortest() {
        assert_eq!(BranchLength::new(1.0).to_string(), "1");
        assert_eq!(BranchLength::new(0.25).to_string(), "0.25");
    }

    #[test]
    fn test_try_new_rejects_negative() {
        assert!(BranchLength::try_new(-0.1).is_none());
        assert!(BranchLength::try_new(f64::INFINITY).is_none());
        assert_eq!(BranchLength::try_new(2.0), Some(BranchLength::new(2.0)));
    }

    #[test]
    #[should_panic]
    fn test_new_panics_on_negative() {
        BranchLength::new(-1.0);
    }
}
