//! Tip index module for phylogenetic tree representation.
//!
//! - `TipIndex`: ordered, gap-free assignment of tips to integer positions,
//!   interpreting the bit positions of bipartition [Bitset](crate::model::Bitset)s.

use crate::model::node::NodeIndex;
use std::collections::HashMap;
use std::fmt;

/// Position of a tip in a [TipIndex].
pub type TipPosition = usize;

// =#========================================================================#=
// TIP INDEX
// =#========================================================================#=
/// Maps tips (and their names) to sequential positions `0..n`.
///
/// Positions are handed out per tip *node*, so even if two tips share a name
/// each gets its own position. The name lookup then keeps the position of the
/// tip inserted last.
///
/// Owned and rebuilt by [Tree](crate::model::Tree); never edited in place
/// by other code.
///
/// # Example
/// ```
/// use tipmap::model::TipIndex;
///
/// let mut index = TipIndex::new(3);
/// let pos_a = index.insert(4, "A");
/// let pos_b = index.insert(7, "B");
///
/// assert_eq!(pos_a, 0);
/// assert_eq!(pos_b, 1);
/// assert_eq!(index.position_of("B"), Some(1));
/// assert_eq!(index.position_of_node(4), Some(0));
/// assert_eq!(index.name_at(1), Some("B"));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TipIndex {
    /// Tip names by position
    names: Vec<String>,
    /// Tip nodes by position
    nodes: Vec<NodeIndex>,
    /// Map from name to (last assigned) position
    by_name: HashMap<String, TipPosition>,
    /// Map from tip node to its position
    by_node: HashMap<NodeIndex, TipPosition>,
}

impl TipIndex {
    /// Creates a new empty TipIndex with pre-allocated capacity.
    ///
    /// # Arguments
    /// * `num_tips` - Expected number of tips
    pub fn new(num_tips: usize) -> Self {
        TipIndex {
            names: Vec::with_capacity(num_tips),
            nodes: Vec::with_capacity(num_tips),
            by_name: HashMap::with_capacity(num_tips),
            by_node: HashMap::with_capacity(num_tips),
        }
    }

    /// Assigns the next position to the tip `node` with the given name.
    ///
    /// If `node` already has a position, that position is returned and
    /// nothing changes.
    ///
    /// # Returns
    /// The position of `node`
    pub fn insert(&mut self, node: NodeIndex, name: &str) -> TipPosition {
        if let Some(&position) = self.by_node.get(&node) {
            return position;
        }

        let position = self.nodes.len();
        self.names.push(name.to_string());
        self.nodes.push(node);
        self.by_name.insert(name.to_string(), position);
        self.by_node.insert(node, position);
        position
    }

    /// Retrieves the position for a given tip name.
    ///
    /// # Returns
    /// `Some(position)` if a tip with this name exists, `None` otherwise
    pub fn position_of(&self, name: &str) -> Option<TipPosition> {
        self.by_name.get(name).copied()
    }

    /// Retrieves the position of the given tip node.
    pub fn position_of_node(&self, node: NodeIndex) -> Option<TipPosition> {
        self.by_node.get(&node).copied()
    }

    /// Retrieves the tip name at a given position.
    pub fn name_at(&self, position: TipPosition) -> Option<&str> {
        self.names.get(position).map(|s| s.as_str())
    }

    /// Checks if a tip name exists in the index.
    pub fn contains_name(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Returns the number of indexed tips.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns whether no tip is indexed.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the tip names in position order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Checks that positions `0..len` are each assigned to exactly one tip
    /// node, with no gaps and no duplicates.
    pub fn is_gap_free(&self) -> bool {
        if self.by_node.len() != self.nodes.len() || self.names.len() != self.nodes.len() {
            return false;
        }
        let mut seen = vec![false; self.nodes.len()];
        for (&node, &position) in &self.by_node {
            if position >= seen.len() || seen[position] || self.nodes[position] != node {
                return false;
            }
            seen[position] = true;
        }
        seen.into_iter().all(|s| s)
    }

    /// Removes all tips, keeping allocated capacity.
    pub(crate) fn clear(&mut self) {
        self.names.clear();
        self.nodes.clear();
        self.by_name.clear();
        self.by_node.clear();
    }
}

impl fmt::Display for TipIndex {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "TipIndex ({} tips):", self.names.len())?;
        for (position, name) in self.names.iter().enumerate() {
            writeln!(f, "  [{}] {} (node {})", position, name, self.nodes[position])?;
        }
        Ok(())
    }
}

impl std::ops::Index<TipPosition> for TipIndex {
    type Output = str;

    fn index(&self, position: TipPosition) -> &Self::Output {
        &self.names[position]
    }
}
