//! Name index module: point-in-time lookup from tip name to tip node.

use crate::model::node::NodeIndex;
use crate::model::tree::Tree;
use std::collections::HashMap;
use tracing::warn;

// =#========================================================================#=
// NAME INDEX
// =#========================================================================#=
/// A snapshot lookup from tip name to [NodeIndex].
///
/// Built by scanning all nodes of a [Tree] in arena order and keeping those
/// of degree exactly one. Internal nodes are never reachable through this
/// index, even if they carry a name.
///
/// If several tips share a name, the tip seen last in arena order wins; for
/// trees parsed from Newick, arena order is pre-order, so the rightmost tip
/// wins. Shared names are recorded in [duplicates](Self::duplicates).
///
/// The index is not tied to the tree by a borrow, but it is stale as soon as
/// any name or edge of the tree changes and must not be reused afterwards.
///
/// # Example
/// ```
/// use tipmap::model::NameIndex;
///
/// let tree = tipmap::parse_newick_str("((A,B)X,C);").unwrap();
/// let index = NameIndex::build(&tree);
///
/// assert!(index.lookup("A").is_some());
/// assert!(index.lookup("X").is_none()); // internal node
/// ```
#[derive(Debug, Clone, Default)]
pub struct NameIndex {
    /// Map from tip name to tip node
    index: HashMap<String, NodeIndex>,
    /// Names shared by more than one tip, in order of first collision
    duplicates: Vec<String>,
}

impl NameIndex {
    /// Builds the index over all tips of `tree`. Never fails.
    pub fn build(tree: &Tree) -> Self {
        let mut index = HashMap::with_capacity(tree.num_nodes());
        let mut duplicates = Vec::new();

        for node in tree.nodes() {
            // tip
            if node.is_tip()
                && index.insert(node.name().to_string(), node.index()).is_some()
                && !duplicates.iter().any(|d| d == node.name())
            {
                duplicates.push(node.name().to_string());
            }
        }

        if !duplicates.is_empty() {
            warn!(
                "{} tip name(s) occur more than once, last tip wins: {:?}",
                duplicates.len(),
                duplicates
            );
        }

        NameIndex { index, duplicates }
    }

    /// Returns the tip node with the given name, or `None` if no tip has it.
    pub fn lookup(&self, name: &str) -> Option<NodeIndex> {
        self.index.get(name).copied()
    }

    /// Returns whether a tip with the given name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Returns the number of distinct tip names.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Returns whether no tip was indexed.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Returns the tip names that occur more than once in the tree.
    pub fn duplicates(&self) -> &[String] {
        &self.duplicates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_tips_are_indexed() {
        let mut tree = Tree::new();
        let root = tree.add_node("Root");
        let a = tree.add_node("A");
        let b = tree.add_node("B");
        tree.connect(root, a, None);
        tree.connect(root, b, None);
        tree.set_root(root);

        let index = NameIndex::build(&tree);
        assert_eq!(index.len(), 2);
        assert_eq!(index.lookup("A"), Some(a));
        assert_eq!(index.lookup("Root"), None);
    }

    #[test]
    fn test_duplicate_tip_names_last_wins() {
        let mut tree = Tree::new();
        let root = tree.add_node("");
        let first = tree.add_node("Takahe");
        let second = tree.add_node("Takahe");
        tree.connect(root, first, None);
        tree.connect(root, second, None);
        tree.set_root(root);

        let index = NameIndex::build(&tree);
        assert_eq!(index.len(), 1);
        assert_eq!(index.lookup("Takahe"), Some(second));
        assert_eq!(index.duplicates(), &["Takahe".to_string()]);
    }
}
