//! Newick format writing.

use crate::model::{NodeIndex, Tree};
use crate::newick::defs::BUFFER_CHARS;
use crate::parser::utils::escape_label;
use std::io::{self, BufWriter, Write};

/// Writes the given trees in Newick format, one tree per line.
///
/// Each tree is written as a complete Newick string followed by a newline.
/// Node names are escaped if necessary.
///
/// # Errors
/// Returns an I/O error if writing fails.
///
/// # Example
/// ```
/// use tipmap::newick::write_newick;
///
/// let tree = tipmap::parse_newick_str("(A:1,B:2);").unwrap();
/// let mut out = Vec::new();
/// write_newick(&mut out, &[tree]).unwrap();
/// assert_eq!(String::from_utf8(out).unwrap(), "(A:1,B:2);\n");
/// ```
pub fn write_newick<W: Write>(writer: W, trees: &[Tree]) -> io::Result<()> {
    let Some(first) = trees.first() else {
        return Ok(());
    };

    let mut writer = BufWriter::new(writer);
    let estimated_capacity = estimate_newick_len(first);
    for tree in trees {
        let newick = to_newick_with_capacity(tree, estimated_capacity);
        writer.write_all(newick.as_bytes())?;
        writer.write_all(b"\n")?;
    }

    writer.flush()?;
    Ok(())
}

/// Returns the Newick representation of this tree with closing semicolon.
///
/// Children are written in order, internal names follow the closing
/// parenthesis, and branch lengths use the shortest `f64` display.
/// A tree without root is written as `;`.
///
/// # Example
/// ```
/// use tipmap::model::{BranchLength, Tree};
/// use tipmap::newick::to_newick;
///
/// let mut tree = Tree::new();
/// let root = tree.add_node("");
/// let a = tree.add_node("Tui");
/// let b = tree.add_node("Bellbird");
/// tree.connect(root, a, Some(BranchLength::new(1.0)));
/// tree.connect(root, b, Some(BranchLength::new(0.5)));
/// tree.set_root(root);
///
/// assert_eq!(to_newick(&tree), "(Tui:1,Bellbird:0.5);");
/// ```
pub fn to_newick(tree: &Tree) -> String {
    to_newick_with_capacity(tree, estimate_newick_len(tree))
}

/// Returns the Newick representation of a tree with pre-allocated capacity.
///
/// This is an optimization for writing multiple trees with similar structure,
/// where the capacity can be estimated once and reused.
pub(crate) fn to_newick_with_capacity(tree: &Tree, estimated_capacity: usize) -> String {
    /// Pending output; popped from the back of the work stack
    enum Step {
        Enter(NodeIndex),
        Close(NodeIndex),
        Comma,
    }

    let mut newick = String::with_capacity(estimated_capacity);
    let mut stack: Vec<Step> = tree.root_index().map(Step::Enter).into_iter().collect();

    while let Some(step) = stack.pop() {
        match step {
            Step::Enter(index) => {
                let mark = stack.len();
                for (i, child) in tree.children(index).enumerate() {
                    if i > 0 {
                        stack.push(Step::Comma);
                    }
                    stack.push(Step::Enter(child));
                }

                if stack.len() == mark {
                    push_label_and_length(tree, &mut newick, index);
                } else {
                    newick.push('(');
                    // First child on top, closing parenthesis at the bottom
                    stack[mark..].reverse();
                    stack.insert(mark, Step::Close(index));
                }
            }
            Step::Close(index) => {
                newick.push(')');
                push_label_and_length(tree, &mut newick, index);
            }
            Step::Comma => newick.push(','),
        }
    }
    newick.push(';');

    newick
}

/// Appends the escaped name of `index` and the length of the branch above it.
fn push_label_and_length(tree: &Tree, newick: &mut String, index: NodeIndex) {
    let name = tree[index].name();
    if !name.is_empty() {
        newick.push_str(&escape_label(name));
    }

    let length = match tree.parent_edge(index) {
        Some(edge) => tree.edge(edge).length(),
        None => tree.root_length(),
    };
    if let Some(length) = length {
        newick.push(':');
        newick.push_str(&length.to_string());
    }
}

/// Estimates the length of a Newick string for a given tree, accounting for
/// structure, names, and branch lengths.
pub(crate) fn estimate_newick_len(tree: &Tree) -> usize {
    // Each internal node: "()" plus a comma per child
    const INTERNAL_NODE_CHARS: usize = 2;
    // Branch lengths: ~20 chars each (e.g., ":0.009529961339106089")
    const BRANCH_LENGTH_CHARS: usize = 20;

    let structure_capacity = tree.num_internal() * INTERNAL_NODE_CHARS + tree.num_edges();
    let label_capacity: usize = tree.nodes().iter().map(|n| n.name().len()).sum();
    let branch_capacity = tree
        .edges()
        .iter()
        .filter(|e| e.length().is_some())
        .count()
        * BRANCH_LENGTH_CHARS;

    structure_capacity + label_capacity + branch_capacity + BUFFER_CHARS
}
