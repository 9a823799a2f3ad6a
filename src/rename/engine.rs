//! Applies a [MappingTable] to the tips of a [Tree].

use crate::config::RenameOptions;
use crate::model::{NameIndex, NodeIndex, Tree, reconcile};
use crate::rename::mapping::MappingTable;
use crate::rename::rename_error::RenameError;
use std::collections::HashMap;
use tracing::debug;

/// Outcome of a successful [apply].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenameReport {
    /// Number of tips whose name was set
    pub renamed: usize,
    /// Number of tips in the tree
    pub num_tips: usize,
}

/// Renames the tips of `tree` according to `table`.
///
/// Every key is resolved against a [NameIndex] snapshot taken before any
/// name is touched, so renames never chain (`A→B`, `B→C` renames the tip
/// formerly named `B` to `C`, not the tip formerly named `A`). Tips whose
/// name is not a key keep their name. Keys naming internal nodes only do
/// not resolve.
///
/// Afterwards the tip index and all bipartitions are rebuilt, even if the
/// table was empty.
///
/// # Errors
/// * [RenameError::UnknownTip] for the first key (in table order) that names
///   no tip; nothing has been renamed then and the tree is unchanged
/// * [RenameError::DuplicateTipName] / [RenameError::NameCollision] in
///   strict mode, also before any mutation
/// * [RenameError::Reconciliation] if the caches could not be rebuilt; the
///   tree is then renamed but reports itself as not reconciled
///
/// # Example
/// ```
/// use tipmap::config::RenameOptions;
/// use tipmap::rename::{MappingTable, apply};
///
/// let mut tree = tipmap::parse_newick_str("(A:1,B:2,(C:3,D:4):5);").unwrap();
/// let table: MappingTable = [("A", "A1"), ("C", "C1")].into_iter().collect();
///
/// let report = apply(&mut tree, &table, &RenameOptions::default()).unwrap();
/// assert_eq!(report.renamed, 2);
/// assert_eq!(tree.to_newick(), "(A1:1,B:2,(C1:3,D:4):5);");
/// ```
pub fn apply(
    tree: &mut Tree,
    table: &MappingTable,
    options: &RenameOptions,
) -> Result<RenameReport, RenameError> {
    let index = NameIndex::build(tree);

    if options.strict
        && let Some(name) = index.duplicates().first()
    {
        return Err(RenameError::DuplicateTipName { name: name.clone() });
    }

    let renames = resolve(&index, table)?;

    if options.strict {
        check_collisions(tree, &renames)?;
    }

    for &(node, new_name) in &renames {
        debug!("renaming tip {:?} to {:?}", tree[node].name(), new_name);
        tree.set_node_name(node, new_name);
    }

    reconcile(tree)?;

    Ok(RenameReport {
        renamed: renames.len(),
        num_tips: tree.tip_index().len(),
    })
}

/// Resolves every key of `table` to its tip, failing on the first unknown key.
fn resolve<'t>(
    index: &NameIndex,
    table: &'t MappingTable,
) -> Result<Vec<(NodeIndex, &'t str)>, RenameError> {
    table
        .iter()
        .map(|(old, new)| match index.lookup(old) {
            Some(node) => Ok((node, new)),
            None => Err(RenameError::UnknownTip {
                name: old.to_string(),
            }),
        })
        .collect()
}

/// Checks that no two tips carry the same name once `renames` are applied.
fn check_collisions(tree: &Tree, renames: &[(NodeIndex, &str)]) -> Result<(), RenameError> {
    let renamed: HashMap<NodeIndex, &str> = renames.iter().copied().collect();

    // final name → original name of the tip holding it
    let mut seen: HashMap<&str, &str> = HashMap::with_capacity(tree.num_tips());
    for tip in tree.tips() {
        let old = tip.name();
        let new = renamed.get(&tip.index()).copied().unwrap_or(old);
        if let Some(first) = seen.insert(new, old) {
            return Err(RenameError::NameCollision {
                name: new.to_string(),
                first: first.to_string(),
                second: old.to_string(),
            });
        }
    }
    Ok(())
}
