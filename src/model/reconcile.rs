//! Structural reconciliation of the derived caches of a [Tree].

use crate::model::tree::Tree;
use crate::model::tree_error::TreeError;
use tracing::trace;

/// Rebuilds the derived caches of `tree` after a name mutation:
/// tip index first, then clearing every bipartition, then recomputing them.
///
/// Runs unconditionally, even though renaming never changes topology or the
/// number of tips; consumers may key on names through the tip index.
///
/// # Errors
/// Returns [TreeError] if clearing the bitsets fails. The tree is then left
/// in a non-reconciled [CacheState](crate::model::CacheState), which
/// [Tree::is_reconciled] reports.
pub fn reconcile(tree: &mut Tree) -> Result<(), TreeError> {
    tree.update_tip_index();
    trace!("rebuilt tip index with {} tips", tree.tip_index().len());

    tree.clear_bitsets()?;
    tree.update_bitsets();
    trace!("recomputed bipartitions of {} edges", tree.num_edges());

    Ok(())
}
