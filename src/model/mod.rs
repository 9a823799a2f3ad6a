//! Data model for phylogenetic trees of arbitrary degree.
//!
//! # Tree representation
//! Trees are represented by [Tree], which uses the arena pattern to store
//! [Node]s and [Edge]s, referenced by [NodeIndex] and [EdgeIndex].
//! A node is a *tip* iff it has exactly one incident edge.
//!
//! # Derived state
//! Two caches are derived from names and topology and owned by the tree:
//!
//! | Cache | Purpose |
//! |-------|---------|
//! | [TipIndex] | Tip → position assignment, gap-free |
//! | Edge [Bitset]s | Bipartition of tips induced by each edge |
//!
//! Both become stale as soon as a name changes (see [CacheState]) and are
//! rebuilt by [reconcile].
//!
//! A third, external view is the [NameIndex]: an ephemeral tip name → node
//! lookup built on demand, e.g. by the rename engine.

pub mod bitset;
pub mod edge;
pub mod name_index;
pub mod node;
pub mod reconcile;
pub mod tip_index;
pub mod tree;
pub mod tree_error;

pub use bitset::Bitset;
pub use edge::{BranchLength, Edge, EdgeIndex};
pub use name_index::NameIndex;
pub use node::{Node, NodeIndex};
pub use reconcile::reconcile;
pub use tip_index::{TipIndex, TipPosition};
pub use tree::{CacheState, Tree};
pub use tree_error::TreeError;
