//! Error type for maintaining derived tree caches.

use thiserror::Error;

/// Errors raised while rebuilding the derived caches of a
/// [Tree](crate::model::Tree).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TreeError {
    /// Tree has edges but no root, so no stable tip order exists.
    #[error("tree has edges but no root")]
    RootNotSet,

    /// Bipartitions were cleared while the tip index still reflects old names.
    #[error("tip index is stale, rebuild it before clearing bitsets")]
    TipIndexStale,
}
