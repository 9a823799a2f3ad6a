//! Error type of the rename command.

use crate::model::TreeError;
use crate::parser::ParsingError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading a mapping file or renaming tips.
#[derive(Error, Debug)]
pub enum RenameError {
    /// A mapping line does not consist of exactly two tab-separated fields.
    #[error("map file does not have 2 fields at line: {line}")]
    Format { line: usize },

    /// Opening, reading, or writing a file or stream failed.
    #[error("io error on {}: {source}", .target.display())]
    Io {
        target: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A mapping key does not name any tip of the tree.
    #[error("the node {name} does not exist in the tree")]
    UnknownTip { name: String },

    /// Rebuilding the derived caches after renaming failed.
    #[error("reconciliation failed: {0}")]
    Reconciliation(#[from] TreeError),

    /// The input trees are not valid Newick.
    #[error("tree parsing failed: {0}")]
    Parse(#[from] ParsingError),

    /// Strict mode: the tree holds several tips with this name.
    #[error("tip name {name} occurs more than once in the tree")]
    DuplicateTipName { name: String },

    /// Strict mode: renaming would give two tips the same name.
    #[error("renaming {first} and {second} would both yield tip name {name}")]
    NameCollision {
        name: String,
        first: String,
        second: String,
    },
}

impl RenameError {
    /// Wraps an I/O error together with the file or stream it occurred on.
    pub fn io<P: Into<PathBuf>>(target: P, source: std::io::Error) -> Self {
        RenameError::Io {
            target: target.into(),
            source,
        }
    }
}
