//! Tipmap renames the tips of phylogenetic trees and keeps the trees'
//! derived structures consistent.
//!
//! Core functionality provided:
//! - Model: arena-based [Tree] of arbitrary degree, owning a [TipIndex]
//!   (tip name → position) and a bipartition [Bitset] per edge.
//! - Newick: parse any number of Newick strings from a string, file, or
//!   reader, and write trees back out.
//! - Renaming: read tab-separated [MappingTable]s, resolve their keys
//!   through a [NameIndex] over tips only, set the new names, and reconcile
//!   the tip index and bipartitions afterwards.
//!
//! The binary wraps this as `tipmap rename -i <trees> -o <out> -m <map>`.
//!
//! # Example
//! ```
//! use tipmap::{parse_newick_str, rename_tips};
//! use tipmap::rename::MappingTable;
//!
//! let mut tree = parse_newick_str("(A:1,B:2,(C:3,D:4):5);").unwrap();
//! let table = MappingTable::parse("A\tA1\nC\tC1\n".as_bytes()).unwrap();
//!
//! rename_tips(&mut tree, &table).unwrap();
//! assert_eq!(tree.to_newick(), "(A1:1,B:2,(C1:3,D:4):5);");
//! assert!(tree.caches_consistent());
//! ```
//!
//! [Tree]: model::Tree
//! [TipIndex]: model::TipIndex
//! [Bitset]: model::Bitset
//! [NameIndex]: model::NameIndex
//! [MappingTable]: rename::MappingTable

pub mod config;
pub mod model;
pub mod newick;
pub mod parser;
pub mod rename;

use crate::config::RenameOptions;
use crate::model::Tree;
use crate::parser::ParsingError;
use crate::rename::{MappingTable, RenameError, RenameReport};
use std::path::Path;

// ============================================================================
// QUICK API (pub)
// ============================================================================
/// Parses a single Newick string into a reconciled [Tree].
/// See [newick::parse_str].
pub fn parse_newick_str<S: AsRef<str>>(newick: S) -> Result<Tree, ParsingError> {
    newick::parse_str(newick)
}

/// Parses all Newick trees of a file. See [newick::parse_file].
pub fn parse_newick_file<P: AsRef<Path>>(path: P) -> Result<Vec<Tree>, ParsingError> {
    newick::parse_file(path)
}

/// Reads a tab-separated mapping file. See [MappingTable::from_file].
pub fn read_mapping_file<P: AsRef<Path>>(path: P) -> Result<MappingTable, RenameError> {
    MappingTable::from_file(path)
}

/// Renames tips of `tree` with default options. See [rename::apply].
pub fn rename_tips(tree: &mut Tree, table: &MappingTable) -> Result<RenameReport, RenameError> {
    rename::apply(tree, table, &RenameOptions::default())
}
