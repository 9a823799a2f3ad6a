//! Newick format parser and writer for phylogenetic trees.
//!
//! This module provides [`NewickParser`] to parse Newick format strings
//! into [`Tree`]s of arbitrary degree, and [`to_newick`] / [`write_newick`]
//! to serialize them again.
//!
//! # Quick API
//! For simple use cases with default settings:
//! * [`parse_file`] - parses all trees of a file
//! * [`parse_str`] - parses a single string
//!
//! # Full API
//! For more control, configure a [`NewickParser`] and provide a [`ByteParser`]:
//! * [`NewickParser::parse_str`] - parse a single tree
//! * [`NewickParser::parse_all`] - parse all trees until EOF
//! * [`NewickParser::into_iter`] - obtain an iterator over trees
//!
//! # Format
//! The accepted grammar:
//! * `tree ::= subtree ';'`
//! * `subtree ::= '(' subtree (',' subtree)* ')' [label] [branch_length] | label [branch_length]`
//! * `branch_length ::= ':' number`
//!
//! Furthermore:
//! * Whitespace can occur between elements,
//!   just not within an unquoted label or a branch_length
//! * Labels may be single-quoted, with `''` for a literal quote
//! * Comments are square brackets and can occur anywhere where whitespace is allowed
//! * A tree may be a single labelled node, e.g. `Kiwi;`; an unlabelled one is rejected
//! * Nesting depth is limited by memory only

mod defs;
mod parser;
mod writer;

pub use self::parser::{NewickIterator, NewickParser};
pub use self::writer::{to_newick, write_newick};

use crate::model::Tree;
use crate::parser::ParsingError;
use crate::parser::byte_parser::ByteParser;
use std::path::Path;

// ============================================================================
// QUICK PARSING API (pub)
// ============================================================================
/// Parses a Newick file eagerly and returns all trees.
///
/// The file may hold any number of Newick strings, on the same line or
/// across multiple lines; `[...]` comments and whitespace are fine.
///
/// # Errors
/// [`ParsingError`] if file reading fails or the Newick format is invalid.
///
/// # Example
/// ```ignore
/// use tipmap::newick::parse_file;
///
/// let trees = parse_file("rails.nwk")?;
/// println!("Parsed {} trees", trees.len());
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Vec<Tree>, ParsingError> {
    let byte_parser = ByteParser::from_file_buffered(path)?;
    NewickParser::new().parse_all(byte_parser)
}

/// Parses a single Newick string into a reconciled [`Tree`].
///
/// # Example
/// ```
/// use tipmap::newick::parse_str;
///
/// let tree = parse_str("(Takahe,(Weka,Pukeko)Rallidae);").unwrap();
/// assert_eq!(tree.num_tips(), 3);
/// ```
pub fn parse_str<S: AsRef<str>>(newick: S) -> Result<Tree, ParsingError> {
    let mut byte_parser = ByteParser::for_str(newick.as_ref());
    NewickParser::new().parse_str(&mut byte_parser)
}
