//! Reading of tab-separated rename mapping files.
//!
//! A mapping file is UTF-8 text without header, one rename per line:
//! current tip name, a tab, desired tip name.

use crate::rename::rename_error::RenameError;
use indexmap::IndexMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, warn};

/// Target reported for I/O errors on readers without a path
const READER_TARGET: &str = "<mapping reader>";

// =#========================================================================#=
// MAPPING TABLE
// =#========================================================================#=
/// Table of `old name → new name` pairs.
///
/// Iteration follows the order in which keys first appeared. A later line
/// with an already present key overwrites its value in place.
///
/// # Example
/// ```
/// use tipmap::rename::MappingTable;
///
/// let table = MappingTable::parse("Kiwi\tApteryx\nTui\tProsthemadera\n".as_bytes()).unwrap();
/// assert_eq!(table.len(), 2);
/// assert_eq!(table.get("Tui"), Some("Prosthemadera"));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MappingTable {
    entries: IndexMap<String, String>,
}

impl MappingTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a mapping from `path`.
    ///
    /// # Errors
    /// * [RenameError::Io] if the file cannot be opened or read
    /// * [RenameError::Format] on the first line without exactly two
    ///   tab-separated fields; no partial table is returned
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, RenameError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| RenameError::io(path, e))?;
        let table = Self::read_lines(BufReader::new(file), path)?;
        debug!("read {} mapping(s) from {}", table.len(), path.display());
        Ok(table)
    }

    /// Reads a mapping from any buffered reader; see [from_file](Self::from_file).
    pub fn parse<R: BufRead>(reader: R) -> Result<Self, RenameError> {
        Self::read_lines(reader, Path::new(READER_TARGET))
    }

    fn read_lines<R: BufRead>(reader: R, target: &Path) -> Result<Self, RenameError> {
        let mut table = MappingTable::new();

        for (i, line) in reader.lines().enumerate() {
            let line_number = i + 1;
            let line = line.map_err(|e| RenameError::io(target, e))?;

            let mut fields = line.split('\t');
            let (Some(old), Some(new), None) = (fields.next(), fields.next(), fields.next()) else {
                return Err(RenameError::Format { line: line_number });
            };

            if let Some(previous) = table.insert(old, new) {
                warn!(
                    "line {}: {:?} mapped again, replacing {:?} with {:?}",
                    line_number, old, previous, new
                );
            }
        }

        Ok(table)
    }

    /// Inserts a mapping; returns the replaced new name if `old` was present.
    pub fn insert<S: Into<String>, T: Into<String>>(&mut self, old: S, new: T) -> Option<String> {
        self.entries.insert(old.into(), new.into())
    }

    /// Returns the desired name for `old`, if mapped.
    pub fn get(&self, old: &str) -> Option<&str> {
        self.entries.get(old).map(String::as_str)
    }

    pub fn contains(&self, old: &str) -> bool {
        self.entries.contains_key(old)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(old, new)` pairs in order of first appearance.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<S: Into<String>, T: Into<String>> FromIterator<(S, T)> for MappingTable {
    fn from_iter<I: IntoIterator<Item = (S, T)>>(iter: I) -> Self {
        let mut table = MappingTable::new();
        for (old, new) in iter {
            table.insert(old, new);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crlf_line_endings() {
        let table = MappingTable::parse("A\tA1\r\nB\tB1\r\n".as_bytes()).unwrap();
        assert_eq!(table.get("A"), Some("A1"));
        assert_eq!(table.get("B"), Some("B1"));
    }

    #[test]
    fn test_empty_fields_are_kept() {
        let table = MappingTable::parse("\tunnamed\nA\t\n".as_bytes()).unwrap();
        assert_eq!(table.get(""), Some("unnamed"));
        assert_eq!(table.get("A"), Some(""));
    }

    #[test]
    fn test_from_iter_keeps_first_order() {
        let table: MappingTable = [("B", "1"), ("A", "2"), ("B", "3")].into_iter().collect();
        let pairs: Vec<_> = table.iter().collect();
        assert_eq!(pairs, vec![("B", "3"), ("A", "2")]);
    }
}
