//! Tip renaming: mapping files, the rename engine, and the full command flow.
//!
//! # API
//! * [`MappingTable`] - reads `old<TAB>new` mapping files
//! * [`apply`] - renames the tips of one tree and reconciles its caches
//! * [`run`] - reads map and trees, renames every tree, writes the result

mod engine;
mod mapping;
mod rename_error;

pub use self::engine::{RenameReport, apply};
pub use self::mapping::MappingTable;
pub use self::rename_error::RenameError;

use crate::config::{RenameConfig, STDIN_ARG, STDOUT_ARG, TreeInput, TreeOutput};
use crate::model::Tree;
use crate::newick::{NewickParser, write_newick};
use crate::parser::ByteParser;
use crate::parser::buffered_byte_source::BufferedByteSource;
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::{debug, info};

/// Totals of one [run].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenameSummary {
    /// Number of trees renamed and written
    pub trees: usize,
    /// Number of tip names set, over all trees
    pub renamed: usize,
}

/// Runs the rename command described by `config`:
/// 1. reads the mapping file,
/// 2. reads all input trees,
/// 3. opens the output,
/// 4. renames every tree with the same mapping,
/// 5. writes the trees, one Newick string per line.
///
/// Stops at the first error; nothing is written if any tree fails to rename.
pub fn run(config: &RenameConfig) -> Result<RenameSummary, RenameError> {
    let table = MappingTable::from_file(&config.map_file)?;
    let mut trees = read_trees(&config.input)?;
    debug!("read {} tree(s) from {}", trees.len(), config.input);

    let (writer, target) = open_output(&config.output)?;

    let mut summary = RenameSummary::default();
    for tree in &mut trees {
        let report = apply(tree, &table, &config.options)?;
        summary.trees += 1;
        summary.renamed += report.renamed;
    }

    write_newick(writer, &trees).map_err(|e| RenameError::io(target, e))?;

    info!(
        "renamed {} tip(s) in {} tree(s) using {} mapping(s)",
        summary.renamed,
        summary.trees,
        table.len()
    );
    Ok(summary)
}

fn read_trees(input: &TreeInput) -> Result<Vec<Tree>, RenameError> {
    let mut parser = NewickParser::new();
    let (parsed, target) = match input {
        TreeInput::Stdin => {
            let source = BufferedByteSource::from_reader(io::stdin().lock());
            (parser.parse_all(ByteParser::new(source)), PathBuf::from(STDIN_ARG))
        }
        TreeInput::File(path) => {
            let source = BufferedByteSource::from_file(path).map_err(|e| RenameError::io(path, e))?;
            (parser.parse_all(ByteParser::new(source)), path.clone())
        }
    };

    // A failed read is reported against the input, not as malformed Newick
    parsed.map_err(|e| match e.into_io_error() {
        Ok(source) => RenameError::io(target, source),
        Err(e) => RenameError::Parse(e),
    })
}

fn open_output(output: &TreeOutput) -> Result<(Box<dyn Write>, PathBuf), RenameError> {
    match output {
        TreeOutput::Stdout => Ok((Box::new(io::stdout().lock()), PathBuf::from(STDOUT_ARG))),
        TreeOutput::File(path) => {
            let file = File::create(path).map_err(|e| RenameError::io(path, e))?;
            Ok((Box::new(file), path.clone()))
        }
    }
}
