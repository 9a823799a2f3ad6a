//! Command-line interface of tipmap.
//!
//! Renames tips of Newick trees given a tab-separated map file.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tipmap::config::{RenameConfig, RenameOptions, STDIN_ARG, STDOUT_ARG, TreeInput, TreeOutput};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tipmap")]
#[command(version, about = "Manipulate tip names of phylogenetic trees", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Renames tips of the input trees, given a map file
    #[command(long_about = "Renames tips of the input trees, given a map file.

Map file must be tab separated with columns:
1) Current name of the tip
2) Desired new name of the tip

If a tip name does not appear in the map file, it will not be renamed.
If a name that does not exist appears in the map file, it will throw an error.")]
    Rename(RenameArgs),
}

#[derive(Args)]
struct RenameArgs {
    /// Input tree(s) file
    #[arg(short, long, default_value = STDIN_ARG)]
    input: String,

    /// Renamed tree(s) output file
    #[arg(short, long, default_value = STDOUT_ARG)]
    output: String,

    /// Tip name map file
    #[arg(short, long = "map")]
    map: PathBuf,

    /// Reject duplicate tip names and mappings that would create them
    #[arg(long)]
    strict: bool,
}

impl From<RenameArgs> for RenameConfig {
    fn from(args: RenameArgs) -> Self {
        RenameConfig::new(args.map)
            .with_input(TreeInput::from_arg(&args.input))
            .with_output(TreeOutput::from_arg(&args.output))
            .with_options(RenameOptions {
                strict: args.strict,
            })
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG overrides the level chosen by --verbose
    let log_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Rename(args) => {
            let config = RenameConfig::from(args);
            tipmap::rename::run(&config).with_context(|| {
                format!(
                    "failed to rename trees from {} with map {}",
                    config.input,
                    config.map_file.display()
                )
            })?;
        }
    }

    Ok(())
}
