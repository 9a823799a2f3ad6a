//! Configuration of the rename command.
//!
//! The CLI converts its arguments once into a [RenameConfig], which is then
//! passed by reference to [run](crate::rename::run).

use std::fmt;
use std::path::PathBuf;

/// Argument value that selects standard input
pub const STDIN_ARG: &str = "stdin";

/// Argument value that selects standard output
pub const STDOUT_ARG: &str = "stdout";

/// Where input trees are read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeInput {
    Stdin,
    File(PathBuf),
}

impl TreeInput {
    /// Maps `"stdin"` to [TreeInput::Stdin], anything else to a file path.
    pub fn from_arg(arg: &str) -> Self {
        if arg == STDIN_ARG {
            TreeInput::Stdin
        } else {
            TreeInput::File(PathBuf::from(arg))
        }
    }
}

impl fmt::Display for TreeInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeInput::Stdin => write!(f, "{}", STDIN_ARG),
            TreeInput::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Where renamed trees are written to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeOutput {
    Stdout,
    File(PathBuf),
}

impl TreeOutput {
    /// Maps `"stdout"` to [TreeOutput::Stdout], anything else to a file path.
    pub fn from_arg(arg: &str) -> Self {
        if arg == STDOUT_ARG {
            TreeOutput::Stdout
        } else {
            TreeOutput::File(PathBuf::from(arg))
        }
    }
}

impl fmt::Display for TreeOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeOutput::Stdout => write!(f, "{}", STDOUT_ARG),
            TreeOutput::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Behavioural switches of [apply](crate::rename::apply).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenameOptions {
    /// Reject trees with duplicate tip names and mappings that would create them
    pub strict: bool,
}

/// Complete configuration of one rename run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameConfig {
    pub input: TreeInput,
    pub output: TreeOutput,
    pub map_file: PathBuf,
    pub options: RenameOptions,
}

impl RenameConfig {
    /// Creates a configuration reading standard input and writing standard
    /// output, with default options.
    pub fn new<P: Into<PathBuf>>(map_file: P) -> Self {
        RenameConfig {
            input: TreeInput::Stdin,
            output: TreeOutput::Stdout,
            map_file: map_file.into(),
            options: RenameOptions::default(),
        }
    }

    pub fn with_input(mut self, input: TreeInput) -> Self {
        self.input = input;
        self
    }

    pub fn with_output(mut self, output: TreeOutput) -> Self {
        self.output = output;
        self
    }

    pub fn with_options(mut self, options: RenameOptions) -> Self {
        self.options = options;
        self
    }
}
