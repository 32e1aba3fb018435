use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Rubicon - project settings for Ruby IDEs
#[derive(Parser, Debug)]
#[command(name = "rubicon")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Project directory (defaults to the nearest enclosing project)
    #[arg(long, global = true, value_name = "DIR")]
    pub project: Option<PathBuf>,

    /// Machine-readable JSON output
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the project's compilation and run settings
    Show,

    /// Validate settings and report warnings and errors
    Validate,

    /// Scan for installed Ruby toolchains and list them
    Toolchains,

    /// Select the toolchain to compile with
    SelectToolchain {
        /// Toolchain id, e.g. `ruby-3.2.2`
        id: String,
    },

    /// Clear the toolchain selection
    ClearToolchain,

    /// Append a search path
    AddPath {
        /// Path as it should be stored (relative paths are project-relative)
        path: String,
    },

    /// Remove the search path at INDEX
    RemovePath {
        index: usize,
    },

    /// Move a search path from one position to another
    MovePath {
        from: usize,
        to: usize,
    },

    /// Set the output file name
    SetOutput {
        name: String,
    },

    /// Set the output file name from a chosen file path (keeps the file name)
    ChooseOutput {
        path: PathBuf,
    },

    /// Set the main file to run
    SetMain {
        file: String,
    },

    /// Set the program arguments (replaces existing ones)
    SetArgs {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Set the working directory for runs (empty means the project root)
    SetWorkdir {
        dir: String,
    },
}
