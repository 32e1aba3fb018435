//! Rubicon CLI - project settings for Ruby IDEs
//!
//! Usage: rubicon [--project DIR] [--json] [-v] <COMMAND>
//!
//! Commands:
//!   show              Show compilation and run settings
//!   validate          Report warnings and errors
//!   toolchains        List installed Ruby toolchains
//!   select-toolchain  Choose the toolchain to compile with
//!   add-path          Append a search path (and remove-path, move-path)
//!   set-output        Set the output file name (or choose-output)
//!   set-main          Set the main file (and set-args, set-workdir)

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use cli::{Cli, Commands};
use commands::edit::{cmd_edit, Edit};
use commands::inspect::{cmd_show, cmd_toolchains, cmd_validate};

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    rubicon::logging::init(cli.verbose);

    let project = cli.project.as_deref();
    let json = cli.json;

    let edit = match cli.command {
        Commands::Show => return cmd_show(project, json),
        Commands::Validate => return cmd_validate(project, json),
        Commands::Toolchains => return cmd_toolchains(project, json),
        Commands::SelectToolchain { id } => Edit::SelectToolchain(id),
        Commands::ClearToolchain => Edit::ClearToolchain,
        Commands::AddPath { path } => Edit::AddPath(path),
        Commands::RemovePath { index } => Edit::RemovePath(index),
        Commands::MovePath { from, to } => Edit::MovePath { from, to },
        Commands::SetOutput { name } => Edit::SetOutput(name),
        Commands::ChooseOutput { path } => Edit::ChooseOutput(path),
        Commands::SetMain { file } => Edit::SetMain(file),
        Commands::SetArgs { args } => Edit::SetArgs(args),
        Commands::SetWorkdir { dir } => Edit::SetWorkdir(dir),
    };
    cmd_edit(project, edit, json)
}
