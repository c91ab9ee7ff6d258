// src/cli/mod.rs

use clap::Parser;
use std::path::PathBuf;

pub mod args;
pub mod dispatcher;
pub mod handlers;

/// secrets-deploy: vault-backed secrets for every environment of a site.
///
/// Secrets live in an encrypted vault inside the repository (`secrets/`) and
/// are rendered onto an environment by a playbook, selected by site alias.
/// Run without a command to list the available commands.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(disable_help_subcommand = true)]
pub struct Cli {
    /// Repository root. Defaults to the nearest directory holding a
    /// `secrets-deploy.toml`, or the current directory.
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Print the commands that would change something instead of running them.
    #[arg(long)]
    pub dry_run: bool,

    /// The command to run (e.g. `deploy`, `simplesamlphp:diff`, `sedp`).
    pub command: Option<String>,

    /// Arguments for the command, such as the site alias.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}
