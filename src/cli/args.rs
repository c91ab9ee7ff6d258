// src/cli/args.rs
use clap::Parser;

#[derive(Parser, Debug, Default)]
#[command(no_binary_name = true)]
pub struct InitArgs {
    /// Do not ask for confirmation before overwriting an existing vault.
    #[arg(long, short)]
    pub yes: bool,
}

#[derive(Parser, Debug, Default)]
#[command(no_binary_name = true)]
pub struct AliasArgs {
    /// The site alias of the target environment (e.g. `@acme.prod`).
    pub alias: String,
}

/// For commands that take no arguments; rejects anything passed by mistake.
#[derive(Parser, Debug, Default)]
#[command(no_binary_name = true)]
pub struct NoArgs {}
