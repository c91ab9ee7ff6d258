// src/bin/secrets-deploy.rs

use clap::Parser;
use colored::*;
use secrets_deploy::cli::{Cli, dispatcher};

/// The main entry point of the `secrets-deploy` application.
/// Sets up logging, parses arguments and reports any failure in one place.
fn main() {
    env_logger::init();

    if let Err(e) = dispatcher::run_cli(Cli::parse()) {
        // `{:#}` keeps the context chain, e.g. "Could not open ...: No such file".
        eprintln!("\n{}: {:#}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}
