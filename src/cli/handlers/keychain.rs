// src/cli/handlers/keychain.rs

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::fs;

use super::commons::{self, HandlerContext};
use crate::{
    cli::args::NoArgs,
    constants::PROJECT_CONFIG_FILENAME,
    core::{error::SecretsError, vault_password::keychain_marker_path},
    system::keychain,
};

fn vault_id(ctx: &HandlerContext<'_>) -> Result<String, SecretsError> {
    ctx.project.vault_id().ok_or_else(|| {
        SecretsError::Config(format!(
            "'project.machine_name' must be set in {PROJECT_CONFIG_FILENAME} to use the keychain."
        ))
    })
}

/// The main handler for the `keychain-init` command.
/// Stores the vault password in the keychain and marks the project so every
/// later vault operation reads it from there.
pub fn handle_init(args: Vec<String>, ctx: &HandlerContext<'_>) -> Result<()> {
    NoArgs::try_parse_from(&args)?;
    let id = vault_id(ctx)?;

    println!("Enter the vault password to store it as '{}'.", keychain::password_label(&id).cyan());
    ctx.run(&keychain::add_password(&id))?;

    let marker = keychain_marker_path(&ctx.project.root);
    if ctx.dry_run {
        commons::announce_dry_run(&format!("create '{}'", marker.display()));
        return Ok(());
    }
    fs::create_dir_all(ctx.project.secrets_dir())
        .with_context(|| format!("Could not create '{}'.", ctx.project.secrets_dir().display()))?;
    fs::write(&marker, "")
        .with_context(|| format!("Could not write the keychain marker '{}'.", marker.display()))?;
    log::info!("Keychain marker written to '{}'", marker.display());

    println!("{}", "The vault password will now be read from the keychain.".green());
    Ok(())
}

/// The main handler for the `vault-password` command.
pub fn handle_password(args: Vec<String>, ctx: &HandlerContext<'_>) -> Result<()> {
    NoArgs::try_parse_from(&args)?;
    let id = vault_id(ctx)?;

    let output = ctx
        .runner
        .capture(&keychain::find_password(&id), &ctx.project.root)
        .map_err(SecretsError::from)?;
    println!("{}", output.trim_end());
    Ok(())
}
