// src/cli/handlers/edit.rs

use anyhow::Result;
use clap::Parser;

use super::commons::{self, HandlerContext};
use crate::{cli::args::NoArgs, core::vault_password::VaultPassword, system::ansible};

/// The main handler for the `edit` command.
pub fn handle(args: Vec<String>, ctx: &HandlerContext<'_>) -> Result<()> {
    NoArgs::try_parse_from(&args)?;
    let project = ctx.project;

    let vault = project.vault_path(ctx.domain);
    commons::require_file(
        &vault,
        format!("Run '{}' to create it.", ctx.domain.init_command),
    )?;

    let password = VaultPassword::detect(&project.root, &project.assets_dir);
    ctx.run(&ansible::edit(&vault, &password))
}
