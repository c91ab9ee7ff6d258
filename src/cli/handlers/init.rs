// src/cli/handlers/init.rs

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::fs;

use super::commons::{self, HandlerContext};
use crate::{
    cli::args::InitArgs,
    constants::{COMMON_OVERRIDE_DIR, GITIGNORE_FILENAME},
    system::ansible,
};

/// The main handler for the `init` command.
/// Copies the template and `.gitignore` into `secrets/` and creates a fresh
/// encrypted vault from the bundled skeleton.
pub fn handle(args: Vec<String>, ctx: &HandlerContext<'_>) -> Result<()> {
    let init_args = InitArgs::try_parse_from(&args)?;
    let project = ctx.project;
    let domain = ctx.domain;

    if !init_args.yes
        && !commons::confirm(
            "Are you sure you want to initialise? This will overwrite any existing encrypted vaults",
        )?
    {
        println!("{}", "Initialisation cancelled.".yellow());
        return Ok(());
    }

    // 1. Every source must be there before anything is written.
    let assets_hint = format!(
        "Missing bundled assets are restored into '{}' on the next run; check 'secrets.assets_dir' in secrets-deploy.toml.",
        project.assets_dir.display()
    );
    let template_source = project.assets_dir.join(domain.template_file_name());
    let gitignore_source = project.assets_dir.join(GITIGNORE_FILENAME);
    let vault_source = project.assets_dir.join(domain.vault_source_file_name());
    for source in [&template_source, &gitignore_source, &vault_source] {
        commons::require_file(source, assets_hint.clone())?;
    }

    // 2. Copy the templates and prepare the override tree.
    let secrets_dir = project.secrets_dir();
    let template_target = project.template_path(domain);
    let gitignore_target = secrets_dir.join(GITIGNORE_FILENAME);
    let common_dir = project.files_dir().join(COMMON_OVERRIDE_DIR);

    if ctx.dry_run {
        commons::announce_dry_run(&format!(
            "copy '{}' and '{}' into '{}', create '{}'",
            template_source.display(),
            gitignore_source.display(),
            secrets_dir.display(),
            common_dir.display()
        ));
    } else {
        fs::create_dir_all(&common_dir)
            .with_context(|| format!("Could not create '{}'.", common_dir.display()))?;
        for (source, target) in [
            (&template_source, &template_target),
            (&gitignore_source, &gitignore_target),
        ] {
            log::debug!("Copying '{}' to '{}'", source.display(), target.display());
            fs::copy(source, target).with_context(|| {
                format!("Could not initialize secrets configuration: copying to '{}' failed.", target.display())
            })?;
        }
    }

    // 3. Encrypt the vault skeleton into the repository.
    ctx.run(&ansible::encrypt_to(&vault_source, &project.vault_path(domain)))?;

    println!("\n{}", "A new vault and template were copied to your repository.".green());
    println!("Run '{}' to edit your vault.", domain.edit_command.cyan());
    Ok(())
}
