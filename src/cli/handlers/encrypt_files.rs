// src/cli/handlers/encrypt_files.rs

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::commons::HandlerContext;
use crate::{
    cli::args::NoArgs,
    constants::VAULT_HEADER,
    core::{error::SecretsResult, vault_password::VaultPassword},
    system::ansible,
};

/// The main handler for the `encrypt-files` command.
/// Encrypts in place every override file that is still plain text.
pub fn handle(args: Vec<String>, ctx: &HandlerContext<'_>) -> Result<()> {
    NoArgs::try_parse_from(&args)?;
    let project = ctx.project;

    let files_dir = project.files_dir();
    let files = find_unencrypted(&files_dir)
        .with_context(|| format!("Could not scan '{}' for unencrypted files.", files_dir.display()))?;
    if files.is_empty() {
        println!("{}", "There are no unencrypted files to encrypt.".yellow());
        return Ok(());
    }

    println!("Encrypting {} file(s):", files.len());
    for file in &files {
        println!("  {}", file.display());
    }
    let password = VaultPassword::detect(&project.root, &project.assets_dir);
    ctx.run(&ansible::encrypt_in_place(&files, &password))
}

/// Every regular file below `files_root` that does not start with the vault header.
/// Any entry that cannot be read aborts the scan, so no plain file is skipped silently.
fn find_unencrypted(files_root: &Path) -> SecretsResult<Vec<PathBuf>> {
    if !files_root.is_dir() {
        log::debug!("'{}' does not exist, nothing to encrypt.", files_root.display());
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(files_root)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = entry.map_err(io::Error::from)?;
        if !entry.file_type().is_file() {
            continue;
        }
        if is_encrypted(entry.path())? {
            log::trace!("'{}' is already encrypted", entry.path().display());
        } else {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

fn is_encrypted(path: &Path) -> io::Result<bool> {
    let mut header = Vec::with_capacity(VAULT_HEADER.len());
    File::open(path)?
        .take(VAULT_HEADER.len() as u64)
        .read_to_end(&mut header)?;
    Ok(header == VAULT_HEADER.as_bytes())
}
