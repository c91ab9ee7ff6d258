// src/cli/handlers/commons.rs

// This module contains shared functions used by multiple handlers.

use anyhow::Result;
use colored::Colorize;
use dialoguer::{Confirm, theme::ColorfulTheme};
use std::path::Path;

use crate::{
    core::{
        config_loader::Project,
        error::SecretsError,
    },
    models::SecretsDomain,
    system::executor::{CommandLine, ProcessRunner},
};

/// What every handler gets besides its own arguments.
pub struct HandlerContext<'a> {
    pub project: &'a Project,
    pub domain: &'static SecretsDomain,
    pub runner: &'a dyn ProcessRunner,
    /// Filesystem changes are only announced, like the commands of the dry-run runner.
    pub dry_run: bool,
}

impl std::fmt::Debug for HandlerContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerContext")
            .field("root", &self.project.root)
            .field("domain", &self.domain.name)
            .field("dry_run", &self.dry_run)
            .finish()
    }
}

impl HandlerContext<'_> {
    /// Echoes a command and runs it from the project root.
    pub fn run(&self, command: &CommandLine) -> Result<()> {
        println!("{} {}", "→".blue(), command.display().green());
        self.runner
            .run(command, &self.project.root)
            .map_err(SecretsError::from)?;
        Ok(())
    }
}

/// Fails with a remediation hint when an expected file is absent.
pub fn require_file(path: &Path, hint: impl Into<String>) -> Result<(), SecretsError> {
    if path.is_file() {
        Ok(())
    } else {
        Err(SecretsError::MissingFile {
            path: path.to_path_buf(),
            hint: hint.into(),
        })
    }
}

/// Asks a yes/no question; `false` is the default answer.
pub fn confirm(prompt: &str) -> Result<bool> {
    Ok(Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .default(false)
        .interact()?)
}

/// Prints the message a dry run shows instead of touching the filesystem.
pub fn announce_dry_run(action: &str) {
    println!("{} {}", "(dry run)".dimmed(), action);
}
