// src/cli/handlers/append_config.rs

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use colored::Colorize;
use std::fs::OpenOptions;
use std::io::Write;

use super::commons::{self, HandlerContext};
use crate::{
    cli::args::NoArgs,
    constants::REMOTE_FILES_BASE,
    core::paths,
};

/// PHP that includes the local secrets file when present, otherwise the one
/// deployed to the environment's files directory.
fn include_snippet(local_include: &str, secrets_file_name: &str) -> String {
    let remote = format!(
        "'{REMOTE_FILES_BASE}/' . getenv('AH_SITE_GROUP') . '.' . getenv('AH_SITE_ENVIRONMENT') . '/{secrets_file_name}'"
    );
    format!(
        "\nif (file_exists('{local_include}')) {{\n  include '{local_include}';\n}}\nelseif (file_exists({remote})) {{\n  include {remote};\n}}\n"
    )
}

/// The main handler for the `append-config` command.
pub fn handle(args: Vec<String>, ctx: &HandlerContext<'_>) -> Result<()> {
    NoArgs::try_parse_from(&args)?;
    let project = ctx.project;
    let domain = ctx.domain;
    let target = domain
        .include_target
        .ok_or_else(|| anyhow!("The '{}' secrets have no config to include them in.", domain.name))?;

    let config_file = project.root.join(target.config_file);
    commons::require_file(
        &config_file,
        format!("It is created by {}, run that first.", target.setup_hint),
    )?;

    let local_include = paths::relative_path(
        &project.root.join(target.include_base),
        &project.local_secrets_path(domain),
    );
    let snippet = include_snippet(
        &local_include.to_string_lossy().replace('\\', "/"),
        domain.secrets_file_name,
    );

    if ctx.dry_run {
        commons::announce_dry_run(&format!(
            "append to '{}':\n{}",
            config_file.display(),
            snippet
        ));
        return Ok(());
    }

    let mut file = OpenOptions::new()
        .append(true)
        .open(&config_file)
        .with_context(|| format!("Could not open '{}' for writing.", config_file.display()))?;
    file.write_all(snippet.as_bytes())
        .with_context(|| format!("Could not append to '{}'.", config_file.display()))?;

    println!(
        "{}",
        format!(
            "The secrets include was appended to '{}'. You may need to edit the file manually.",
            target.config_file
        )
        .green()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        cli::handlers::commons::testing::{project, write},
        core::error::SecretsError,
        models::{SIMPLESAMLPHP_SECRETS, SITE_SECRETS},
        system::executor::testing::RecordingRunner,
    };
    use std::fs;

    #[test]
    fn test_snippet_is_appended_after_existing_config() {
        let (dir, project) = project();
        write(dir.path(), "simplesamlphp/config/acquia_config.php", "<?php\n$config = [];\n");
        let runner = RecordingRunner::default();
        let ctx = HandlerContext {
            project: &project,
            domain: &SIMPLESAMLPHP_SECRETS,
            runner: &runner,
            dry_run: false,
        };

        handle(Vec::new(), &ctx).unwrap();

        let content =
            fs::read_to_string(dir.path().join("simplesamlphp/config/acquia_config.php")).unwrap();
        assert!(content.starts_with("<?php\n$config = [];\n"));
        assert!(content.contains(
            "if (file_exists('../../../../scripts/simplesamlphp/secrets.php.local')) {"
        ));
        assert!(content.contains(
            "'/mnt/files/' . getenv('AH_SITE_GROUP') . '.' . getenv('AH_SITE_ENVIRONMENT') . '/simplesamlphp.secrets.php'"
        ));
        assert!(runner.runs.borrow().is_empty());
    }

    #[test]
    fn test_missing_config_suggests_setup() {
        let (dir, project) = project();
        let runner = RecordingRunner::default();
        let ctx = HandlerContext {
            project: &project,
            domain: &SIMPLESAMLPHP_SECRETS,
            runner: &runner,
            dry_run: false,
        };

        let err = handle(Vec::new(), &ctx).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SecretsError>(),
            Some(SecretsError::MissingFile { .. })
        ));
        let message = err.to_string();
        assert!(message.contains("SimpleSAMLphp recipe"));
        assert!(message.contains("blt recipes:simplesamlphp:init"));
        assert!(!dir.path().join("simplesamlphp").exists());
    }

    #[test]
    fn test_site_domain_has_no_include_target() {
        let (_dir, project) = project();
        let runner = RecordingRunner::default();
        let ctx = HandlerContext {
            project: &project,
            domain: &SITE_SECRETS,
            runner: &runner,
            dry_run: false,
        };
        assert!(handle(Vec::new(), &ctx).is_err());
    }
}
