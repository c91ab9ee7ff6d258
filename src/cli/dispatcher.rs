// src/cli/dispatcher.rs

use anyhow::{Result, anyhow};
use colored::*;

use crate::{
    cli::{
        Cli,
        handlers::{self, commons::HandlerContext},
    },
    core::{assets, config_loader::Project, paths},
    models::{SIMPLESAMLPHP_SECRETS, SITE_SECRETS, SecretsDomain},
    system::executor::{DryRunRunner, ProcessRunner, SystemRunner},
};

// --- Command Definition and Registry ---

/// Defines a command, its aliases, the secrets domain it works on and its handler.
pub struct CommandDefinition {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub domain: &'static SecretsDomain,
    pub summary: &'static str,
    pub handler: fn(Vec<String>, &HandlerContext<'_>) -> Result<()>,
}

/// The single source of truth for all commands.
pub static COMMAND_REGISTRY: &[CommandDefinition] = &[
    CommandDefinition {
        name: "init",
        aliases: &["vault:init"],
        domain: &SITE_SECRETS,
        summary: "Copy the templates and create a new encrypted vault.",
        handler: handlers::init::handle,
    },
    CommandDefinition {
        name: "keychain-init",
        aliases: &["keychain:init"],
        domain: &SITE_SECRETS,
        summary: "Store the vault password in the keychain and use it from now on.",
        handler: handlers::keychain::handle_init,
    },
    CommandDefinition {
        name: "vault-password",
        aliases: &["vault:password"],
        domain: &SITE_SECRETS,
        summary: "Print the vault password stored in the keychain.",
        handler: handlers::keychain::handle_password,
    },
    CommandDefinition {
        name: "edit",
        aliases: &["seed"],
        domain: &SITE_SECRETS,
        summary: "Edit the vault.",
        handler: handlers::edit::handle,
    },
    CommandDefinition {
        name: "encrypt-files",
        aliases: &["encryptfiles", "enfl"],
        domain: &SITE_SECRETS,
        summary: "Encrypt every ad-hoc file under secrets/files that is not encrypted yet.",
        handler: handlers::encrypt_files::handle,
    },
    CommandDefinition {
        name: "diff",
        aliases: &["sedf"],
        domain: &SITE_SECRETS,
        summary: "Show what a deploy would change on an environment.",
        handler: handlers::playbook::handle_diff,
    },
    CommandDefinition {
        name: "deploy",
        aliases: &["sedp"],
        domain: &SITE_SECRETS,
        summary: "Deploy the secrets to an environment.",
        handler: handlers::playbook::handle_deploy,
    },
    CommandDefinition {
        name: "simplesamlphp:init",
        aliases: &["simplesamlphp:vault:init"],
        domain: &SIMPLESAMLPHP_SECRETS,
        summary: "Create the SimpleSAMLphp vault.",
        handler: handlers::init::handle,
    },
    CommandDefinition {
        name: "simplesamlphp:edit",
        aliases: &["sesed"],
        domain: &SIMPLESAMLPHP_SECRETS,
        summary: "Edit the SimpleSAMLphp vault.",
        handler: handlers::edit::handle,
    },
    CommandDefinition {
        name: "simplesamlphp:diff",
        aliases: &["sesdf"],
        domain: &SIMPLESAMLPHP_SECRETS,
        summary: "Show what a SimpleSAMLphp secrets deploy would change.",
        handler: handlers::playbook::handle_diff,
    },
    CommandDefinition {
        name: "simplesamlphp:deploy",
        aliases: &["sesdp"],
        domain: &SIMPLESAMLPHP_SECRETS,
        summary: "Deploy the SimpleSAMLphp secrets to an environment.",
        handler: handlers::playbook::handle_deploy,
    },
    CommandDefinition {
        name: "simplesamlphp:append-config",
        aliases: &["append-config", "simplesamlphp:acquia_config:include", "sesaci"],
        domain: &SIMPLESAMLPHP_SECRETS,
        summary: "Append the secrets include to the SimpleSAMLphp config.",
        handler: handlers::append_config::handle,
    },
];

/// Finds a command definition in the registry by its name or alias.
pub fn find_command(name: &str) -> Option<&'static CommandDefinition> {
    COMMAND_REGISTRY
        .iter()
        .find(|cmd| cmd.name == name || cmd.aliases.contains(&name))
}

/// Prints every command with its aliases.
pub fn print_command_list() {
    println!("{}", "Commands:".yellow().bold());
    let width = COMMAND_REGISTRY
        .iter()
        .map(|cmd| cmd.name.len())
        .max()
        .unwrap_or(0);
    for cmd in COMMAND_REGISTRY {
        let aliases = if cmd.aliases.is_empty() {
            String::new()
        } else {
            format!(" ({})", cmd.aliases.join(", ")).dimmed().to_string()
        };
        println!(
            "  {}  {}{}",
            format!("{:width$}", cmd.name).cyan(),
            cmd.summary,
            aliases
        );
    }
}

/// The main application dispatcher: resolves the project, picks the runner and
/// hands the remaining arguments to the command's handler.
pub fn run_cli(cli: Cli) -> Result<()> {
    log::debug!("CLI args parsed: {:?}", cli);

    let Some(name) = cli.command else {
        print_command_list();
        return Ok(());
    };

    let command = find_command(&name).ok_or_else(|| {
        anyhow!(
            "Unknown command '{}'. Run without arguments to list the available commands.",
            name
        )
    })?;

    let root = paths::find_project_root_from_cwd(cli.root.as_deref())?;
    let project = Project::load(root)?;
    let installed = assets::install_missing(&project.assets_dir)?;
    if !installed.is_empty() {
        log::info!(
            "Installed {} bundled asset(s) into '{}'",
            installed.len(),
            project.assets_dir.display()
        );
    }

    let runner: &dyn ProcessRunner = if cli.dry_run {
        &DryRunRunner
    } else {
        &SystemRunner
    };

    let context = HandlerContext {
        project: &project,
        domain: command.domain,
        runner,
        dry_run: cli.dry_run,
    };
    (command.handler)(cli.args, &context)
}
