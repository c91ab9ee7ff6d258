// src/cli/handlers/playbook.rs

use anyhow::Result;
use clap::Parser;
use colored::Colorize;

use super::commons::{self, HandlerContext};
use crate::{
    cli::args::AliasArgs,
    core::{
        alias_registry::AliasRegistry,
        environment::resolve_facts,
        file_overrides::collect_files,
        playbook::{
            ExtraVars, PlaybookInvocation, PlaybookMode, PlaybookRequest, SecretsLocations,
            VarValue,
        },
        vault_password::VaultPassword,
    },
};

/// The main handler for the `diff` command.
pub fn handle_diff(args: Vec<String>, ctx: &HandlerContext<'_>) -> Result<()> {
    run_playbook(args, ctx, PlaybookMode::Diff)
}

/// The main handler for the `deploy` command.
pub fn handle_deploy(args: Vec<String>, ctx: &HandlerContext<'_>) -> Result<()> {
    run_playbook(args, ctx, PlaybookMode::Deploy)
}

fn run_playbook(args: Vec<String>, ctx: &HandlerContext<'_>, mode: PlaybookMode) -> Result<()> {
    let alias_args = AliasArgs::try_parse_from(&args)?;
    let project = ctx.project;
    let domain = ctx.domain;

    // 1. Resolve the target environment.
    let registry = AliasRegistry::new(ctx.runner, &project.root);
    let record = registry.get(&alias_args.alias)?;
    let facts = resolve_facts(&alias_args.alias, record, project.is_multisite())?;

    // 2. Gather what the playbook needs.
    let locations = SecretsLocations::for_domain(project, domain)?;
    commons::require_file(
        &locations.vault,
        format!("Run '{}' to create it.", domain.init_command),
    )?;
    let files = collect_files(&facts, &project.files_dir());

    let request = PlaybookRequest {
        facts: &facts,
        record,
        files: files.as_ref(),
        locations: &locations,
        mode,
        password: VaultPassword::detect(&project.root, &project.assets_dir),
    };
    let invocation = PlaybookInvocation::build(&request)?;

    // 3. Show the variables, then hand over to ansible.
    print_variables(&invocation.extra_vars);
    ctx.run(&invocation.to_command_line())
}

fn print_variables(vars: &ExtraVars) {
    println!("{}", "Variables:".yellow().bold());
    for (key, value) in vars.iter() {
        match value {
            VarValue::Text(text) => println!("  {}: {}", key.cyan(), text),
            VarValue::List(items) => {
                println!("  {}:", key.cyan());
                for item in items {
                    println!("    - {item}");
                }
            }
        }
    }
}
