// src/core/environment.rs

use crate::{
    constants::LOCAL_STACK,
    core::error::{SecretsError, SecretsResult},
    models::{EnvironmentFacts, EnvironmentRecord},
};

const ALIAS_DELIMITER: char = '.';
const ALIAS_SIGIL: char = '@';

/// Derives the canonical facts of an environment from its alias and record.
///
/// Explicit `ac-site`/`ac-env` fields win over anything derived from the alias
/// text. `multisite` tells whether the codebase is a site factory, in which case
/// each environment also has an update environment.
pub fn resolve_facts(
    alias: &str,
    record: &EnvironmentRecord,
    multisite: bool,
) -> SecretsResult<EnvironmentFacts> {
    let malformed = || SecretsError::MalformedAlias {
        alias: alias.to_string(),
    };

    let split = alias
        .split_once(ALIAS_DELIMITER)
        .map(|(site, env)| (site.trim_start_matches(ALIAS_SIGIL), env));

    let site = match (&record.site, split) {
        (Some(site), _) => site.clone(),
        (None, Some((site, _))) if !site.is_empty() => site.to_string(),
        _ => return Err(malformed()),
    };
    let env = match (&record.env, split) {
        (Some(env), _) => env.clone(),
        (None, Some((_, env))) if !env.is_empty() => env.to_string(),
        _ => return Err(malformed()),
    };

    let digits: String = env.chars().filter(char::is_ascii_digit).collect();
    let stack = if digits.is_empty() {
        LOCAL_STACK.to_string()
    } else {
        digits
    };
    let stack_class: String = env.chars().filter(|c| !c.is_ascii_digit()).collect();

    let update_env = multisite.then(|| update_environment(&env, &stack, &stack_class));

    log::trace!(
        "Facts for '{}': site={}, env={}, stack={}, stack_class={}, update_env={:?}",
        alias,
        site,
        env,
        stack,
        stack_class,
        update_env
    );

    Ok(EnvironmentFacts {
        alias: alias.to_string(),
        site,
        env,
        stack,
        stack_class,
        update_env,
    })
}

/// Name of the update environment paired with a multisite environment.
fn update_environment(env: &str, stack: &str, stack_class: &str) -> String {
    if stack_class == "live" {
        format!("{stack}update")
    } else {
        format!("{env}up")
    }
}
