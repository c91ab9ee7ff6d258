// src/models.rs

use serde::{Deserialize, Serialize};

// --- ALIAS REGISTRY MODELS ---

/// One entry of the alias listing, as reported by `drush site:alias --format=json`.
/// Only the fields this tool consumes are kept; everything else is ignored.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvironmentRecord {
    pub host: Option<String>,
    pub user: Option<String>,
    /// Explicit site identifier, overrides the one derived from the alias.
    #[serde(rename = "ac-site")]
    pub site: Option<String>,
    /// Explicit environment identifier, overrides the one derived from the alias.
    #[serde(rename = "ac-env")]
    pub env: Option<String>,
}

/// The canonical facts derived from an alias. Built fresh for each command run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentFacts {
    pub alias: String,
    pub site: String,
    pub env: String,
    /// Digits of `env`, or `"00"` when it has none.
    pub stack: String,
    /// `env` with its digits removed.
    pub stack_class: String,
    /// Update environment of a multisite stack (e.g. `01update`, `testup`).
    pub update_env: Option<String>,
}

impl EnvironmentFacts {
    /// Whether this is the operator's own machine: an environment named
    /// `local`, with or without a stack number (`local`, `local2`).
    pub fn is_local(&self) -> bool {
        self.stack_class == crate::constants::LOCAL_ENV
    }

    /// The override directory names in precedence order, lowest first.
    pub fn override_dirs(&self) -> [&str; 6] {
        [
            crate::constants::COMMON_OVERRIDE_DIR,
            &self.alias,
            &self.site,
            &self.env,
            &self.stack,
            &self.stack_class,
        ]
    }
}

// --- SECRETS DOMAINS ---

/// Where the `append-config` snippet goes and what its include is relative to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IncludeTarget {
    /// Config file receiving the include, relative to the root.
    pub config_file: &'static str,
    /// Directory the include path is evaluated from at runtime, relative to the root.
    pub include_base: &'static str,
    /// External prerequisite that creates `config_file`; not one of our commands.
    pub setup_hint: &'static str,
}

/// Describes one family of secrets handled by the tool.
///
/// Every command is parametrized by a domain instead of being duplicated:
/// the site settings secrets and the SimpleSAMLphp secrets only differ in
/// file names, the playbook they run and where the local copy is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SecretsDomain {
    pub name: &'static str,
    /// File name of the rendered secrets file on the target.
    pub secrets_file_name: &'static str,
    /// File name of the encrypted vault inside `secrets/`.
    pub vault_file_name: &'static str,
    /// Default playbook, looked up in the assets directory.
    pub playbook_file_name: &'static str,
    /// Local rendered secrets path, relative to the root (leading slash included).
    pub local_secrets_path: &'static str,
    /// Command that creates the vault, suggested when it is missing.
    pub init_command: &'static str,
    /// Command suggested after `init` to edit the fresh vault.
    pub edit_command: &'static str,
    pub include_target: Option<IncludeTarget>,
}

impl SecretsDomain {
    /// Template file name, both in the assets dir and in `secrets/`.
    pub fn template_file_name(&self) -> String {
        format!("{}.j2", self.secrets_file_name)
    }

    /// Unencrypted vault skeleton shipped in the assets dir.
    pub fn vault_source_file_name(&self) -> String {
        format!("{}.yml", self.vault_file_name)
    }
}

pub static SITE_SECRETS: SecretsDomain = SecretsDomain {
    name: "site",
    secrets_file_name: "secrets.settings.php",
    vault_file_name: "secrets_vault",
    playbook_file_name: "deploy-secrets.yml",
    local_secrets_path: "/docroot/sites/default/settings/secrets.settings.local",
    init_command: "secrets-deploy init",
    edit_command: "secrets-deploy edit",
    include_target: None,
};

pub static SIMPLESAMLPHP_SECRETS: SecretsDomain = SecretsDomain {
    name: "simplesamlphp",
    secrets_file_name: "simplesamlphp.secrets.php",
    vault_file_name: "simplesamlphp_secrets_vault",
    playbook_file_name: "deploy-simplesamlphp-secrets.yml",
    local_secrets_path: "/scripts/simplesamlphp/secrets.php.local",
    init_command: "secrets-deploy simplesamlphp:init",
    edit_command: "secrets-deploy simplesamlphp:edit",
    include_target: Some(IncludeTarget {
        config_file: "simplesamlphp/config/acquia_config.php",
        include_base: "vendor/simplesamlphp/simplesamlphp/config",
        setup_hint: "the SimpleSAMLphp recipe of your build tool (`blt recipes:simplesamlphp:init`)",
    }),
};

// --- `secrets-deploy.toml` MODELS ---

/// Represents the deserialized structure of a `secrets-deploy.toml` file.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectConfig {
    #[serde(default)]
    pub project: ProjectSection,
    #[serde(default)]
    pub secrets: SecretsSection,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectSection {
    pub machine_name: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct SecretsSection {
    /// Directory with the templates and default playbooks. Supports `~` and `$VAR`.
    pub assets_dir: Option<String>,
    pub playbook: Option<String>,
    pub settings_remote_location: Option<String>,
    #[serde(default)]
    pub simplesamlphp: DomainOverrides,
}

/// Per-domain overrides.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct DomainOverrides {
    pub playbook: Option<String>,
    pub settings_remote_location: Option<String>,
}

impl ProjectConfig {
    /// Returns the overrides that apply to the given domain.
    pub fn overrides_for(&self, domain: &SecretsDomain) -> DomainOverrides {
        if domain.name == SIMPLESAMLPHP_SECRETS.name {
            self.secrets.simplesamlphp.clone()
        } else {
            DomainOverrides {
                playbook: self.secrets.playbook.clone(),
                settings_remote_location: self.secrets.settings_remote_location.clone(),
            }
        }
    }
}
