// src/core/playbook.rs

use crate::{
    constants::{LOOPBACK_INVENTORY, REMOTE_FILES_BASE},
    core::{
        config_loader::{ConfigError, Project},
        error::{SecretsError, SecretsResult},
        file_overrides::FileOverrideMap,
        vault_password::VaultPassword,
    },
    models::{EnvironmentFacts, EnvironmentRecord, SecretsDomain},
    system::{ansible::ANSIBLE_PLAYBOOK, executor::CommandLine},
};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::path::PathBuf;

/// A single extra variable value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VarValue {
    Text(String),
    List(Vec<String>),
}

impl Serialize for VarValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Text(s) => serializer.serialize_str(s),
            Self::List(items) => items.serialize(serializer),
        }
    }
}

/// Ordered extra variables. Serialized as one JSON object in insertion order,
/// so the same inputs always produce the same command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtraVars(Vec<(&'static str, VarValue)>);

impl ExtraVars {
    pub fn text(&mut self, key: &'static str, value: impl Into<String>) {
        self.set(key, VarValue::Text(value.into()));
    }

    pub fn list(&mut self, key: &'static str, values: Vec<String>) {
        self.set(key, VarValue::List(values));
    }

    /// Replaces an existing key in place, otherwise appends it.
    fn set(&mut self, key: &'static str, value: VarValue) {
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.0.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&VarValue> {
        self.0.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    pub fn keys(&self) -> Vec<&'static str> {
        self.0.iter().map(|(k, _)| *k).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(&'static str, VarValue)> {
        self.0.iter()
    }

    pub fn to_json(&self) -> String {
        // Only strings and lists of strings are stored; serialization cannot fail.
        serde_json::to_string(self).unwrap_or_default()
    }
}

impl Serialize for ExtraVars {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in &self.0 {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// How the playbook reaches its target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Connection {
    Remote { host: String, user: String },
    Loopback,
}

impl Connection {
    fn to_args(&self) -> Vec<String> {
        match self {
            Self::Remote { host, user } => vec![
                "-i".to_string(),
                format!("{host},"),
                "-u".to_string(),
                user.clone(),
            ],
            Self::Loopback => vec!["-i".to_string(), LOOPBACK_INVENTORY.to_string()],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybookMode {
    Deploy,
    /// Check mode with diffs: shows what would change without changing it.
    Diff,
}

/// The files and overrides a domain's playbook works with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretsLocations {
    pub playbook: PathBuf,
    pub vault: PathBuf,
    pub template: PathBuf,
    pub secrets_file_name: String,
    /// Replaces the computed remote secrets path when set.
    pub remote_secret_override: Option<String>,
    pub local_secrets: PathBuf,
    pub local_settings: PathBuf,
}

impl SecretsLocations {
    pub fn for_domain(project: &Project, domain: &SecretsDomain) -> Result<Self, ConfigError> {
        Ok(Self {
            playbook: project.playbook_path(domain)?,
            vault: project.vault_path(domain),
            template: project.template_path(domain),
            secrets_file_name: domain.secrets_file_name.to_string(),
            remote_secret_override: project.config.overrides_for(domain).settings_remote_location,
            local_secrets: project.local_secrets_path(domain),
            local_settings: project.local_settings_path(),
        })
    }
}

/// Everything needed to build one playbook run.
#[derive(Debug, Clone)]
pub struct PlaybookRequest<'a> {
    pub facts: &'a EnvironmentFacts,
    pub record: &'a EnvironmentRecord,
    pub files: Option<&'a FileOverrideMap>,
    pub locations: &'a SecretsLocations,
    pub mode: PlaybookMode,
    pub password: VaultPassword,
}

/// A fully materialized `ansible-playbook` run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaybookInvocation {
    pub playbook: PathBuf,
    pub mode: PlaybookMode,
    pub connection: Connection,
    pub extra_vars: ExtraVars,
    pub password: VaultPassword,
}

/// `/mnt/files/<site>.<env>/`
fn remote_env_path(site: &str, env: &str) -> String {
    format!("{REMOTE_FILES_BASE}/{site}.{env}/")
}

impl PlaybookInvocation {
    pub fn build(request: &PlaybookRequest<'_>) -> SecretsResult<Self> {
        let facts = request.facts;
        let locations = request.locations;
        let mut vars = ExtraVars::default();

        vars.text("drush_alias", &facts.alias);
        vars.text("ac_site", &facts.site);
        vars.text("ac_env", &facts.env);
        vars.text("stack", &facts.stack);
        vars.text("stack_class", &facts.stack_class);
        vars.text("secret_vault_location", locations.vault.to_string_lossy());
        vars.text("secret_template_location", locations.template.to_string_lossy());

        if let Some(update_env) = &facts.update_env {
            vars.text("ac_update_env", update_env);
        }

        let connection = if facts.is_local() {
            vars.text("secret_location", locations.local_secrets.to_string_lossy());
            vars.text("localsettings_location", locations.local_settings.to_string_lossy());
            vars.text("ansible_connection", "local");
            Connection::Loopback
        } else {
            let missing = |field| SecretsError::MissingConnection {
                alias: facts.alias.clone(),
                field,
            };
            let host = request.record.host.clone().ok_or_else(|| missing("host"))?;
            let user = request.record.user.clone().ok_or_else(|| missing("user"))?;

            let env_path = remote_env_path(&facts.site, &facts.env);
            if let Some(update_env) = &facts.update_env {
                vars.text("update_env_path", remote_env_path(&facts.site, update_env));
            }
            let secret_location = match &locations.remote_secret_override {
                Some(location) => location.clone(),
                None => format!("{env_path}{}", locations.secrets_file_name),
            };
            vars.text("env_path", env_path);
            vars.text("secret_location", secret_location);
            Connection::Remote { host, user }
        };

        if let Some(files) = request.files {
            let (dests, srcs): (Vec<String>, Vec<String>) = files
                .iter()
                .map(|(id, path)| (id.clone(), path.to_string_lossy().into_owned()))
                .unzip();
            vars.list("file_srcs", srcs);
            vars.list("file_dests", dests);
        }

        Ok(Self {
            playbook: locations.playbook.clone(),
            mode: request.mode,
            connection,
            extra_vars: vars,
            password: request.password.clone(),
        })
    }

    /// Serializes the invocation. The vault password clause is always last.
    pub fn to_command_line(&self) -> CommandLine {
        let mut command = CommandLine::new(ANSIBLE_PLAYBOOK);
        if self.mode == PlaybookMode::Diff {
            command = command.arg("-CD");
        }
        command
            .arg(self.playbook.to_string_lossy())
            .args(self.connection.to_args())
            .arg("--extra-vars")
            .arg(self.extra_vars.to_json())
            .arg(self.password.to_arg())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn locations() -> SecretsLocations {
        SecretsLocations {
            playbook: PathBuf::from("/assets/deploy-secrets.yml"),
            vault: PathBuf::from("/repo/secrets/secrets_vault"),
            template: PathBuf::from("/repo/secrets/secrets.settings.php.j2"),
            secrets_file_name: "secrets.settings.php".to_string(),
            remote_secret_override: None,
            local_secrets: PathBuf::from("/repo/docroot/sites/default/settings/secrets.settings.local"),
            local_settings: PathBuf::from("/repo/docroot/sites/default/settings/local.settings.php"),
        }
    }

    fn facts(alias: &str, update_env: Option<&str>) -> EnvironmentFacts {
        let (site, env) = alias.trim_start_matches('@').split_once('.').unwrap();
        let digits: String = env.chars().filter(char::is_ascii_digit).collect();
        EnvironmentFacts {
            alias: alias.to_string(),
            site: site.to_string(),
            env: env.to_string(),
            stack: if digits.is_empty() { "00".to_string() } else { digits },
            stack_class: env.chars().filter(|c| !c.is_ascii_digit()).collect(),
            update_env: update_env.map(str::to_string),
        }
    }

    fn remote_record() -> EnvironmentRecord {
        EnvironmentRecord {
            host: Some("web-1.example.com".to_string()),
            user: Some("acme.01live".to_string()),
            site: None,
            env: None,
        }
    }

    fn text(invocation: &PlaybookInvocation, key: &str) -> String {
        match invocation.extra_vars.get(key) {
            Some(VarValue::Text(s)) => s.clone(),
            other => panic!("expected text for '{key}', got {other:?}"),
        }
    }

    #[test]
    fn test_remote_invocation() {
        let facts = facts("@acme.01live", None);
        let record = remote_record();
        let locations = locations();
        let invocation = PlaybookInvocation::build(&PlaybookRequest {
            facts: &facts,
            record: &record,
            files: None,
            locations: &locations,
            mode: PlaybookMode::Deploy,
            password: VaultPassword::Prompt,
        })
        .unwrap();

        assert_eq!(
            invocation.extra_vars.keys(),
            vec![
                "drush_alias",
                "ac_site",
                "ac_env",
                "stack",
                "stack_class",
                "secret_vault_location",
                "secret_template_location",
                "env_path",
                "secret_location",
            ]
        );
        assert_eq!(text(&invocation, "env_path"), "/mnt/files/acme.01live/");
        assert_eq!(
            text(&invocation, "secret_location"),
            "/mnt/files/acme.01live/secrets.settings.php"
        );

        let command = invocation.to_command_line();
        let args = command.get_args();
        assert_eq!(command.program(), "ansible-playbook");
        assert_eq!(args.first().map(String::as_str), Some("/assets/deploy-secrets.yml"));
        assert_eq!(
            args.get(1..5).unwrap(),
            ["-i", "web-1.example.com,", "-u", "acme.01live"]
        );
        assert_eq!(args.last().map(String::as_str), Some("--ask-vault-pass"));
    }

    #[test]
    fn test_remote_location_override() {
        let facts = facts("@acme.01live", None);
        let record = remote_record();
        let mut locations = locations();
        locations.remote_secret_override = Some("/var/secure/secrets.php".to_string());
        let invocation = PlaybookInvocation::build(&PlaybookRequest {
            facts: &facts,
            record: &record,
            files: None,
            locations: &locations,
            mode: PlaybookMode::Deploy,
            password: VaultPassword::Prompt,
        })
        .unwrap();
        assert_eq!(text(&invocation, "secret_location"), "/var/secure/secrets.php");
    }

    #[test]
    fn test_update_env_adds_id_and_path() {
        let facts = facts("@acme.01live", Some("01update"));
        let record = remote_record();
        let locations = locations();
        let invocation = PlaybookInvocation::build(&PlaybookRequest {
            facts: &facts,
            record: &record,
            files: None,
            locations: &locations,
            mode: PlaybookMode::Deploy,
            password: VaultPassword::Prompt,
        })
        .unwrap();
        assert_eq!(text(&invocation, "ac_update_env"), "01update");
        assert_eq!(text(&invocation, "update_env_path"), "/mnt/files/acme.01update/");
    }

    #[test]
    fn test_local_alias_ignores_record_connection() {
        let facts = facts("@acme.local", None);
        let record = remote_record();
        let locations = locations();
        let invocation = PlaybookInvocation::build(&PlaybookRequest {
            facts: &facts,
            record: &record,
            files: None,
            locations: &locations,
            mode: PlaybookMode::Deploy,
            password: VaultPassword::Prompt,
        })
        .unwrap();

        assert_eq!(invocation.connection, Connection::Loopback);
        assert!(invocation.extra_vars.get("env_path").is_none());
        assert_eq!(
            text(&invocation, "secret_location"),
            "/repo/docroot/sites/default/settings/secrets.settings.local"
        );
        assert_eq!(
            text(&invocation, "localsettings_location"),
            "/repo/docroot/sites/default/settings/local.settings.php"
        );
        assert_eq!(text(&invocation, "ansible_connection"), "local");

        let command = invocation.to_command_line();
        assert_eq!(command.get_args().get(1..3).unwrap(), ["-i", "127.0.0.1,"]);
    }

    #[test]
    fn test_multisite_local_run_keeps_update_env_but_no_remote_paths() {
        let facts = facts("@acme.local", Some("localup"));
        let record = EnvironmentRecord::default();
        let locations = locations();
        let invocation = PlaybookInvocation::build(&PlaybookRequest {
            facts: &facts,
            record: &record,
            files: None,
            locations: &locations,
            mode: PlaybookMode::Deploy,
            password: VaultPassword::Prompt,
        })
        .unwrap();

        assert_eq!(invocation.connection, Connection::Loopback);
        assert_eq!(text(&invocation, "ac_update_env"), "localup");
        assert!(invocation.extra_vars.get("update_env_path").is_none());
        assert!(invocation.extra_vars.get("env_path").is_none());
    }

    #[test]
    fn test_site_named_like_local_still_deploys_remotely() {
        let facts = facts("@localnews.prod", None);
        let record = remote_record();
        let locations = locations();
        let invocation = PlaybookInvocation::build(&PlaybookRequest {
            facts: &facts,
            record: &record,
            files: None,
            locations: &locations,
            mode: PlaybookMode::Deploy,
            password: VaultPassword::Prompt,
        })
        .unwrap();

        assert!(matches!(invocation.connection, Connection::Remote { .. }));
        assert_eq!(
            text(&invocation, "secret_location"),
            "/mnt/files/localnews.prod/secrets.settings.php"
        );
        assert!(invocation.extra_vars.get("ansible_connection").is_none());
    }

    #[test]
    fn test_remote_alias_without_host_fails() {
        let facts = facts("@acme.prod", None);
        let record = EnvironmentRecord::default();
        let locations = locations();
        let result = PlaybookInvocation::build(&PlaybookRequest {
            facts: &facts,
            record: &record,
            files: None,
            locations: &locations,
            mode: PlaybookMode::Deploy,
            password: VaultPassword::Prompt,
        });
        assert!(matches!(
            result,
            Err(SecretsError::MissingConnection { field: "host", .. })
        ));
    }

    #[test]
    fn test_file_lists_are_aligned() {
        let facts = facts("@acme.01live", None);
        let record = remote_record();
        let locations = locations();
        let mut files = FileOverrideMap::new();
        files.insert("b/key.pem".to_string(), PathBuf::from("/repo/secrets/files/live/b/key.pem"));
        files.insert("a.txt".to_string(), PathBuf::from("/repo/secrets/files/common/a.txt"));

        let invocation = PlaybookInvocation::build(&PlaybookRequest {
            facts: &facts,
            record: &record,
            files: Some(&files),
            locations: &locations,
            mode: PlaybookMode::Deploy,
            password: VaultPassword::Prompt,
        })
        .unwrap();

        assert_eq!(
            invocation.extra_vars.get("file_dests"),
            Some(&VarValue::List(vec!["a.txt".to_string(), "b/key.pem".to_string()]))
        );
        assert_eq!(
            invocation.extra_vars.get("file_srcs"),
            Some(&VarValue::List(vec![
                "/repo/secrets/files/common/a.txt".to_string(),
                "/repo/secrets/files/live/b/key.pem".to_string(),
            ]))
        );
    }

    #[test]
    fn test_diff_mode_and_keychain_password() {
        let facts = facts("@acme.01live", None);
        let record = remote_record();
        let locations = locations();
        let invocation = PlaybookInvocation::build(&PlaybookRequest {
            facts: &facts,
            record: &record,
            files: None,
            locations: &locations,
            mode: PlaybookMode::Diff,
            password: VaultPassword::Keychain(Path::new("/assets").join("vault_password_file")),
        })
        .unwrap();
        let command = invocation.to_command_line();
        assert_eq!(command.get_args().first().map(String::as_str), Some("-CD"));
        assert_eq!(
            command.get_args().last().map(String::as_str),
            Some("--vault-password-file=/assets/vault_password_file")
        );
    }

    #[test]
    fn test_build_is_deterministic() {
        let facts = facts("@acme.01live", Some("01update"));
        let record = remote_record();
        let locations = locations();
        let mut files = FileOverrideMap::new();
        files.insert("x".to_string(), PathBuf::from("/x"));
        files.insert("y".to_string(), PathBuf::from("/y"));
        let request = PlaybookRequest {
            facts: &facts,
            record: &record,
            files: Some(&files),
            locations: &locations,
            mode: PlaybookMode::Deploy,
            password: VaultPassword::Prompt,
        };

        let first = PlaybookInvocation::build(&request).unwrap().to_command_line();
        let second = PlaybookInvocation::build(&request).unwrap().to_command_line();
        assert_eq!(first, second);
        assert_eq!(first.display(), second.display());
    }

    #[test]
    fn test_extra_vars_json_keeps_insertion_order() {
        let mut vars = ExtraVars::default();
        vars.text("zeta", "1");
        vars.text("alpha", "2");
        vars.list("files", vec!["a".to_string()]);
        vars.text("zeta", "3");
        assert_eq!(vars.to_json(), r#"{"zeta":"3","alpha":"2","files":["a"]}"#);
    }
}
