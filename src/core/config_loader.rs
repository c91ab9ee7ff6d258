//! # Config Loader
//!
//! Loads the optional `secrets-deploy.toml` of a repository and resolves it into
//! a [`Project`]: the root, the parsed configuration and every derived location
//! the commands need (assets, vaults, override trees).
use crate::{
    constants::{
        FILES_DIR, LOCAL_SETTINGS_PATH, MULTISITE_MARKER, PROJECT_CONFIG_FILENAME, SECRETS_DIR,
    },
    core::paths::{self, PathError},
    models::{ProjectConfig, SecretsDomain},
};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not read '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid configuration in '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    #[error(transparent)]
    Path(#[from] PathError),
}

/// A repository whose secrets are managed by this tool.
#[derive(Debug, Clone)]
pub struct Project {
    pub root: PathBuf,
    pub config: ProjectConfig,
    pub assets_dir: PathBuf,
}

/// Reads `secrets-deploy.toml` from the root. A missing file means defaults.
pub fn load_config(root: &Path) -> Result<ProjectConfig, ConfigError> {
    let config_path = root.join(PROJECT_CONFIG_FILENAME);
    if !config_path.is_file() {
        log::debug!("No '{}' found, using defaults.", config_path.display());
        return Ok(ProjectConfig::default());
    }

    let content = fs::read_to_string(&config_path).map_err(|e| ConfigError::Read {
        path: config_path.display().to_string(),
        source: e,
    })?;
    toml::from_str(&content).map_err(|e| ConfigError::Parse {
        path: config_path.display().to_string(),
        source: e,
    })
}

impl Project {
    /// Loads the configuration of `root` and resolves the assets directory.
    pub fn load(root: PathBuf) -> Result<Self, ConfigError> {
        let config = load_config(&root)?;
        let assets_dir = match &config.secrets.assets_dir {
            Some(template) => paths::expand_path_template(template, &root)?,
            None => paths::default_assets_dir()?,
        };
        log::debug!(
            "Project root '{}', assets in '{}'",
            root.display(),
            assets_dir.display()
        );
        Ok(Self {
            root,
            config,
            assets_dir,
        })
    }

    /// `<root>/secrets`
    pub fn secrets_dir(&self) -> PathBuf {
        self.root.join(SECRETS_DIR)
    }

    /// `<root>/secrets/files`
    pub fn files_dir(&self) -> PathBuf {
        self.secrets_dir().join(FILES_DIR)
    }

    pub fn vault_path(&self, domain: &SecretsDomain) -> PathBuf {
        self.secrets_dir().join(domain.vault_file_name)
    }

    pub fn template_path(&self, domain: &SecretsDomain) -> PathBuf {
        self.secrets_dir().join(domain.template_file_name())
    }

    pub fn local_secrets_path(&self, domain: &SecretsDomain) -> PathBuf {
        self.root
            .join(domain.local_secrets_path.trim_start_matches('/'))
    }

    pub fn local_settings_path(&self) -> PathBuf {
        self.root.join(LOCAL_SETTINGS_PATH)
    }

    /// Site factory codebases keep their sites under `docroot/sites/g`.
    pub fn is_multisite(&self) -> bool {
        self.root.join(MULTISITE_MARKER).exists()
    }

    /// The playbook to run for a domain: the configured one, or the bundled default.
    pub fn playbook_path(&self, domain: &SecretsDomain) -> Result<PathBuf, ConfigError> {
        match self.config.overrides_for(domain).playbook {
            Some(template) => Ok(paths::expand_path_template(&template, &self.root)?),
            None => Ok(self.assets_dir.join(domain.playbook_file_name)),
        }
    }

    /// Keychain account name of the vault password: `<machine_name>-ansible-vault`.
    pub fn vault_id(&self) -> Option<String> {
        self.config
            .project
            .machine_name
            .as_deref()
            .map(|name| format!("{name}-ansible-vault"))
    }
}
