//! # Bundled Assets
//!
//! The templates, vault skeletons, default playbooks and the keychain
//! password helper ship inside the binary. They are written to the assets
//! directory the first time a command needs them; files already there are
//! never overwritten, so local edits survive upgrades.
use crate::constants::{GITIGNORE_FILENAME, VAULT_PASSWORD_SCRIPT};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AssetError {
    #[error("Could not install bundled asset '{path}': {source}")]
    Install {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// One file of the assets directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BundledAsset {
    pub file_name: &'static str,
    pub content: &'static str,
    /// Installed with the executable bits set (unix only).
    pub executable: bool,
}

const fn asset(file_name: &'static str, content: &'static str) -> BundledAsset {
    BundledAsset {
        file_name,
        content,
        executable: false,
    }
}

pub static BUNDLED_ASSETS: &[BundledAsset] = &[
    asset(
        "deploy-secrets.yml",
        include_str!("../../assets/deploy-secrets.yml"),
    ),
    asset(
        "deploy-simplesamlphp-secrets.yml",
        include_str!("../../assets/deploy-simplesamlphp-secrets.yml"),
    ),
    asset(
        "secrets.settings.php.j2",
        include_str!("../../assets/secrets.settings.php.j2"),
    ),
    asset(
        "simplesamlphp.secrets.php.j2",
        include_str!("../../assets/simplesamlphp.secrets.php.j2"),
    ),
    asset(
        "secrets_vault.yml",
        include_str!("../../assets/secrets_vault.yml"),
    ),
    asset(
        "simplesamlphp_secrets_vault.yml",
        include_str!("../../assets/simplesamlphp_secrets_vault.yml"),
    ),
    // Stored without the dot so it does not apply to this source tree.
    asset(GITIGNORE_FILENAME, include_str!("../../assets/gitignore")),
    BundledAsset {
        file_name: VAULT_PASSWORD_SCRIPT,
        content: include_str!("../../assets/vault_password_file"),
        executable: true,
    },
];

/// Writes every bundled asset missing from `dir` and returns the installed paths.
pub fn install_missing(dir: &Path) -> Result<Vec<PathBuf>, AssetError> {
    let mut installed = Vec::new();
    for asset in BUNDLED_ASSETS {
        let path = dir.join(asset.file_name);
        if path.exists() {
            continue;
        }
        write_asset(&path, asset).map_err(|e| AssetError::Install {
            path: path.display().to_string(),
            source: e,
        })?;
        log::debug!("Installed bundled asset '{}'", path.display());
        installed.push(path);
    }
    Ok(installed)
}

fn write_asset(path: &Path, asset: &BundledAsset) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, asset.content)?;
    #[cfg(unix)]
    if asset.executable {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o755))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::{config_loader::Project, vault_password::VaultPassword},
        models::{SIMPLESAMLPHP_SECRETS, SITE_SECRETS},
    };
    use tempfile::tempdir;

    #[test]
    fn test_fresh_assets_dir_provides_every_domain_file() {
        let dir = tempdir().unwrap();
        let assets = dir.path().join("share/secrets-deploy/ansible");

        let installed = install_missing(&assets).unwrap();
        assert_eq!(installed.len(), BUNDLED_ASSETS.len());

        for domain in [&SITE_SECRETS, &SIMPLESAMLPHP_SECRETS] {
            assert!(assets.join(domain.template_file_name()).is_file());
            assert!(assets.join(domain.vault_source_file_name()).is_file());
            assert!(assets.join(domain.playbook_file_name).is_file());
        }
        assert!(assets.join(".gitignore").is_file());
    }

    #[test]
    fn test_keychain_password_file_resolves_in_a_fresh_project() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join("secrets-deploy.toml"),
            "[secrets]\nassets_dir = \"assets\"\n",
        )
        .unwrap();
        let project = Project::load(dir.path().to_path_buf()).unwrap();
        install_missing(&project.assets_dir).unwrap();

        let VaultPassword::Keychain(script) = VaultPassword::from_marker(true, &project.assets_dir)
        else {
            panic!("the marker selects the keychain");
        };
        assert!(script.is_file());
        let content = std::fs::read_to_string(&script).unwrap();
        assert!(content.starts_with("#!/bin/sh"));
        assert!(content.contains("secrets-deploy vault-password"));

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = std::fs::metadata(&script).unwrap().permissions().mode();
            assert_eq!(mode & 0o111, 0o111);
        }
    }

    #[test]
    fn test_existing_files_are_kept() {
        let dir = tempdir().unwrap();
        let custom = dir.path().join("deploy-secrets.yml");
        std::fs::write(&custom, "# ours").unwrap();

        let installed = install_missing(dir.path()).unwrap();

        assert!(!installed.contains(&custom));
        assert_eq!(std::fs::read_to_string(&custom).unwrap(), "# ours");
        assert!(install_missing(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn test_playbooks_read_the_variables_the_invocation_sends() {
        for name in ["deploy-secrets.yml", "deploy-simplesamlphp-secrets.yml"] {
            let playbook = BUNDLED_ASSETS
                .iter()
                .find(|a| a.file_name == name)
                .unwrap()
                .content;
            for var in [
                "secret_vault_location",
                "secret_template_location",
                "secret_location",
                "update_env_path",
                "env_path",
                "file_srcs",
                "file_dests",
            ] {
                assert!(playbook.contains(var), "{name} does not use {var}");
            }
        }
    }
}
