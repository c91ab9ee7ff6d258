// src/core/vault_password.rs

use crate::constants::{SECRETS_DIR, USE_KEYCHAIN_MARKER, VAULT_PASSWORD_SCRIPT};
use std::path::{Path, PathBuf};

/// How ansible obtains the vault password for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VaultPassword {
    /// Read it through the keychain helper script.
    Keychain(PathBuf),
    /// Ask the operator interactively.
    Prompt,
}

impl VaultPassword {
    /// Picks the keychain helper when the project opted in with `keychain-init`.
    pub fn detect(root: &Path, assets_dir: &Path) -> Self {
        Self::from_marker(keychain_marker_path(root).exists(), assets_dir)
    }

    pub fn from_marker(marker_exists: bool, assets_dir: &Path) -> Self {
        if marker_exists {
            Self::Keychain(assets_dir.join(VAULT_PASSWORD_SCRIPT))
        } else {
            Self::Prompt
        }
    }

    /// The ansible command line argument for this strategy.
    pub fn to_arg(&self) -> String {
        match self {
            Self::Keychain(script) => format!("--vault-password-file={}", script.display()),
            Self::Prompt => "--ask-vault-pass".to_string(),
        }
    }
}

pub fn keychain_marker_path(root: &Path) -> PathBuf {
    root.join(SECRETS_DIR).join(USE_KEYCHAIN_MARKER)
}
