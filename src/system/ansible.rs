// src/system/ansible.rs

use crate::{core::vault_password::VaultPassword, system::executor::CommandLine};
use std::path::{Path, PathBuf};

pub const ANSIBLE_VAULT: &str = "ansible-vault";
pub const ANSIBLE_PLAYBOOK: &str = "ansible-playbook";

/// `ansible-vault encrypt <source> --ask-vault-pass --output <output>`.
/// A brand new vault always prompts, the keychain entry may not exist yet.
pub fn encrypt_to(source: &Path, output: &Path) -> CommandLine {
    CommandLine::new(ANSIBLE_VAULT)
        .arg("encrypt")
        .arg(source.to_string_lossy())
        .arg("--ask-vault-pass")
        .arg("--output")
        .arg(output.to_string_lossy())
}

/// `ansible-vault encrypt <files...> <password clause>`, encrypting in place.
pub fn encrypt_in_place(files: &[PathBuf], password: &VaultPassword) -> CommandLine {
    CommandLine::new(ANSIBLE_VAULT)
        .arg("encrypt")
        .args(files.iter().map(|f| f.to_string_lossy().into_owned()))
        .arg(password.to_arg())
}

/// `ansible-vault edit <vault> <password clause>`.
pub fn edit(vault: &Path, password: &VaultPassword) -> CommandLine {
    CommandLine::new(ANSIBLE_VAULT)
        .arg("edit")
        .arg(vault.to_string_lossy())
        .arg(password.to_arg())
}
