// src/system/keychain.rs

//! Command lines for the macOS keychain (`security`), where the vault password lives.

use crate::system::executor::CommandLine;

pub const SECURITY: &str = "security";

/// Keychain label of the stored vault password.
pub fn password_label(vault_id: &str) -> String {
    format!("{vault_id} Password")
}

/// Stores a generic password. `-w` is last so `security` prompts for the value.
pub fn add_password(vault_id: &str) -> CommandLine {
    CommandLine::new(SECURITY)
        .arg("add-generic-password")
        .args(["-a", vault_id])
        .args(["-s".to_string(), password_label(vault_id)])
        .arg("-w")
}

/// Prints the stored password on stdout.
pub fn find_password(vault_id: &str) -> CommandLine {
    CommandLine::new(SECURITY)
        .arg("find-generic-password")
        .arg("-w")
        .args(["-a", vault_id])
        .args(["-l".to_string(), password_label(vault_id)])
}
