//! Vault-backed secrets deployment: derives environment facts from site
//! aliases and drives `ansible-vault`, `ansible-playbook` and the keychain.

pub mod cli;
pub mod constants;
pub mod core;
pub mod models;
pub mod system;
