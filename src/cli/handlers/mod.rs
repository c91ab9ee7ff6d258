// src/cli/handlers/mod.rs

// One module per command family. Every handler has the same signature so the
// dispatcher can keep them in a single registry.

pub mod append_config;
pub mod commons;
pub mod edit;
pub mod encrypt_files;
pub mod init;
pub mod keychain;
pub mod playbook;
