// src/core/mod.rs

pub mod alias_registry;
pub mod assets;
pub mod config_loader;
pub mod environment;
pub mod error;
pub mod file_overrides;
pub mod paths;
pub mod playbook;
pub mod vault_password;
