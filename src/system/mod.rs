//! # System Interaction Layer
//!
//! This module is the boundary between the secrets workflow and the external
//! tools it drives. Nothing outside of it spawns processes.
//!
//! ## Modules
//!
//! - **`executor`**: the `ProcessRunner` seam, the `CommandLine` value and the
//!   system and dry-run runners.
//! - **`ansible`**: command lines for `ansible-vault`.
//! - **`keychain`**: command lines for the macOS `security` tool.
//! - **`drush`**: the alias listing command.

pub mod ansible;
pub mod drush;
pub mod executor;
pub mod keychain;
