// src/constants.rs

/// The name of the optional project configuration file (at the repository root).
pub const PROJECT_CONFIG_FILENAME: &str = "secrets-deploy.toml";

/// The directory holding the vault, templates and file overrides (relative to the root).
pub const SECRETS_DIR: &str = "secrets";

/// The directory holding the ad-hoc file override trees (inside `secrets/`).
pub const FILES_DIR: &str = "files";

/// The override directory that applies to every environment.
pub const COMMON_OVERRIDE_DIR: &str = "common";

/// Marker file that switches the vault password strategy to the keychain.
pub const USE_KEYCHAIN_MARKER: &str = ".usekeychain";

/// The `.gitignore` shipped with the assets and copied into `secrets/`.
pub const GITIGNORE_FILENAME: &str = ".gitignore";

/// Script handed to ansible as `--vault-password-file` (inside the assets dir).
pub const VAULT_PASSWORD_SCRIPT: &str = "vault_password_file";

/// Directory whose presence marks a multisite (site factory) codebase.
pub const MULTISITE_MARKER: &str = "docroot/sites/g";

/// Where the local settings include lives, relative to the root.
pub const LOCAL_SETTINGS_PATH: &str = "docroot/sites/default/settings/local.settings.php";

/// Base directory of every remote environment's private files.
pub const REMOTE_FILES_BASE: &str = "/mnt/files";

/// Header written by `ansible-vault` at the start of every encrypted file.
pub const VAULT_HEADER: &str = "$ANSIBLE_VAULT";

/// Environment name of the operator's own machine.
pub const LOCAL_ENV: &str = "local";

/// Stack identifier used when an environment name carries no digits.
pub const LOCAL_STACK: &str = "00";

/// The loopback inventory used for local aliases (trailing comma makes it a host list).
pub const LOOPBACK_INVENTORY: &str = "127.0.0.1,";

/// Subdirectory of the user's data dir holding the default assets.
pub const DEFAULT_ASSETS_SUBDIR: &str = "secrets-deploy/ansible";
