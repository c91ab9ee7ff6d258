// src/core/paths.rs

use crate::constants::{DEFAULT_ASSETS_SUBDIR, PROJECT_CONFIG_FILENAME};
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PathError {
    #[error("Could not find system data directory.")]
    DataDirNotFound,
    #[error("Could not determine the current directory: {0}")]
    CurrentDir(#[source] std::io::Error),
    #[error("Project root '{path}' is not accessible: {source}")]
    RootNotAccessible {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to expand path template '{template}': {reason}")]
    Expansion { template: String, reason: String },
}

/// Determines the repository root.
///
/// An explicit root always wins. Otherwise the nearest ancestor of `start`
/// holding a `secrets-deploy.toml` is used, falling back to `start` itself.
pub fn find_project_root(explicit: Option<&Path>, start: &Path) -> Result<PathBuf, PathError> {
    let candidate = match explicit {
        Some(root) => root.to_path_buf(),
        None => start
            .ancestors()
            .find(|dir| dir.join(PROJECT_CONFIG_FILENAME).is_file())
            .unwrap_or(start)
            .to_path_buf(),
    };

    dunce::canonicalize(&candidate).map_err(|e| PathError::RootNotAccessible {
        path: candidate.display().to_string(),
        source: e,
    })
}

/// Same as [`find_project_root`], starting from the current directory.
pub fn find_project_root_from_cwd(explicit: Option<&Path>) -> Result<PathBuf, PathError> {
    let cwd = std::env::current_dir().map_err(PathError::CurrentDir)?;
    find_project_root(explicit, &cwd)
}

/// Default location of the bundled templates and playbooks
/// (`~/.local/share/secrets-deploy/ansible` on Linux).
pub fn default_assets_dir() -> Result<PathBuf, PathError> {
    dirs::data_dir()
        .map(|dir| dir.join(DEFAULT_ASSETS_SUBDIR))
        .ok_or(PathError::DataDirNotFound)
}

/// Expands `~` and environment variables in a configured path. Relative
/// results are anchored at the project root.
pub fn expand_path_template(template: &str, root: &Path) -> Result<PathBuf, PathError> {
    let expanded = shellexpand::full(template).map_err(|e| PathError::Expansion {
        template: template.to_string(),
        reason: e.to_string(),
    })?;
    let path = PathBuf::from(expanded.into_owned());
    Ok(if path.is_absolute() { path } else { root.join(path) })
}

/// Path of `target` as seen from the directory `base`, both absolute and
/// lexically normalized (no symlink resolution), e.g.
/// `/r/vendor/x/config` → `/r/scripts/s.php` gives `../../../scripts/s.php`.
pub fn relative_path(base: &Path, target: &Path) -> PathBuf {
    let base = normalize(base);
    let target = normalize(target);

    let common = base
        .components()
        .zip(target.components())
        .take_while(|(a, b)| a == b)
        .count();

    let mut relative = PathBuf::new();
    for _ in base.components().skip(common) {
        relative.push("..");
    }
    for component in target.components().skip(common) {
        relative.push(component);
    }
    relative
}

fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other),
        }
    }
    normalized
}
