// src/core/file_overrides.rs

use crate::models::EnvironmentFacts;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Relative file id (with `/` separators) to the file that will be deployed for it.
pub type FileOverrideMap = BTreeMap<String, PathBuf>;

/// Merges the override trees that apply to an environment.
///
/// Directories are visited from least to most specific (common, alias, site,
/// env, stack, stack class) and a later file replaces an earlier one with the
/// same relative id. Returns `None` when no directory contributed any file.
pub fn collect_files(facts: &EnvironmentFacts, files_root: &Path) -> Option<FileOverrideMap> {
    let mut files = FileOverrideMap::new();

    for override_dir in facts.override_dirs() {
        let base = files_root.join(override_dir);
        if !base.is_dir() {
            continue;
        }
        log::debug!("Collecting override files from '{}'", base.display());

        for entry in WalkDir::new(&base)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| match e {
                Ok(entry) => Some(entry),
                Err(err) => {
                    log::warn!("Skipping unreadable entry under '{}': {}", base.display(), err);
                    None
                }
            })
            .filter(|e| !e.file_type().is_dir())
        {
            let Ok(relative) = entry.path().strip_prefix(&base) else {
                continue;
            };
            let file_id = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");

            if let Some(previous) = files.insert(file_id.clone(), entry.path().to_path_buf()) {
                log::debug!(
                    "'{}' overrides '{}' for '{}'",
                    entry.path().display(),
                    previous.display(),
                    file_id
                );
            }
        }
    }

    if files.is_empty() { None } else { Some(files) }
}
