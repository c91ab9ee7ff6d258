// src/core/alias_registry.rs

use crate::{
    core::error::{SecretsError, SecretsResult},
    models::EnvironmentRecord,
    system::{drush, executor::ProcessRunner},
};
use std::cell::OnceCell;
use std::collections::BTreeMap;
use std::path::Path;

/// The site aliases known to the project, loaded lazily and at most once.
///
/// One registry lives for one command run and is handed to whoever needs it;
/// it is never shared between runs.
pub struct AliasRegistry<'a> {
    runner: &'a dyn ProcessRunner,
    root: &'a Path,
    records: OnceCell<BTreeMap<String, EnvironmentRecord>>,
}

impl std::fmt::Debug for AliasRegistry<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AliasRegistry")
            .field("root", &self.root)
            .field("loaded", &self.records.get().map(BTreeMap::len))
            .finish()
    }
}

impl<'a> AliasRegistry<'a> {
    pub fn new(runner: &'a dyn ProcessRunner, root: &'a Path) -> Self {
        Self {
            runner,
            root,
            records: OnceCell::new(),
        }
    }

    /// Looks up an alias, listing the aliases on first use.
    pub fn get(&self, alias: &str) -> SecretsResult<&EnvironmentRecord> {
        self.records()?
            .get(alias)
            .ok_or_else(|| SecretsError::UnknownAlias {
                alias: alias.to_string(),
            })
    }

    fn records(&self) -> SecretsResult<&BTreeMap<String, EnvironmentRecord>> {
        if let Some(records) = self.records.get() {
            return Ok(records);
        }
        let output = self.runner.capture(&drush::list_aliases(), self.root)?;
        let parsed = parse_alias_listing(&output)?;
        log::debug!("Loaded {} site aliases", parsed.len());
        Ok(self.records.get_or_init(|| parsed))
    }
}

/// Parses the JSON alias listing. An empty listing is reported by drush as an
/// empty string or `[]` rather than `{}`, both are accepted.
pub fn parse_alias_listing(output: &str) -> SecretsResult<BTreeMap<String, EnvironmentRecord>> {
    let trimmed = output.trim();
    if trimmed.is_empty() || trimmed == "[]" {
        return Ok(BTreeMap::new());
    }
    Ok(serde_json::from_str(trimmed)?)
}
