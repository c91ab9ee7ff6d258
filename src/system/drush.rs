// src/system/drush.rs

use crate::system::executor::CommandLine;

pub const DRUSH: &str = "drush";

/// Lists every site alias as a JSON object keyed by alias name.
pub fn list_aliases() -> CommandLine {
    CommandLine::new(DRUSH).args(["site:alias", "--format=json"])
}
