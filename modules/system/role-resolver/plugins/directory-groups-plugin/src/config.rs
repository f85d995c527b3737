//! Configuration for the directory groups role plugin.

use std::path::Path;

use figment::Figment;
use figment::providers::{Format, Yaml};
use role_resolver_sdk::DirectoryEntry;
use serde::Deserialize;

/// Plugin configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DirectoryGroupsConfig {
    /// Filter locating the user entry; `{user}` is the username.
    pub user_filter: String,

    /// Accept several user entries (the first one is used).
    pub allow_multiple_results: bool,

    /// Filter locating group entries; `{user}` is the user's DN.
    pub group_filter: String,

    /// Group-entry attribute whose values are roles.
    pub group_attribute: String,

    pub group_prefix: String,

    /// Entries for the in-memory directory.
    pub entries: Vec<DirectoryEntry>,
}

impl Default for DirectoryGroupsConfig {
    fn default() -> Self {
        Self {
            user_filter: "(uid={user})".to_owned(),
            allow_multiple_results: false,
            group_filter: "(member={user})".to_owned(),
            group_attribute: "cn".to_owned(),
            group_prefix: "ROLE_".to_owned(),
            entries: Vec::new(),
        }
    }
}

impl DirectoryGroupsConfig {
    /// Read the configuration from a YAML file, over the defaults.
    ///
    /// # Errors
    ///
    /// Returns a `figment::Error` if the file does not match the
    /// configuration shape.
    pub fn from_yaml_file(path: &Path) -> Result<Self, figment::Error> {
        Figment::from(Yaml::file(path)).extract()
    }
}
