//! Configuration for the static multifactor resolver plugin.

use std::path::Path;

use figment::Figment;
use figment::providers::{Format, Yaml};
use mfa_resolver_sdk::RegisteredService;
use serde::Deserialize;

/// Plugin configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StaticMfaPluginConfig {
    /// Concrete providers.
    pub providers: Vec<ProviderConfig>,

    /// Named groups of alternative providers. Members may be groups.
    pub groups: Vec<GroupConfig>,

    /// Registered services and their multifactor policies.
    pub services: Vec<RegisteredService>,
}

impl StaticMfaPluginConfig {
    /// Read the configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns a `figment::Error` if the file is not valid YAML or does not
    /// match the configuration shape.
    pub fn from_yaml_file(path: &Path) -> Result<Self, figment::Error> {
        Figment::from(Yaml::file(path)).extract()
    }

    /// Read the configuration from a YAML document.
    ///
    /// # Errors
    ///
    /// Same as [`Self::from_yaml_file`].
    pub fn from_yaml_str(yaml: &str) -> Result<Self, figment::Error> {
        Figment::from(Yaml::string(yaml)).extract()
    }
}

/// A statically configured provider.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProviderConfig {
    pub id: String,

    /// Higher is stronger.
    #[serde(default)]
    pub rank: i32,

    /// Global availability switch.
    #[serde(default = "default_available")]
    pub available: bool,

    /// Names of registered services this provider cannot serve.
    #[serde(default)]
    pub unavailable_for: Vec<String>,
}

fn default_available() -> bool {
    true
}

/// A named group of alternative provider ids.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GroupConfig {
    pub id: String,
    pub members: Vec<String>,
}
