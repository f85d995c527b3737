//! Configuration for the SQL search-mode credential plugin.

use secrecy::SecretString;
use serde::Deserialize;

/// Plugin configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SqlSearchAuthnPluginConfig {
    /// Connection URL. Held as a secret because it usually embeds credentials.
    pub database_url: SecretString,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    #[serde(flatten)]
    pub search: SqlSearchConfig,
}

fn default_max_connections() -> u32 {
    5
}

/// Table and column names used by the search query.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct SqlSearchConfig {
    pub table_users: String,
    pub field_user: String,
    pub field_password: String,
    #[serde(default)]
    pub password_encoding: PasswordEncoding,
}

/// How the presented password is encoded before comparison.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PasswordEncoding {
    /// Compared as presented.
    #[default]
    Plain,
    /// Lowercase hex SHA-256 digest.
    Sha256Hex,
}
