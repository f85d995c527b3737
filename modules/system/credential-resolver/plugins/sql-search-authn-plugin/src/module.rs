//! SQL search-mode credential plugin module.

use std::sync::Arc;

use anyhow::Context;
use credential_resolver_sdk::CredentialValidator;
use secrecy::ExposeSecret;
use sqlx::any::AnyPoolOptions;
use tracing::info;

use crate::config::SqlSearchAuthnPluginConfig;
use crate::domain::{SearchModeValidator, SqlDialect};

/// SQL search-mode credential plugin.
///
/// The connection pool is created lazily; the database is first contacted
/// by the first validation.
pub struct SqlSearchAuthnPlugin {
    validator: Arc<SearchModeValidator>,
}

impl SqlSearchAuthnPlugin {
    /// Build the plugin from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if called outside a Tokio runtime, the database URL
    /// cannot be parsed, or the table and column names are not valid
    /// identifiers.
    #[tracing::instrument(skip_all, fields(table = %cfg.search.table_users))]
    pub fn init(cfg: &SqlSearchAuthnPluginConfig) -> anyhow::Result<Self> {
        info!("Initializing sql_search_authn_plugin");

        // The lazy pool spawns its maintenance task on the current runtime.
        tokio::runtime::Handle::try_current()
            .context("sql_search_authn_plugin must be initialized within a Tokio runtime")?;
        sqlx::any::install_default_drivers();
        let url = cfg.database_url.expose_secret();
        let pool = AnyPoolOptions::new()
            .max_connections(cfg.max_connections)
            .connect_lazy(url)?;

        let validator = SearchModeValidator::new(pool, &cfg.search, SqlDialect::from_url(url))?;

        info!(
            max_connections = cfg.max_connections,
            encoding = ?cfg.search.password_encoding,
            "Loaded plugin configuration"
        );
        Ok(Self {
            validator: Arc::new(validator),
        })
    }

    #[must_use]
    pub fn validator(&self) -> Arc<dyn CredentialValidator> {
        self.validator.clone()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::config::{PasswordEncoding, SqlSearchConfig};
    use credential_resolver_sdk::{AuthFailure, Credential};
    use secrecy::SecretString;

    fn config(table: &str) -> SqlSearchAuthnPluginConfig {
        SqlSearchAuthnPluginConfig {
            database_url: SecretString::from("sqlite::memory:"),
            max_connections: 1,
            search: SqlSearchConfig {
                table_users: table.to_owned(),
                field_user: "username".to_owned(),
                field_password: "password".to_owned(),
                password_encoding: PasswordEncoding::Plain,
            },
        }
    }

    #[tokio::test]
    async fn missing_table_is_classified_as_backend_unavailable() {
        let plugin = SqlSearchAuthnPlugin::init(&config("users")).unwrap();

        let err = plugin
            .validator()
            .validate(&Credential::new("alice", "secret"))
            .await
            .unwrap_err();

        assert!(matches!(err, AuthFailure::BackendUnavailable(_)));
    }

    #[test]
    fn init_outside_runtime_is_an_error() {
        let err = SqlSearchAuthnPlugin::init(&config("users")).err().unwrap();

        assert!(err.to_string().contains("Tokio runtime"));
    }

    #[tokio::test]
    async fn invalid_table_name_fails_init() {
        let err = SqlSearchAuthnPlugin::init(&config("users where 1=1")).err().unwrap();

        assert!(err.to_string().contains("table_users"));
    }
}
