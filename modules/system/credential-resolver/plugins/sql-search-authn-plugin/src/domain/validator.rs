//! Search-mode credential validation.

use async_trait::async_trait;
use credential_resolver_sdk::{AuthFailure, Credential, CredentialValidator};
use regex::Regex;
use secrecy::ExposeSecret;
use sha2::{Digest, Sha256};
use sqlx::AnyPool;
use sso_security::Principal;
use tracing::{debug, warn};

use crate::config::{PasswordEncoding, SqlSearchConfig};

/// Bind-parameter syntax of the target database.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqlDialect {
    /// `$1`, `$2`, ...
    Postgres,
    /// `?`
    Generic,
}

impl SqlDialect {
    /// Infer the dialect from a connection URL scheme.
    #[must_use]
    pub fn from_url(url: &str) -> Self {
        if url.starts_with("postgres:") || url.starts_with("postgresql:") {
            Self::Postgres
        } else {
            Self::Generic
        }
    }

    fn placeholders(self) -> (&'static str, &'static str) {
        match self {
            Self::Postgres => ("$1", "$2"),
            Self::Generic => ("?", "?"),
        }
    }
}

impl PasswordEncoding {
    fn encode(self, password: &str) -> String {
        match self {
            Self::Plain => password.to_owned(),
            Self::Sha256Hex => hex::encode(Sha256::digest(password.as_bytes())),
        }
    }
}

/// Validates credentials by counting matching rows.
pub struct SearchModeValidator {
    pool: AnyPool,
    sql: String,
    encoding: PasswordEncoding,
}

impl SearchModeValidator {
    /// Build the validator and its query.
    ///
    /// # Errors
    ///
    /// Returns `Misconfigured` if the table or a column name is blank or not
    /// a plain SQL identifier.
    pub fn new(
        pool: AnyPool,
        cfg: &SqlSearchConfig,
        dialect: SqlDialect,
    ) -> Result<Self, AuthFailure> {
        let identifier = Regex::new(r"^[A-Za-z_][A-Za-z0-9_.]*$")
            .map_err(|e| AuthFailure::Misconfigured(e.to_string()))?;
        for (name, value) in [
            ("table_users", &cfg.table_users),
            ("field_user", &cfg.field_user),
            ("field_password", &cfg.field_password),
        ] {
            if !identifier.is_match(value.trim()) {
                return Err(AuthFailure::Misconfigured(format!(
                    "{name} must be a non-blank SQL identifier, got '{value}'"
                )));
            }
        }

        let (user_param, password_param) = dialect.placeholders();
        let sql = format!(
            "SELECT COUNT('x') FROM {} WHERE {} = {user_param} AND {} = {password_param}",
            cfg.table_users.trim(),
            cfg.field_user.trim(),
            cfg.field_password.trim(),
        );
        debug!(sql = %sql, "Prepared search-mode credential query");

        Ok(Self {
            pool,
            sql,
            encoding: cfg.password_encoding,
        })
    }
}

#[async_trait]
impl CredentialValidator for SearchModeValidator {
    #[tracing::instrument(skip_all)]
    async fn validate(&self, credential: &Credential) -> Result<Principal, AuthFailure> {
        let encoded = self.encoding.encode(credential.password.expose_secret());

        let count = sqlx::query_scalar::<_, i64>(&self.sql)
            .bind(credential.username.clone())
            .bind(encoded)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                warn!(error = %e, "Credential search query failed");
                AuthFailure::BackendUnavailable(e.to_string())
            })?;

        if count == 0 {
            debug!(username = %credential.username, "No account matches the presented credential");
            return Err(AuthFailure::NotFound);
        }

        Ok(Principal::new(credential.username.clone()))
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use sqlx::any::AnyPoolOptions;
    use tracing_test::traced_test;

    fn config(encoding: PasswordEncoding) -> SqlSearchConfig {
        SqlSearchConfig {
            table_users: "users".to_owned(),
            field_user: "username".to_owned(),
            field_password: "password".to_owned(),
            password_encoding: encoding,
        }
    }

    async fn pool() -> AnyPool {
        sqlx::any::install_default_drivers();
        let pool = AnyPoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        sqlx::query("CREATE TABLE users (username TEXT NOT NULL, password TEXT NOT NULL)")
            .execute(&pool)
            .await
            .unwrap();
        sqlx::query("INSERT INTO users (username, password) VALUES ('casuser', 'Mellon')")
            .execute(&pool)
            .await
            .unwrap();
        let digest = PasswordEncoding::Sha256Hex.encode("Mellon");
        sqlx::query("INSERT INTO users (username, password) VALUES ('bob', ?)")
            .bind(digest)
            .execute(&pool)
            .await
            .unwrap();
        pool
    }

    #[tokio::test]
    async fn matching_row_authenticates() {
        let validator =
            SearchModeValidator::new(pool().await, &config(PasswordEncoding::Plain), SqlDialect::Generic)
                .unwrap();

        let principal = validator
            .validate(&Credential::new("casuser", "Mellon"))
            .await
            .unwrap();

        assert_eq!(principal.id(), "casuser");
    }

    #[tokio::test]
    async fn zero_rows_is_not_found() {
        let validator =
            SearchModeValidator::new(pool().await, &config(PasswordEncoding::Plain), SqlDialect::Generic)
                .unwrap();

        let err = validator
            .validate(&Credential::new("alice", "secret"))
            .await
            .unwrap_err();

        assert_eq!(err, AuthFailure::NotFound);
    }

    #[tokio::test]
    async fn wrong_password_is_not_found() {
        let validator =
            SearchModeValidator::new(pool().await, &config(PasswordEncoding::Plain), SqlDialect::Generic)
                .unwrap();

        let err = validator
            .validate(&Credential::new("casuser", "mellon"))
            .await
            .unwrap_err();

        assert_eq!(err, AuthFailure::NotFound);
    }

    #[tokio::test]
    async fn hashed_passwords_are_compared_encoded() {
        let validator = SearchModeValidator::new(
            pool().await,
            &config(PasswordEncoding::Sha256Hex),
            SqlDialect::Generic,
        )
        .unwrap();

        assert!(validator.validate(&Credential::new("bob", "Mellon")).await.is_ok());
        assert_eq!(
            validator
                .validate(&Credential::new("casuser", "Mellon"))
                .await
                .unwrap_err(),
            AuthFailure::NotFound
        );
    }

    #[tokio::test]
    #[traced_test]
    async fn query_failure_is_backend_unavailable() {
        let cfg = SqlSearchConfig {
            table_users: "accounts".to_owned(),
            ..config(PasswordEncoding::Plain)
        };
        let validator = SearchModeValidator::new(pool().await, &cfg, SqlDialect::Generic).unwrap();

        let err = validator
            .validate(&Credential::new("casuser", "Mellon"))
            .await
            .unwrap_err();

        assert!(matches!(err, AuthFailure::BackendUnavailable(_)));
        assert!(logs_contain("Credential search query failed"));
    }

    #[tokio::test]
    async fn unsafe_identifiers_are_misconfigured() {
        let pool = pool().await;
        for table in ["", "  ", "users; DROP TABLE users", "1users"] {
            let cfg = SqlSearchConfig {
                table_users: table.to_owned(),
                ..config(PasswordEncoding::Plain)
            };

            assert!(matches!(
                SearchModeValidator::new(pool.clone(), &cfg, SqlDialect::Generic),
                Err(AuthFailure::Misconfigured(_))
            ));
        }
    }

    #[test]
    fn dialect_follows_url_scheme() {
        assert_eq!(SqlDialect::from_url("postgres://db/accounts"), SqlDialect::Postgres);
        assert_eq!(SqlDialect::from_url("postgresql://db/accounts"), SqlDialect::Postgres);
        assert_eq!(SqlDialect::from_url("sqlite::memory:"), SqlDialect::Generic);
        assert_eq!(SqlDialect::Postgres.placeholders(), ("$1", "$2"));
    }

    #[test]
    fn sha256_encoding_is_lowercase_hex() {
        assert_eq!(
            PasswordEncoding::Sha256Hex.encode("Mellon"),
            hex::encode(Sha256::digest(b"Mellon"))
        );
        assert_eq!(PasswordEncoding::Sha256Hex.encode("Mellon").len(), 64);
    }
}
