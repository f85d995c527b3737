#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! SQL Search-Mode Credential Plugin
//!
//! Validates a username/password pair by counting the rows of a users table
//! where both columns match:
//!
//! ```sql
//! SELECT COUNT('x') FROM <table_users> WHERE <field_user> = ? AND <field_password> = ?
//! ```
//!
//! A count of zero means no such account. The password is encoded before the
//! comparison (`plain` or `sha256_hex`).
//!
//! ## Configuration
//!
//! ```yaml
//! database_url: "postgres://sso@db/accounts"
//! max_connections: 5
//! table_users: users
//! field_user: username
//! field_password: password
//! password_encoding: sha256_hex
//! ```

pub mod config;
pub mod domain;
pub mod module;

pub use module::SqlSearchAuthnPlugin;
