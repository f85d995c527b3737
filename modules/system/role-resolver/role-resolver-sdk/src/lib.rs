//! Role Resolver SDK
//!
//! This crate provides the public API for deriving authorization roles from
//! a directory:
//!
//! - [`DirectorySearch`] - Directory query capability (LDAP or in-memory)
//! - [`GroupRoleResolver`] - Role derivation from user and group entries
//! - [`SearchFilter`] - Filter template with escaped parameters
//! - [`DirectoryEntry`], [`RoleName`] - Models
//! - [`DirectoryError`], [`RoleResolverError`] - Error types

pub mod api;
pub mod error;
pub mod filter;
pub mod models;

pub use api::{DirectorySearch, GroupRoleResolver};
pub use error::{DirectoryError, RoleResolverError};
pub use filter::{SearchFilter, escape_filter_value};
pub use models::{DirectoryEntry, RoleName};
