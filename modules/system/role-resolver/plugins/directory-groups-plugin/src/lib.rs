#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Directory Groups Role Plugin
//!
//! Derives authorization roles for a user from a directory: the user entry
//! is located with `user_filter`, then every group entry matched by
//! `group_filter` (with the user's DN bound to `{user}`) contributes
//! `group_prefix + VALUE` for each value of its `group_attribute`.
//!
//! ## Configuration
//!
//! ```yaml
//! user_filter: "(uid={user})"
//! allow_multiple_results: false
//! group_filter: "(member={user})"
//! group_attribute: cn
//! group_prefix: "ROLE_"
//! entries:
//!   - dn: "uid=casuser,ou=people,dc=example,dc=org"
//!     attributes:
//!       uid: [casuser]
//! ```
//!
//! `entries` seeds the in-memory directory used when no other
//! [`role_resolver_sdk::DirectorySearch`] is supplied.

pub mod config;
pub mod domain;
pub mod module;

pub use module::DirectoryGroupsPlugin;
