use std::collections::BTreeSet;

use async_trait::async_trait;

use crate::error::{DirectoryError, RoleResolverError};
use crate::filter::SearchFilter;
use crate::models::{DirectoryEntry, RoleName};

/// Directory query capability.
#[async_trait]
pub trait DirectorySearch: Send + Sync {
    /// Return every entry matching `filter`.
    ///
    /// # Errors
    ///
    /// - `InvalidFilter` if the filter cannot be rendered or parsed
    /// - `Unavailable` or `Timeout` if the directory cannot be queried
    async fn search(&self, filter: &SearchFilter) -> Result<Vec<DirectoryEntry>, DirectoryError>;
}

/// Role derivation from directory entries.
#[async_trait]
pub trait GroupRoleResolver: Send + Sync {
    /// Look up the user entry for `username` and derive all its roles.
    ///
    /// # Errors
    ///
    /// - `UserNotFound` if no entry matches
    /// - `MultipleEntries` if several entries match and that is not allowed
    /// - `Directory` if a search fails
    async fn roles_for_user(&self, username: &str) -> Result<BTreeSet<RoleName>, RoleResolverError>;

    /// Derive roles from the groups that list `entry` as a member.
    ///
    /// # Errors
    ///
    /// Returns `Directory` if the group search fails.
    async fn groups_for_entry(
        &self,
        entry: &DirectoryEntry,
    ) -> Result<BTreeSet<RoleName>, RoleResolverError>;
}
