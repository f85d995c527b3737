//! Group-membership role resolver.

use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;
use role_resolver_sdk::{
    DirectoryEntry, DirectorySearch, GroupRoleResolver, RoleName, RoleResolverError, SearchFilter,
};
use tracing::{debug, warn};

use crate::config::DirectoryGroupsConfig;

/// Placeholder bound to the username (user search) or user DN (group search).
const USER_PARAM: &str = "user";

pub struct DirectoryGroupsRoleResolver {
    directory: Arc<dyn DirectorySearch>,
    user_filter: String,
    allow_multiple_results: bool,
    group_filter: String,
    group_attribute: String,
    group_prefix: String,
}

impl DirectoryGroupsRoleResolver {
    #[must_use]
    pub fn new(directory: Arc<dyn DirectorySearch>, cfg: &DirectoryGroupsConfig) -> Self {
        Self {
            directory,
            user_filter: cfg.user_filter.clone(),
            allow_multiple_results: cfg.allow_multiple_results,
            group_filter: cfg.group_filter.clone(),
            group_attribute: cfg.group_attribute.clone(),
            group_prefix: cfg.group_prefix.clone(),
        }
    }

    async fn find_user(&self, username: &str) -> Result<DirectoryEntry, RoleResolverError> {
        let filter = SearchFilter::new(self.user_filter.as_str()).with_param(USER_PARAM, username);
        let mut entries = self.directory.search(&filter).await?;

        match entries.len() {
            0 => Err(RoleResolverError::UserNotFound {
                username: username.to_owned(),
            }),
            1 => Ok(entries.swap_remove(0)),
            count if !self.allow_multiple_results => Err(RoleResolverError::MultipleEntries {
                username: username.to_owned(),
                count,
            }),
            count => {
                warn!(username, count, "Multiple user entries found; using the first");
                Ok(entries.swap_remove(0))
            }
        }
    }
}

#[async_trait]
impl GroupRoleResolver for DirectoryGroupsRoleResolver {
    #[tracing::instrument(skip_all)]
    async fn roles_for_user(
        &self,
        username: &str,
    ) -> Result<BTreeSet<RoleName>, RoleResolverError> {
        // Roles come from group membership only, never from the user entry.
        let entry = self.find_user(username).await?;
        let roles = self.groups_for_entry(&entry).await?;

        debug!(username, roles = roles.len(), "Resolved directory roles");
        Ok(roles)
    }

    async fn groups_for_entry(
        &self,
        entry: &DirectoryEntry,
    ) -> Result<BTreeSet<RoleName>, RoleResolverError> {
        debug!(dn = %entry.dn, "Attempting to get roles for user");
        let filter = SearchFilter::new(self.group_filter.as_str())
            .with_param(USER_PARAM, entry.dn.as_str());
        let groups = self.directory.search(&filter).await?;

        let mut roles = BTreeSet::new();
        for group in &groups {
            let Some(values) = group.attribute(&self.group_attribute) else {
                warn!(
                    dn = %group.dn,
                    attribute = %self.group_attribute,
                    "Role attribute not found on group entry"
                );
                continue;
            };
            roles.extend(
                values
                    .iter()
                    .filter(|v| !v.trim().is_empty())
                    .map(|v| RoleName::from_value(&self.group_prefix, v.trim())),
            );
        }
        Ok(roles)
    }
}
