//! Directory groups role plugin module.

use std::sync::Arc;

use role_resolver_sdk::{DirectorySearch, GroupRoleResolver};
use tracing::info;

use crate::config::DirectoryGroupsConfig;
use crate::domain::{DirectoryGroupsRoleResolver, StaticDirectory};

/// Directory groups role plugin.
pub struct DirectoryGroupsPlugin {
    resolver: Arc<DirectoryGroupsRoleResolver>,
}

impl DirectoryGroupsPlugin {
    /// Build the plugin.
    ///
    /// Without a `directory`, an in-memory directory seeded from
    /// `cfg.entries` is used.
    ///
    /// # Errors
    ///
    /// Returns an error if a filter template or the group attribute is blank.
    pub fn init(
        cfg: &DirectoryGroupsConfig,
        directory: Option<Arc<dyn DirectorySearch>>,
    ) -> anyhow::Result<Self> {
        info!("Initializing directory_groups_plugin");

        for (name, value) in [
            ("user_filter", &cfg.user_filter),
            ("group_filter", &cfg.group_filter),
            ("group_attribute", &cfg.group_attribute),
        ] {
            if value.trim().is_empty() {
                anyhow::bail!("{name} must not be blank");
            }
        }

        let directory = directory.unwrap_or_else(|| {
            info!(
                entries = cfg.entries.len(),
                "Using in-memory directory"
            );
            Arc::new(StaticDirectory::new(cfg.entries.clone()))
        });

        info!(
            group_attribute = %cfg.group_attribute,
            allow_multiple_results = cfg.allow_multiple_results,
            "Loaded plugin configuration"
        );
        Ok(Self {
            resolver: Arc::new(DirectoryGroupsRoleResolver::new(directory, cfg)),
        })
    }

    #[must_use]
    pub fn resolver(&self) -> Arc<dyn GroupRoleResolver> {
        self.resolver.clone()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use role_resolver_sdk::DirectoryEntry;

    #[tokio::test]
    async fn static_directory_is_seeded_from_config() {
        let cfg = DirectoryGroupsConfig {
            entries: vec![
                DirectoryEntry::new("uid=casuser,ou=people").with_attribute("uid", ["casuser"]),
                DirectoryEntry::new("cn=staff,ou=groups")
                    .with_attribute("cn", ["staff"])
                    .with_attribute("member", ["uid=casuser,ou=people"]),
            ],
            ..DirectoryGroupsConfig::default()
        };

        let plugin = DirectoryGroupsPlugin::init(&cfg, None).unwrap();
        let roles = plugin.resolver().roles_for_user("casuser").await.unwrap();

        assert_eq!(
            roles.iter().map(ToString::to_string).collect::<Vec<_>>(),
            vec!["ROLE_STAFF"]
        );
    }

    #[test]
    fn blank_group_attribute_is_rejected() {
        let cfg = DirectoryGroupsConfig {
            group_attribute: " ".to_owned(),
            ..DirectoryGroupsConfig::default()
        };

        assert!(DirectoryGroupsPlugin::init(&cfg, None).is_err());
    }
}
