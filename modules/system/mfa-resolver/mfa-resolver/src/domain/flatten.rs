//! Provider flattening.
//!
//! Expands provider and provider-group identifiers into the flat candidate
//! set actually available. Groups may nest; a group reachable from itself is
//! a configuration fault. Identifiers that resolve to nothing are dropped.

use mfa_resolver_sdk::{ProviderEntry, ProviderRegistry, ProviderSet};
use tracing::debug;

use super::error::DomainError;

/// Flatten `ids` through `registry`.
///
/// The result is a set: order of `ids` and duplicates do not matter, and
/// flattening the same input twice yields the same set.
///
/// # Errors
///
/// Returns `ProviderGroupCycle` if a group transitively contains itself.
pub fn flatten<S: AsRef<str>>(
    ids: &[S],
    registry: &dyn ProviderRegistry,
) -> Result<ProviderSet, DomainError> {
    let mut out = ProviderSet::new();
    let mut path: Vec<String> = Vec::new();
    for id in ids {
        expand(id.as_ref(), registry, &mut path, &mut out)?;
    }
    Ok(out)
}

fn expand(
    id: &str,
    registry: &dyn ProviderRegistry,
    path: &mut Vec<String>,
    out: &mut ProviderSet,
) -> Result<(), DomainError> {
    match registry.lookup(id) {
        None => {
            debug!(provider_id = id, "No multifactor provider registered under id");
        }
        Some(ProviderEntry::Provider(provider)) => {
            out.insert(provider);
        }
        Some(ProviderEntry::Group { members }) => {
            if path.iter().any(|g| g == id) {
                return Err(DomainError::ProviderGroupCycle {
                    group: id.to_owned(),
                });
            }
            path.push(id.to_owned());
            for member in &members {
                expand(member, registry, path, out)?;
            }
            path.pop();
        }
    }
    Ok(())
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::domain::test_support::{FakeProvider, MapRegistry};

    fn ids(set: &ProviderSet) -> Vec<&str> {
        set.ids().collect()
    }

    #[test]
    fn flattens_plain_providers() {
        let registry = MapRegistry::new()
            .provider(FakeProvider::available("mfa-duo", 10))
            .provider(FakeProvider::available("mfa-gauth", 5));

        let set = flatten(&["mfa-gauth", "mfa-duo"], &registry).unwrap();

        assert_eq!(ids(&set), vec!["mfa-duo", "mfa-gauth"]);
    }

    #[test]
    fn expands_nested_groups() {
        let registry = MapRegistry::new()
            .provider(FakeProvider::available("mfa-duo", 10))
            .provider(FakeProvider::available("mfa-gauth", 5))
            .provider(FakeProvider::available("mfa-yubikey", 20))
            .group("otp", &["mfa-gauth", "mfa-yubikey"])
            .group("any", &["otp", "mfa-duo"]);

        let set = flatten(&["any"], &registry).unwrap();

        assert_eq!(ids(&set), vec!["mfa-duo", "mfa-gauth", "mfa-yubikey"]);
    }

    #[test]
    fn shared_members_are_not_a_cycle() {
        let registry = MapRegistry::new()
            .provider(FakeProvider::available("mfa-duo", 10))
            .group("left", &["mfa-duo"])
            .group("right", &["mfa-duo"])
            .group("both", &["left", "right"]);

        let set = flatten(&["both", "left"], &registry).unwrap();

        assert_eq!(ids(&set), vec!["mfa-duo"]);
    }

    #[test]
    fn unknown_ids_are_dropped() {
        let registry = MapRegistry::new().provider(FakeProvider::available("mfa-duo", 10));

        let set = flatten(&["mfa-missing", "mfa-duo"], &registry).unwrap();
        assert_eq!(ids(&set), vec!["mfa-duo"]);

        let empty = flatten(&["mfa-missing"], &registry).unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn flatten_is_idempotent_and_order_insensitive() {
        let registry = MapRegistry::new()
            .provider(FakeProvider::available("mfa-duo", 10))
            .provider(FakeProvider::available("mfa-gauth", 5))
            .group("otp", &["mfa-gauth"]);

        let first = flatten(&["otp", "mfa-duo"], &registry).unwrap();
        let second = flatten(&["mfa-duo", "otp", "mfa-duo"], &registry).unwrap();

        assert_eq!(ids(&first), ids(&second));
    }

    #[test]
    fn self_referencing_group_is_a_cycle() {
        let registry = MapRegistry::new()
            .provider(FakeProvider::available("mfa-duo", 10))
            .group("a", &["mfa-duo", "b"])
            .group("b", &["a"]);

        let err = flatten(&["a"], &registry).unwrap_err();

        assert!(matches!(err, DomainError::ProviderGroupCycle { group } if group == "a"));
    }
}
