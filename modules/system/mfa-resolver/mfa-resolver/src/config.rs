//! Configuration for the multifactor resolver.
//!
//! Layered with `figment`: built-in defaults, then an optional YAML file,
//! then `MFA_RESOLVER__*` environment variables (`__` separates nested keys).

use std::path::Path;

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use serde::{Deserialize, Serialize};

/// Environment variable prefix for overrides.
pub const ENV_PREFIX: &str = "MFA_RESOLVER__";

/// Configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MfaResolverConfig {
    /// Provider selection strategy.
    pub selector: SelectorConfig,
    /// Resolvers to consult, in order.
    pub chain: Vec<ResolverKind>,
    /// Request parameter read by the request-parameter resolver.
    pub request_parameter: String,
}

impl Default for MfaResolverConfig {
    fn default() -> Self {
        Self {
            selector: SelectorConfig::default(),
            chain: vec![
                ResolverKind::RequestParameter,
                ResolverKind::RegisteredServicePrincipalAttribute,
                ResolverKind::RegisteredServicePolicy,
            ],
            request_parameter: "authn_method".to_owned(),
        }
    }
}

impl MfaResolverConfig {
    /// Load the layered configuration.
    ///
    /// # Errors
    ///
    /// Returns a `figment::Error` if a layer cannot be parsed or a value has
    /// the wrong shape.
    pub fn load(path: Option<&Path>) -> Result<Self, figment::Error> {
        Self::figment(path).extract()
    }

    /// The layered source, exposed so callers can merge further providers.
    #[must_use]
    pub fn figment(path: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = path {
            figment = figment.merge(Yaml::file(path));
        }
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }
}

/// How one provider is chosen from several candidates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum SelectorConfig {
    /// Highest rank; ties broken by smallest id.
    #[default]
    Ranked,
    /// Smallest provider id.
    First,
    /// Provider named by a principal attribute, else ranked.
    PrincipalAttribute { attribute: String },
}

impl SelectorConfig {
    /// Strategy name as written in configuration.
    #[must_use]
    pub fn strategy(&self) -> &'static str {
        match self {
            Self::Ranked => "ranked",
            Self::First => "first",
            Self::PrincipalAttribute { .. } => "principal_attribute",
        }
    }
}

/// A link in the resolver chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolverKind {
    RequestParameter,
    RegisteredServicePrincipalAttribute,
    RegisteredServicePolicy,
}

impl ResolverKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::RequestParameter => "request_parameter",
            Self::RegisteredServicePrincipalAttribute => "registered_service_principal_attribute",
            Self::RegisteredServicePolicy => "registered_service_policy",
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn defaults_without_sources() {
        Jail::expect_with(|_jail| {
            let cfg = MfaResolverConfig::load(None)?;

            assert_eq!(cfg, MfaResolverConfig::default());
            assert_eq!(cfg.selector, SelectorConfig::Ranked);
            assert_eq!(cfg.chain.len(), 3);
            assert_eq!(cfg.request_parameter, "authn_method");
            Ok(())
        });
    }

    #[test]
    fn yaml_file_overrides_defaults() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "mfa.yaml",
                r"
selector:
  strategy: principal_attribute
  attribute: preferredMfa
chain:
  - registered_service_policy
",
            )?;

            let cfg = MfaResolverConfig::load(Some(Path::new("mfa.yaml")))?;

            assert_eq!(
                cfg.selector,
                SelectorConfig::PrincipalAttribute {
                    attribute: "preferredMfa".to_owned()
                }
            );
            assert_eq!(cfg.chain, vec![ResolverKind::RegisteredServicePolicy]);
            assert_eq!(cfg.request_parameter, "authn_method");
            Ok(())
        });
    }

    #[test]
    fn environment_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file("mfa.yaml", "request_parameter: mfa_provider\n")?;
            jail.set_env("MFA_RESOLVER__REQUEST_PARAMETER", "authn_provider");
            jail.set_env("MFA_RESOLVER__SELECTOR__STRATEGY", "first");

            let cfg = MfaResolverConfig::load(Some(Path::new("mfa.yaml")))?;

            assert_eq!(cfg.request_parameter, "authn_provider");
            assert_eq!(cfg.selector, SelectorConfig::First);
            Ok(())
        });
    }

    #[test]
    fn unknown_keys_are_rejected() {
        Jail::expect_with(|jail| {
            jail.create_file("mfa.yaml", "selectr:\n  strategy: first\n")?;

            assert!(MfaResolverConfig::load(Some(Path::new("mfa.yaml"))).is_err());
            Ok(())
        });
    }

    #[test]
    fn audit_cannot_be_switched_off() {
        Jail::expect_with(|jail| {
            jail.create_file("mfa.yaml", "audit:\n  enabled: false\n")?;

            assert!(MfaResolverConfig::load(Some(Path::new("mfa.yaml"))).is_err());
            Ok(())
        });
    }

    #[test]
    fn unknown_resolver_kind_is_rejected() {
        Jail::expect_with(|jail| {
            jail.create_file("mfa.yaml", "chain: [adaptive]\n")?;

            assert!(MfaResolverConfig::load(Some(Path::new("mfa.yaml"))).is_err());
            Ok(())
        });
    }
}
