//! Multifactor resolver module.

use std::collections::HashSet;
use std::sync::Arc;

use anyhow::bail;
use mfa_resolver_sdk::{AuditSink, EventResolver, ProviderRegistry, ProviderSelector};
use tracing::info;

use crate::config::{MfaResolverConfig, ResolverKind, SelectorConfig};
use crate::domain::{
    DecisionPipeline, FirstProviderSelector, PrincipalAttributeProviderSelector,
    PrincipalAttributeTriggerResolver, RankedProviderSelector, RegisteredServicePolicyResolver,
    RequestParameterResolver, ResolverChain, TracingAuditSink,
};

/// Multifactor resolver module.
///
/// This module:
/// 1. Builds the configured provider selector
/// 2. Wires the shared decision pipeline to the provider registry and audit sink
/// 3. Assembles the resolver chain in configured order
pub struct MfaResolverModule {
    chain: Arc<ResolverChain>,
}

impl MfaResolverModule {
    /// Build the module from configuration.
    ///
    /// Without an explicit sink, decisions are audited to the tracing `audit`
    /// target.
    ///
    /// # Errors
    ///
    /// Returns an error if the chain names a resolver twice, is empty, or the
    /// selector configuration is incomplete.
    #[tracing::instrument(skip_all, fields(selector))]
    pub fn init(
        cfg: &MfaResolverConfig,
        registry: Arc<dyn ProviderRegistry>,
        audit: Option<Arc<dyn AuditSink>>,
    ) -> anyhow::Result<Self> {
        let selector = build_selector(&cfg.selector)?;
        tracing::Span::current().record("selector", cfg.selector.strategy());

        let audit = audit.unwrap_or_else(|| Arc::new(TracingAuditSink) as Arc<dyn AuditSink>);
        let pipeline = Arc::new(DecisionPipeline::new(registry, selector, audit));

        if cfg.chain.is_empty() {
            bail!("resolver chain must name at least one resolver");
        }
        let mut seen = HashSet::new();
        let mut resolvers: Vec<Arc<dyn EventResolver>> = Vec::with_capacity(cfg.chain.len());
        for kind in &cfg.chain {
            if !seen.insert(*kind) {
                bail!("resolver '{}' appears more than once in the chain", kind.as_str());
            }
            let resolver: Arc<dyn EventResolver> = match kind {
                ResolverKind::RequestParameter => {
                    if cfg.request_parameter.trim().is_empty() {
                        bail!("request_parameter must not be blank");
                    }
                    Arc::new(RequestParameterResolver::new(
                        cfg.request_parameter.trim(),
                        pipeline.clone(),
                    ))
                }
                ResolverKind::RegisteredServicePrincipalAttribute => {
                    Arc::new(PrincipalAttributeTriggerResolver::new(pipeline.clone()))
                }
                ResolverKind::RegisteredServicePolicy => {
                    Arc::new(RegisteredServicePolicyResolver::new(pipeline.clone()))
                }
            };
            resolvers.push(resolver);
        }

        let chain = ResolverChain::new(resolvers);
        info!(
            resolvers = ?chain.names().collect::<Vec<_>>(),
            "Initialized mfa_resolver"
        );

        Ok(Self {
            chain: Arc::new(chain),
        })
    }

    /// The assembled chain, as a single resolver.
    #[must_use]
    pub fn resolver(&self) -> Arc<dyn EventResolver> {
        self.chain.clone()
    }
}

fn build_selector(cfg: &SelectorConfig) -> anyhow::Result<Arc<dyn ProviderSelector>> {
    let selector: Arc<dyn ProviderSelector> = match cfg {
        SelectorConfig::Ranked => Arc::new(RankedProviderSelector),
        SelectorConfig::First => Arc::new(FirstProviderSelector),
        SelectorConfig::PrincipalAttribute { attribute } => {
            if attribute.trim().is_empty() {
                bail!("principal_attribute selector requires a non-blank attribute");
            }
            Arc::new(PrincipalAttributeProviderSelector::new(attribute.trim()))
        }
    };
    Ok(selector)
}
