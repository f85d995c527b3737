#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use mfa_resolver_sdk::{
    AuditError, AuditRecord, AuditSink, MultifactorPolicy, MultifactorProvider, ProviderEntry,
    ProviderError, ProviderRegistry, RegisteredService,
};
use sso_security::Principal;

#[derive(Debug)]
pub struct FakeProvider {
    id: String,
    rank: i32,
    availability: Result<bool, ProviderError>,
}

impl FakeProvider {
    pub fn available(id: &str, rank: i32) -> Self {
        Self {
            id: id.to_owned(),
            rank,
            availability: Ok(true),
        }
    }

    pub fn unavailable(id: &str, rank: i32) -> Self {
        Self {
            availability: Ok(false),
            ..Self::available(id, rank)
        }
    }

    pub fn failing(id: &str, rank: i32, error: ProviderError) -> Self {
        Self {
            availability: Err(error),
            ..Self::available(id, rank)
        }
    }
}

#[async_trait]
impl MultifactorProvider for FakeProvider {
    fn id(&self) -> &str {
        &self.id
    }

    fn rank(&self) -> i32 {
        self.rank
    }

    async fn is_available(&self, _service: &RegisteredService) -> Result<bool, ProviderError> {
        self.availability.clone()
    }
}

#[derive(Default)]
pub struct MapRegistry {
    entries: HashMap<String, ProviderEntry>,
}

impl MapRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn provider(mut self, provider: FakeProvider) -> Self {
        self.entries.insert(
            provider.id.clone(),
            ProviderEntry::Provider(Arc::new(provider)),
        );
        self
    }

    pub fn group(mut self, id: &str, members: &[&str]) -> Self {
        self.entries.insert(
            id.to_owned(),
            ProviderEntry::Group {
                members: members.iter().map(|m| (*m).to_owned()).collect(),
            },
        );
        self
    }
}

impl ProviderRegistry for MapRegistry {
    fn lookup(&self, id: &str) -> Option<ProviderEntry> {
        self.entries.get(id).cloned()
    }
}

/// Audit sink that keeps records in memory, optionally failing every write.
#[derive(Default)]
pub struct RecordingAuditSink {
    records: Mutex<Vec<AuditRecord>>,
    fail: bool,
}

impl RecordingAuditSink {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn records(&self) -> Vec<AuditRecord> {
        self.records.lock().unwrap().clone()
    }
}

#[async_trait]
impl AuditSink for RecordingAuditSink {
    async fn record(&self, record: &AuditRecord) -> Result<(), AuditError> {
        if self.fail {
            return Err(AuditError::Unavailable("audit store offline".to_owned()));
        }
        self.records.lock().unwrap().push(record.clone());
        Ok(())
    }
}

pub fn principal() -> Principal {
    Principal::builder("casuser")
        .attribute("memberOf", "staff")
        .build()
}

pub fn service_with(policy: MultifactorPolicy) -> RegisteredService {
    RegisteredService::new(1, "payroll", "https://payroll.example.org").with_policy(policy)
}
