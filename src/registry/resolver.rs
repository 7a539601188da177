//! Ordered fallback chain of lookup sources.

use async_trait::async_trait;
use tracing::{debug, warn};

use super::directory::TwincnDirectory;
use super::error::LookupError;
use super::fia::FiaRegistry;
use super::limiter::RateLimiter;
use crate::core::{CompanyInfo, CompanyLookup, RegistrySettings, is_lookup_candidate};

/// One place a tax ID can be looked up.
#[async_trait]
pub trait LookupSource: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Single attempt at resolving `tax_id`.
    async fn fetch(&self, tax_id: &str) -> Result<CompanyInfo, LookupError>;
}

struct Slot {
    source: Box<dyn LookupSource>,
    limiter: RateLimiter,
}

/// Resolves tax IDs by trying each source in order.
///
/// The first source returning a non-empty name wins. IDs that are missing or
/// not numeric are answered with [`CompanyInfo::not_available`] without any
/// call; when every source fails the answer is [`CompanyInfo::not_found`].
#[derive(Default)]
pub struct CompanyResolver {
    slots: Vec<Slot>,
}

impl CompanyResolver {
    /// An empty chain; every candidate resolves to not-found.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a source, with its own rate limiter, to the end of the chain.
    pub fn with_source(
        mut self,
        source: impl LookupSource + 'static,
        limiter: RateLimiter,
    ) -> Self {
        self.slots.push(Slot {
            source: Box::new(source),
            limiter,
        });
        self
    }

    /// The standard chain: FIA registry, then (if enabled) the company directory.
    pub fn from_settings(settings: &RegistrySettings) -> Result<Self, LookupError> {
        let mut resolver = Self::new().with_source(
            FiaRegistry::new(settings)?,
            RateLimiter::new(settings.primary_min_interval()),
        );
        if settings.secondary_enabled {
            resolver = resolver.with_source(
                TwincnDirectory::new(settings)?,
                RateLimiter::new(settings.secondary_min_interval()),
            );
        }
        Ok(resolver)
    }

    /// Source names in lookup order.
    pub fn source_names(&self) -> Vec<&str> {
        self.slots.iter().map(|s| s.source.name()).collect()
    }

    /// Resolve one tax ID. Never fails.
    pub async fn resolve(&self, tax_id: &str) -> CompanyInfo {
        if !is_lookup_candidate(tax_id) {
            return CompanyInfo::not_available();
        }

        for slot in &self.slots {
            slot.limiter.acquire().await;
            match slot.source.fetch(tax_id).await {
                Ok(info) if !info.name.trim().is_empty() => {
                    debug!(
                        tax_id,
                        source = slot.source.name(),
                        name = %info.name,
                        "company resolved"
                    );
                    return info;
                }
                Ok(_) => {
                    warn!(tax_id, source = slot.source.name(), "source returned an empty name");
                }
                Err(e) => {
                    warn!(tax_id, source = slot.source.name(), error = %e, "lookup source failed");
                }
            }
        }

        CompanyInfo::not_found()
    }
}

#[async_trait]
impl CompanyLookup for CompanyResolver {
    async fn lookup(&self, tax_id: &str) -> CompanyInfo {
        self.resolve(tax_id).await
    }
}
