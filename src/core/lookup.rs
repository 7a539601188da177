use async_trait::async_trait;

use super::types::CompanyInfo;

/// Resolves a tax ID to its registered company.
///
/// Implementations never fail: every error ends in a sentinel
/// [`CompanyInfo`] (see [`CompanyInfo::not_available`] and
/// [`CompanyInfo::not_found`]). The online implementation lives in
/// `fapiao::registry` behind the `registry` feature.
#[async_trait]
pub trait CompanyLookup: Send + Sync {
    /// Look up one tax ID.
    async fn lookup(&self, tax_id: &str) -> CompanyInfo;
}

/// Whether a tax ID is worth sending to a registry at all.
///
/// Empty strings, the `N/A` sentinel and anything with a non-ASCII-digit
/// character are skipped.
pub fn is_lookup_candidate(tax_id: &str) -> bool {
    !tax_id.is_empty() && tax_id.bytes().all(|b| b.is_ascii_digit())
}

/// A lookup that never goes online and reports every candidate as not found.
///
/// Useful for offline batch runs and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineLookup;

#[async_trait]
impl CompanyLookup for OfflineLookup {
    async fn lookup(&self, tax_id: &str) -> CompanyInfo {
        if is_lookup_candidate(tax_id) {
            CompanyInfo::not_found()
        } else {
            CompanyInfo::not_available()
        }
    }
}
