//! Pipeline configuration.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::error::ReceiptError;
use super::format_code::{PrefixTableConfig, PrefixTables};

/// Default primary registry endpoint; the tax ID is appended.
pub const DEFAULT_PRIMARY_URL: &str = "https://eip.fia.gov.tw/OAI/api/businessRegistration/";

/// Default secondary directory page; the tax ID is appended.
pub const DEFAULT_SECONDARY_URL: &str = "https://www.twincn.com/item.aspx?no=";

/// Settings for the company registry sources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistrySettings {
    /// Primary (government) registry base URL.
    pub primary_url: String,
    /// Request timeout for the primary registry, in milliseconds.
    pub primary_timeout_ms: u64,
    /// Minimum spacing between primary registry calls, in milliseconds.
    pub primary_min_interval_ms: u64,
    /// Whether to fall back to the secondary directory.
    pub secondary_enabled: bool,
    /// Secondary directory base URL.
    pub secondary_url: String,
    /// Request timeout for the secondary directory, in milliseconds.
    pub secondary_timeout_ms: u64,
    /// Minimum spacing between secondary directory calls, in milliseconds.
    pub secondary_min_interval_ms: u64,
    /// User-Agent header sent to both sources.
    pub user_agent: String,
}

impl Default for RegistrySettings {
    fn default() -> Self {
        Self {
            primary_url: DEFAULT_PRIMARY_URL.into(),
            primary_timeout_ms: 5_000,
            primary_min_interval_ms: 500,
            secondary_enabled: true,
            secondary_url: DEFAULT_SECONDARY_URL.into(),
            secondary_timeout_ms: 5_000,
            secondary_min_interval_ms: 500,
            user_agent: "Mozilla/5.0".into(),
        }
    }
}

impl RegistrySettings {
    /// Primary registry timeout.
    pub fn primary_timeout(&self) -> Duration {
        Duration::from_millis(self.primary_timeout_ms)
    }

    /// Primary registry call spacing.
    pub fn primary_min_interval(&self) -> Duration {
        Duration::from_millis(self.primary_min_interval_ms)
    }

    /// Secondary directory timeout.
    pub fn secondary_timeout(&self) -> Duration {
        Duration::from_millis(self.secondary_timeout_ms)
    }

    /// Secondary directory call spacing.
    pub fn secondary_min_interval(&self) -> Duration {
        Duration::from_millis(self.secondary_min_interval_ms)
    }
}

/// Everything the pipeline needs, passed explicitly to its entry points.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Upper bound on receipts enriched at once within a batch; 1 is sequential.
    pub max_concurrent_records: usize,
    /// Registry sources.
    pub registry: RegistrySettings,
    /// Prefix tables; the bundled set is used when absent.
    pub prefix_tables: Option<PrefixTableConfig>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_concurrent_records: 1,
            registry: RegistrySettings::default(),
            prefix_tables: None,
        }
    }
}

impl PipelineConfig {
    /// Parse a configuration from TOML text. Omitted keys take their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self, ReceiptError> {
        let config: Self = toml::from_str(s).map_err(|e| ReceiptError::Config(e.to_string()))?;
        if config.max_concurrent_records == 0 {
            return Err(ReceiptError::Config(
                "max_concurrent_records must be at least 1".into(),
            ));
        }
        Ok(config)
    }

    /// Load a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ReceiptError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| ReceiptError::Config(format!("cannot read {}: {e}", path.display())))?;
        Self::from_toml_str(&content)
    }

    /// The configured prefix tables, or the bundled ones.
    pub fn prefix_tables(&self) -> Result<PrefixTables, ReceiptError> {
        match &self.prefix_tables {
            Some(tables) => PrefixTables::from_config(tables.clone()),
            None => PrefixTables::bundled(),
        }
    }
}

/// Builder for [`PipelineConfig`].
///
/// # Example
///
/// ```
/// use fapiao::core::PipelineConfigBuilder;
/// use std::time::Duration;
///
/// let config = PipelineConfigBuilder::new()
///     .primary_timeout(Duration::from_secs(3))
///     .secondary_enabled(false)
///     .max_concurrent_records(4)
///     .build();
/// assert_eq!(config.registry.primary_timeout_ms, 3000);
/// ```
#[derive(Debug, Default)]
pub struct PipelineConfigBuilder {
    config: PipelineConfig,
}

impl PipelineConfigBuilder {
    /// Start from the defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bound concurrent enrichments (values below 1 are raised to 1).
    pub fn max_concurrent_records(mut self, n: usize) -> Self {
        self.config.max_concurrent_records = n.max(1);
        self
    }

    /// Set the primary registry base URL.
    pub fn primary_url(mut self, url: impl Into<String>) -> Self {
        self.config.registry.primary_url = url.into();
        self
    }

    /// Set the primary registry timeout.
    pub fn primary_timeout(mut self, timeout: Duration) -> Self {
        self.config.registry.primary_timeout_ms = duration_ms(timeout);
        self
    }

    /// Set the minimum spacing between primary registry calls.
    pub fn primary_min_interval(mut self, interval: Duration) -> Self {
        self.config.registry.primary_min_interval_ms = duration_ms(interval);
        self
    }

    /// Enable or disable the secondary directory fallback.
    pub fn secondary_enabled(mut self, enabled: bool) -> Self {
        self.config.registry.secondary_enabled = enabled;
        self
    }

    /// Set the secondary directory base URL.
    pub fn secondary_url(mut self, url: impl Into<String>) -> Self {
        self.config.registry.secondary_url = url.into();
        self
    }

    /// Set the secondary directory timeout.
    pub fn secondary_timeout(mut self, timeout: Duration) -> Self {
        self.config.registry.secondary_timeout_ms = duration_ms(timeout);
        self
    }

    /// Set the minimum spacing between secondary directory calls.
    pub fn secondary_min_interval(mut self, interval: Duration) -> Self {
        self.config.registry.secondary_min_interval_ms = duration_ms(interval);
        self
    }

    /// Set the User-Agent header.
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.config.registry.user_agent = ua.into();
        self
    }

    /// Use a custom prefix table set instead of the bundled one.
    pub fn prefix_tables(mut self, tables: PrefixTableConfig) -> Self {
        self.config.prefix_tables = Some(tables);
        self
    }

    /// Build the configuration.
    pub fn build(self) -> PipelineConfig {
        self.config
    }
}

fn duration_ms(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}
