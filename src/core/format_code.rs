//! Invoice format classification by serial prefix and fiscal year.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::ReceiptError;
use super::types::FormatCode;

const BUNDLED_TABLES: &str = include_str!("../../data/prefix_tables.toml");

/// Length of a well-formed invoice number: two letters and eight digits.
const INVOICE_NUMBER_LEN: usize = 10;

/// On-disk shape of a prefix table set.
///
/// ```toml
/// default_year = 2025
///
/// [years.2025]
/// PT = "21"
/// MW = "22"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PrefixTableConfig {
    /// Year whose table is used for dates that are missing, unparseable,
    /// or fall in a year without a table.
    pub default_year: i32,
    /// Year (as a TOML key) to prefix to format-code string.
    #[serde(default)]
    pub years: BTreeMap<String, BTreeMap<String, String>>,
}

/// Prefix-to-format-code tables keyed by fiscal year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixTables {
    default_year: i32,
    tables: BTreeMap<i32, BTreeMap<String, String>>,
}

impl PrefixTables {
    /// The tables shipped with the crate (2025 and 2026, default 2025).
    pub fn bundled() -> Result<Self, ReceiptError> {
        Self::from_toml_str(BUNDLED_TABLES)
    }

    /// Parse a table set from TOML text.
    pub fn from_toml_str(s: &str) -> Result<Self, ReceiptError> {
        let config: PrefixTableConfig =
            toml::from_str(s).map_err(|e| ReceiptError::PrefixTable(e.to_string()))?;
        Self::from_config(config)
    }

    /// Load a table set from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ReceiptError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            ReceiptError::PrefixTable(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Build from an already deserialized table set.
    ///
    /// Year keys must be integers and the default year must have a table.
    /// Prefixes are uppercased.
    pub fn from_config(config: PrefixTableConfig) -> Result<Self, ReceiptError> {
        let mut tables = BTreeMap::new();
        for (year, entries) in config.years {
            let year: i32 = year.trim().parse().map_err(|_| {
                ReceiptError::PrefixTable(format!("year key '{year}' is not an integer"))
            })?;
            let entries = entries
                .into_iter()
                .map(|(prefix, code)| (prefix.trim().to_uppercase(), code))
                .collect();
            tables.insert(year, entries);
        }

        if !tables.contains_key(&config.default_year) {
            return Err(ReceiptError::PrefixTable(format!(
                "no table for default year {}",
                config.default_year
            )));
        }

        Ok(Self {
            default_year: config.default_year,
            tables,
        })
    }

    /// Year used when a receipt's own year has no table.
    pub fn default_year(&self) -> i32 {
        self.default_year
    }

    /// Years with a table, ascending.
    pub fn years(&self) -> impl Iterator<Item = i32> + '_ {
        self.tables.keys().copied()
    }

    fn table_for(&self, fiscal_year: i32) -> Option<&BTreeMap<String, String>> {
        self.tables
            .get(&fiscal_year)
            .or_else(|| self.tables.get(&self.default_year))
    }

    /// Classify an invoice number.
    ///
    /// The prefix is the first two characters, uppercased, of a 10-character
    /// invoice number; shorter or longer numbers have no prefix. Unknown
    /// prefixes and mapped values that are not integers give format 25.
    pub fn classify(&self, invoice_number: &str, fiscal_year: i32) -> FormatCode {
        let prefix = invoice_prefix(invoice_number);
        self.table_for(fiscal_year)
            .and_then(|table| table.get(&prefix))
            .and_then(|code| code.trim().parse().ok())
            .map(FormatCode)
            .unwrap_or_default()
    }
}

fn invoice_prefix(invoice_number: &str) -> String {
    if invoice_number.chars().count() != INVOICE_NUMBER_LEN {
        return String::new();
    }
    invoice_number.chars().take(2).collect::<String>().to_uppercase()
}
