use std::fmt;

use chrono::Weekday;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use super::error::ReceiptError;

/// Placeholder for a field the extractor could not read, or a lookup that was skipped.
pub const NOT_AVAILABLE: &str = "N/A";

/// Company name reported when every lookup source came back empty.
pub const COMPANY_NOT_FOUND: &str = "查無資料";

/// Weekday label used when the receipt date does not parse.
pub const DATE_FORMAT_ERROR: &str = "格式錯誤";

/// Prefix of the invoice-number field on records that could not be processed.
pub const FAILURE_PREFIX: &str = "處理失敗";

/// One receipt as read by the extraction collaborator.
///
/// Every field is optional on the wire. Missing strings become [`NOT_AVAILABLE`]
/// (`time` becomes empty), numbers in string fields are rendered as text, and an
/// unreadable `total_amount` is `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawReceiptRecord {
    /// Serial number, two letters and eight digits when well-formed.
    #[serde(default = "not_available", deserialize_with = "lenient_string")]
    pub invoice_number: String,
    /// ISO date `YYYY-MM-DD`.
    #[serde(default = "not_available", deserialize_with = "lenient_string")]
    pub date: String,
    /// `HH:MM:SS`, or empty.
    #[serde(default, deserialize_with = "lenient_time")]
    pub time: String,
    /// Seller tax ID as read, before repair.
    #[serde(default = "not_available", deserialize_with = "lenient_string")]
    pub seller_vat: String,
    /// Buyer tax ID as read, before repair.
    #[serde(default = "not_available", deserialize_with = "lenient_string")]
    pub buyer_vat: String,
    /// Tax-inclusive total.
    #[serde(default, deserialize_with = "lenient_amount")]
    pub total_amount: Option<i64>,
}

impl Default for RawReceiptRecord {
    fn default() -> Self {
        Self {
            invoice_number: not_available(),
            date: not_available(),
            time: String::new(),
            seller_vat: not_available(),
            buyer_vat: not_available(),
            total_amount: None,
        }
    }
}

impl RawReceiptRecord {
    /// Read a record from an arbitrary JSON value.
    ///
    /// Only a value that is not a JSON object is rejected; anything inside the
    /// object degrades to defaults.
    pub fn from_value(value: &Value) -> Result<Self, ReceiptError> {
        if !value.is_object() {
            return Err(ReceiptError::MalformedRecord(format!(
                "expected a JSON object, got {}",
                json_kind(value)
            )));
        }
        Ok(Self::deserialize(value)?)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn not_available() -> String {
    NOT_AVAILABLE.to_string()
}

fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn lenient_string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(scalar_text(Value::deserialize(d)?).unwrap_or_else(not_available))
}

fn lenient_time<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(scalar_text(Value::deserialize(d)?).unwrap_or_default())
}

fn lenient_amount<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i64>, D::Error> {
    Ok(parse_amount(&Value::deserialize(d)?))
}

/// Interpret an extracted amount as a whole number.
///
/// Integers pass through, floats are truncated toward zero, and strings must
/// hold a plain integer (surrounding whitespace allowed).
pub fn parse_amount(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && f.abs() < i64::MAX as f64)
                .map(|f| f.trunc() as i64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Registered business name and address for a tax ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyInfo {
    /// Business name, or one of the sentinels [`NOT_AVAILABLE`] / [`COMPANY_NOT_FOUND`].
    pub name: String,
    /// Business address, empty when unknown.
    pub address: String,
}

impl CompanyInfo {
    /// A resolved company.
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
        }
    }

    /// No lookup was attempted because the tax ID was missing or not numeric.
    pub fn not_available() -> Self {
        Self::new(NOT_AVAILABLE, "")
    }

    /// Every lookup source failed or returned no name.
    pub fn not_found() -> Self {
        Self::new(COMPANY_NOT_FOUND, "")
    }

    /// Whether this carries a real name rather than a sentinel.
    pub fn is_resolved(&self) -> bool {
        !self.name.is_empty() && self.name != NOT_AVAILABLE && self.name != COMPANY_NOT_FOUND
    }
}

/// Numeric invoice format code (格式代號) driving accounting treatment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormatCode(pub u16);

impl FormatCode {
    /// Triplicate uniform invoice or computer-printed invoice.
    pub const TRIPLICATE: Self = Self(21);
    /// Duplicate cash-register invoice or other voucher showing tax.
    pub const DUPLICATE: Self = Self(22);
    /// Triplicate cash-register invoice or e-invoice; the fallback code.
    pub const CASH_REGISTER: Self = Self(25);
    /// Summary line consolidating format 21 invoices.
    pub const TRIPLICATE_SUMMARY: Self = Self(26);
    /// Summary line consolidating format 22 invoices.
    pub const DUPLICATE_SUMMARY: Self = Self(27);

    /// The code used for a consolidated summary line of this format.
    ///
    /// 21 maps to 26, 22 to 27; other codes are unchanged.
    pub fn summary(self) -> Self {
        match self {
            Self::TRIPLICATE => Self::TRIPLICATE_SUMMARY,
            Self::DUPLICATE => Self::DUPLICATE_SUMMARY,
            other => other,
        }
    }

    /// Ledger voucher type: `Q` for format 22, `I` otherwise.
    pub fn ledger_type(self) -> &'static str {
        if self == Self::DUPLICATE { "Q" } else { "I" }
    }
}

impl Default for FormatCode {
    fn default() -> Self {
        Self::CASH_REGISTER
    }
}

impl fmt::Display for FormatCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Weekday of the receipt date, as shown on the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WeekdayLabel {
    /// The date parsed; labelled 一 through 日, Monday first.
    Day(Weekday),
    /// The date was [`NOT_AVAILABLE`].
    #[default]
    NotAvailable,
    /// The date was present but did not parse.
    FormatError,
}

const DAY_LABELS: [&str; 7] = ["一", "二", "三", "四", "五", "六", "日"];

impl WeekdayLabel {
    /// The display label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Day(day) => DAY_LABELS[day.num_days_from_monday() as usize],
            Self::NotAvailable => NOT_AVAILABLE,
            Self::FormatError => DATE_FORMAT_ERROR,
        }
    }

    /// Parse a display label back.
    pub fn from_label(label: &str) -> Option<Self> {
        if label == NOT_AVAILABLE {
            return Some(Self::NotAvailable);
        }
        if label == DATE_FORMAT_ERROR {
            return Some(Self::FormatError);
        }
        let idx = DAY_LABELS.iter().position(|l| *l == label)?;
        let day = (0..idx).fold(Weekday::Mon, |d, _| d.succ());
        Some(Self::Day(day))
    }
}

impl fmt::Display for WeekdayLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for WeekdayLabel {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for WeekdayLabel {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let label = String::deserialize(d)?;
        Self::from_label(&label)
            .ok_or_else(|| de::Error::custom(format!("unknown weekday label '{label}'")))
    }
}

/// A receipt after validation, classification and company lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalizedReceiptRecord {
    /// Invoice number as extracted, or a failure message on failure records.
    pub invoice_number: String,
    /// Format code from the fiscal-year prefix table.
    pub format_code: FormatCode,
    /// Receipt date as extracted.
    pub date: String,
    /// Weekday of `date`.
    pub weekday: WeekdayLabel,
    /// Receipt time as extracted.
    pub time: String,
    /// Seller tax ID after repair.
    pub seller_vat: String,
    /// Seller registration.
    pub seller: CompanyInfo,
    /// Buyer tax ID after repair.
    pub buyer_vat: String,
    /// Buyer registration.
    pub buyer: CompanyInfo,
    /// Net amount, `round(total / 1.05)`.
    pub tax_exclusive_amount: i64,
    /// Input tax, `total - tax_exclusive_amount`.
    pub tax_amount: i64,
    /// Tax-inclusive total.
    pub total_amount: i64,
    /// File the receipt came from.
    pub source_filename: String,
    /// Why the record could not be processed; `None` on normal records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure: Option<String>,
}

impl FinalizedReceiptRecord {
    /// A record standing in for a receipt (or whole file) that could not be processed.
    ///
    /// The message is carried in `invoice_number` so that it shows up in
    /// tabular output next to the successfully processed rows.
    pub fn failed(source_filename: impl Into<String>, message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            invoice_number: format!("{FAILURE_PREFIX}: {message}"),
            format_code: FormatCode::default(),
            date: NOT_AVAILABLE.to_string(),
            weekday: WeekdayLabel::NotAvailable,
            time: String::new(),
            seller_vat: NOT_AVAILABLE.to_string(),
            seller: CompanyInfo::not_available(),
            buyer_vat: NOT_AVAILABLE.to_string(),
            buyer: CompanyInfo::not_available(),
            tax_exclusive_amount: 0,
            tax_amount: 0,
            total_amount: 0,
            source_filename: source_filename.into(),
            failure: Some(message),
        }
    }

    /// Whether this is a failure record.
    pub fn is_failure(&self) -> bool {
        self.failure.is_some()
    }
}

/// One line of the expense report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatedExpenseRow {
    /// The invoice, or the representative of a consolidated group with summed amounts.
    #[serde(flatten)]
    pub record: FinalizedReceiptRecord,
    /// Whether this row consolidates several small-tax invoices.
    pub aggregated: bool,
    /// Number of consolidated invoices; 0 for pass-through rows.
    pub count: usize,
}
