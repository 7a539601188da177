//! Turning raw extracted receipts into finalized ledger records.

use std::fmt::Display;

use chrono::{Datelike, NaiveDate};
use futures::stream::{self, StreamExt};
use serde_json::Value;
use tracing::{info, warn};

use super::amounts::split_tax;
use super::format_code::PrefixTables;
use super::lookup::CompanyLookup;
use super::tax_id;
use super::types::{FinalizedReceiptRecord, NOT_AVAILABLE, RawReceiptRecord, WeekdayLabel};

/// Receipt enrichment: tax split, weekday, tax-ID repair, company lookup and
/// format classification.
///
/// Holds borrowed collaborators so one set of tables and one resolver (with
/// its rate limiters) can serve many batches.
pub struct Enricher<'a, L: CompanyLookup + ?Sized> {
    tables: &'a PrefixTables,
    lookup: &'a L,
    max_concurrent: usize,
}

impl<'a, L: CompanyLookup + ?Sized> Enricher<'a, L> {
    /// Create a sequential enricher.
    pub fn new(tables: &'a PrefixTables, lookup: &'a L) -> Self {
        Self {
            tables,
            lookup,
            max_concurrent: 1,
        }
    }

    /// Allow up to `n` receipts of a batch in flight at once (minimum 1).
    ///
    /// Output order always follows input order.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n.max(1);
        self
    }

    /// Enrich one receipt.
    ///
    /// Never fails: malformed fields degrade to sentinels. The seller is
    /// looked up before the buyer.
    pub async fn enrich(
        &self,
        raw: &RawReceiptRecord,
        source_filename: &str,
    ) -> FinalizedReceiptRecord {
        let total = raw.total_amount.unwrap_or(0);
        let (tax_exclusive_amount, tax_amount) = split_tax(total);

        let (weekday, fiscal_year) = date_facts(&raw.date, self.tables.default_year());

        let seller_vat = corrected(&raw.seller_vat, "seller");
        let buyer_vat = corrected(&raw.buyer_vat, "buyer");

        let seller = self.lookup.lookup(&seller_vat).await;
        let buyer = self.lookup.lookup(&buyer_vat).await;

        let format_code = self.tables.classify(&raw.invoice_number, fiscal_year);

        FinalizedReceiptRecord {
            invoice_number: raw.invoice_number.clone(),
            format_code,
            date: raw.date.clone(),
            weekday,
            time: raw.time.clone(),
            seller_vat,
            seller,
            buyer_vat,
            buyer,
            tax_exclusive_amount,
            tax_amount,
            total_amount: total,
            source_filename: source_filename.to_string(),
            failure: None,
        }
    }

    /// Enrich one receipt given as untyped JSON.
    ///
    /// A value that cannot be read as a receipt becomes a failure record.
    pub async fn enrich_value(
        &self,
        value: &Value,
        source_filename: &str,
    ) -> FinalizedReceiptRecord {
        match RawReceiptRecord::from_value(value) {
            Ok(raw) => self.enrich(&raw, source_filename).await,
            Err(e) => {
                warn!(filename = source_filename, error = %e, "receipt could not be read");
                FinalizedReceiptRecord::failed(source_filename, e.to_string())
            }
        }
    }

    /// Enrich every receipt of one source file, in order.
    ///
    /// Each receipt succeeds or fails on its own.
    pub async fn enrich_batch(
        &self,
        values: &[Value],
        source_filename: &str,
    ) -> Vec<FinalizedReceiptRecord> {
        let records: Vec<FinalizedReceiptRecord> = stream::iter(values)
            .map(|value| self.enrich_value(value, source_filename))
            .buffered(self.max_concurrent)
            .collect()
            .await;

        let failed = records.iter().filter(|r| r.is_failure()).count();
        info!(
            filename = source_filename,
            receipts = records.len(),
            failed,
            "document enriched"
        );
        records
    }

    /// Enrich the outcome of extracting one source file.
    ///
    /// If extraction itself failed, the whole file is reported as a single
    /// failure record and the caller moves on to the next file.
    pub async fn enrich_document<E: Display>(
        &self,
        extracted: Result<Vec<Value>, E>,
        source_filename: &str,
    ) -> Vec<FinalizedReceiptRecord> {
        match extracted {
            Ok(values) => self.enrich_batch(&values, source_filename).await,
            Err(e) => {
                warn!(filename = source_filename, error = %e, "document extraction failed");
                vec![FinalizedReceiptRecord::failed(source_filename, e.to_string())]
            }
        }
    }
}

/// Weekday label and fiscal year for a receipt date.
fn date_facts(date: &str, default_year: i32) -> (WeekdayLabel, i32) {
    if date == NOT_AVAILABLE {
        return (WeekdayLabel::NotAvailable, default_year);
    }
    match parse_iso_date(date) {
        Some(d) => (WeekdayLabel::Day(d.weekday()), d.year()),
        None => (WeekdayLabel::FormatError, default_year),
    }
}

/// `YYYY-MM-DD` with a four-digit year; month and day may drop the leading zero.
///
/// Every segment must be plain ASCII digits; chrono alone would accept
/// padding spaces before a field.
fn parse_iso_date(date: &str) -> Option<NaiveDate> {
    let mut parts = date.split('-');
    let (year, month, day) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }
    let digits = |s: &str, min: usize, max: usize| {
        (min..=max).contains(&s.len()) && s.bytes().all(|b| b.is_ascii_digit())
    };
    if !digits(year, 4, 4) || !digits(month, 1, 2) || !digits(day, 1, 2) {
        return None;
    }
    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
}

fn corrected(raw_id: &str, party: &str) -> String {
    let fixed = tax_id::correct(raw_id);
    if fixed != raw_id {
        info!(party, from = raw_id, to = %fixed, "tax id corrected");
    }
    fixed
}
