//! PURDATA purchase-ledger export.
//!
//! Produces the 24-column purchase voucher sheet used for bulk import into
//! the accounting system, as CSV. Fixed voucher fields come from
//! [`LedgerConfig`]; per-invoice fields from finalized records or
//! aggregated expense rows.
//!
//! # Example
//!
//! ```
//! use fapiao::core::*;
//! use fapiao::ledger::*;
//!
//! let mut record = FinalizedReceiptRecord::failed("scan.pdf", "");
//! record.failure = None;
//! record.invoice_number = "MW25046739".into();
//! record.date = "2025-05-27".into();
//! record.total_amount = 465;
//! record.tax_exclusive_amount = 443;
//! record.tax_amount = 22;
//!
//! let config = LedgerConfigBuilder::new().account_payable_code("AP-0601").build();
//! let rows = ledger_rows(&aggregate(&[record]));
//! let csv = to_purdata_csv(&rows, &config).unwrap();
//! assert!(csv.contains("\"20250527\""));
//! ```

mod purdata;

pub use purdata::{
    LedgerConfig, LedgerConfigBuilder, LedgerRow, PURDATA_COLUMNS, ledger_rows, to_purdata_csv,
};
