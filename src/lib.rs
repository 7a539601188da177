//! # fapiao
//!
//! Enrichment pipeline for machine-read Taiwanese uniform invoices (統一發票).
//!
//! Receipts come out of an OCR / vision-model extraction step as loosely
//! typed JSON. This crate turns them into ledger-ready rows: it repairs
//! misread tax IDs with the checksum law, derives the invoice format code
//! from the serial prefix and fiscal year, resolves seller and buyer names
//! through an ordered chain of registry sources, splits totals at 5% VAT,
//! and consolidates small-tax invoices for expense reports.
//!
//! All amounts are whole New Taiwan dollars (`i64`).
//!
//! ## Quick Start
//!
//! ```rust
//! # tokio_test_block_on(async {
//! use fapiao::core::*;
//!
//! let tables = PrefixTables::bundled().unwrap();
//! let enricher = Enricher::new(&tables, &OfflineLookup);
//!
//! let receipts = parse_receipts_reply(
//!     r#"{"receipts": [{"invoice_number": "MW25046739", "date": "2025-05-27",
//!         "seller_vat": "84595257", "buyer_vat": "N/A", "total_amount": 465}]}"#,
//! ).unwrap();
//! let records = enricher.enrich_batch(&receipts, "scan.jpg").await;
//!
//! assert_eq!(records[0].seller_vat, "04595257"); // misread 0 repaired
//! assert_eq!(records[0].format_code, FormatCode::DUPLICATE);
//! assert_eq!((records[0].tax_exclusive_amount, records[0].tax_amount), (443, 22));
//!
//! let report = aggregate(&records);
//! assert_eq!(report[0].record.format_code, FormatCode::DUPLICATE_SUMMARY);
//! # });
//! # fn tokio_test_block_on<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
//! # }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Types, tax-ID checksum, prefix tables, enrichment, aggregation |
//! | `registry` | Online company lookup (government registry + directory fallback) |
//! | `ledger` | PURDATA ledger CSV export |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "registry")]
pub mod registry;

#[cfg(feature = "ledger")]
pub mod ledger;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
