//! Core receipt types, tax-ID repair, format classification, enrichment
//! and expense aggregation.
//!
//! Everything here is offline; company lookups go through the
//! [`CompanyLookup`] trait.

mod aggregate;
mod amounts;
mod config;
mod enrich;
mod error;
mod extraction;
mod format_code;
mod lookup;
pub mod tax_id;
mod types;

pub use aggregate::*;
pub use amounts::*;
pub use config::*;
pub use enrich::*;
pub use error::*;
pub use extraction::*;
pub use format_code::*;
pub use lookup::*;
pub use types::*;
