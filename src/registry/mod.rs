//! Online company lookup.
//!
//! Resolves tax IDs through an ordered chain of sources: the Fiscal
//! Information Agency business registry first, then a public company
//! directory. Each source gets one attempt per lookup, behind its own rate
//! limiter; every failure is logged and the next source tried.
//!
//! # Example
//!
//! ```ignore
//! use fapiao::core::*;
//! use fapiao::registry::CompanyResolver;
//!
//! let config = PipelineConfig::load("fapiao.toml")?;
//! let resolver = CompanyResolver::from_settings(&config.registry)?;
//! let tables = config.prefix_tables()?;
//!
//! let enricher = Enricher::new(&tables, &resolver)
//!     .with_max_concurrent(config.max_concurrent_records);
//! let records = enricher.enrich_batch(&receipts, "scan.pdf").await;
//! ```

mod directory;
mod error;
mod fia;
mod fullwidth;
mod limiter;
mod resolver;

pub use directory::TwincnDirectory;
pub use error::LookupError;
pub use fia::FiaRegistry;
pub use fullwidth::to_half_width;
pub use limiter::RateLimiter;
pub use resolver::{CompanyResolver, LookupSource};
