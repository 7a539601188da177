use thiserror::Error;

/// Errors that can occur while configuring or running the receipt pipeline.
///
/// None of these abort a batch: per-record faults are turned into failure
/// records by the enricher, see [`crate::core::FinalizedReceiptRecord::failed`].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ReceiptError {
    /// Pipeline configuration could not be read or parsed.
    #[error("configuration error: {0}")]
    Config(String),

    /// Invoice prefix table set is malformed or incomplete.
    #[error("prefix table error: {0}")]
    PrefixTable(String),

    /// The extraction collaborator's reply held no usable receipts payload.
    #[error("extraction error: {0}")]
    Extraction(String),

    /// A single extracted record could not be read.
    #[error("malformed record: {0}")]
    MalformedRecord(String),

    /// Ledger export failed.
    #[error("export error: {0}")]
    Export(String),
}

impl From<serde_json::Error> for ReceiptError {
    fn from(e: serde_json::Error) -> Self {
        Self::MalformedRecord(e.to_string())
    }
}
