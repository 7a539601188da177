use thiserror::Error;

/// Why a single lookup source produced no company.
///
/// These never leave the resolver; they are logged and the next source is
/// tried.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LookupError {
    /// The request did not complete within the source's timeout.
    #[error("lookup timed out")]
    Timeout,

    /// Connection or transport failure.
    #[error("network error: {0}")]
    Network(String),

    /// The source answered with a non-success HTTP status.
    #[error("HTTP status {0}")]
    Status(u16),

    /// The response body could not be understood.
    #[error("unexpected response: {0}")]
    Parse(String),

    /// The source answered but knows no company for this ID.
    #[error("no company registered")]
    NotFound,
}

impl From<reqwest::Error> for LookupError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout
        } else if let Some(status) = e.status() {
            Self::Status(status.as_u16())
        } else {
            Self::Network(e.to_string())
        }
    }
}
