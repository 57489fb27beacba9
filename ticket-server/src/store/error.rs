//! Record store error types.

/// Failures reported by a record store.
///
/// "No such record" is not an error: point lookups report it as `Ok(None)`.
/// Everything here means the store could not answer.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Authentication failed
    #[error("unauthorized: check TICKETS_REST_KEY")]
    Unauthorized,

    /// Rate limited by the store
    #[error("rate limited by record store")]
    RateLimited,

    /// Store returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse a response or row
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// More than one row carries the same reference code in one source
    #[error("{count} records share reference code {code}")]
    Duplicate { code: String, count: usize },

    /// Local data could not be loaded
    #[error("failed to load records: {message}")]
    Load { message: String },
}
