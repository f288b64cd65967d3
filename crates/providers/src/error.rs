//! Shared error type for outbound provider calls.

/// Errors that can occur when talking to an external provider.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// The provider's credentials or base URL are missing.
    #[error("{0} is not configured")]
    NotConfigured(&'static str),

    /// The underlying HTTP request failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider returned a non-2xx status code.
    #[error("{provider} returned HTTP {status}: {message}")]
    HttpStatus {
        provider: &'static str,
        status: u16,
        message: String,
    },

    /// The provider's response body did not match the expected shape.
    #[error("Unexpected {provider} response: {message}")]
    InvalidResponse {
        provider: &'static str,
        message: String,
    },

    /// Every enabled provider in the registry rejected the request.
    #[error("All enabled video providers failed: {0}")]
    Exhausted(String),
}
