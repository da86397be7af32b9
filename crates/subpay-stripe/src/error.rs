//! Stripe client error types.

/// Errors that can occur when using the Stripe client.
///
/// Only [`Configuration`](StripeError::Configuration) and
/// [`InvalidArgument`](StripeError::InvalidArgument) originate locally;
/// everything the Stripe API reports is surfaced verbatim through
/// [`Api`](StripeError::Api) without retries or translation.
#[derive(Debug, thiserror::Error)]
pub enum StripeError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Stripe API returned an error response.
    #[error("Stripe API error: {error_type} - {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error type reported by Stripe (e.g. `invalid_request_error`).
        error_type: String,
        /// Human-readable error message.
        message: String,
        /// Machine-readable error code, when Stripe provides one.
        code: Option<String>,
    },

    /// A required argument was missing or empty.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Configuration(String),
}
