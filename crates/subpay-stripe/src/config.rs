//! Client configuration and credential loading.

use secrecy::SecretString;

use crate::error::StripeError;

/// Environment variable holding the Stripe secret key.
pub const SECRET_KEY_ENV: &str = "STRIPE_SECRET_KEY";

/// Environment variable overriding the Stripe API base URL.
pub const API_BASE_ENV: &str = "STRIPE_API_BASE";

/// Default Stripe API base URL.
pub const DEFAULT_API_BASE: &str = "https://api.stripe.com";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Configuration for a [`StripeClient`](crate::StripeClient).
///
/// Holds the secret API key together with the API base URL and request
/// timeout. The key is wrapped in [`SecretString`] so it is redacted from
/// `Debug` output; nothing in this crate logs or persists it.
#[derive(Debug, Clone)]
pub struct StripeConfig {
    /// Stripe secret API key (`sk_test_...` or `sk_live_...`).
    pub(crate) secret_key: SecretString,
    /// Base URL for the Stripe API, without a trailing slash.
    pub(crate) api_base: String,
    /// Request timeout in seconds.
    pub(crate) timeout_seconds: u64,
}

impl StripeConfig {
    /// Create a configuration from an explicit secret key.
    ///
    /// Most callers load the key from the environment via
    /// [`Self::from_env`] instead; passing it explicitly is for tests and
    /// callers that manage their own secrets.
    #[must_use]
    pub fn new(secret_key: impl Into<String>) -> Self {
        Self {
            secret_key: SecretString::new(secret_key.into()),
            api_base: DEFAULT_API_BASE.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }

    /// Load the configuration from the process environment.
    ///
    /// Reads `STRIPE_SECRET_KEY` at call time, so a rotated key is picked
    /// up by the next load without a restart. `STRIPE_API_BASE` optionally
    /// overrides the API base URL (test servers, stripe-mock).
    ///
    /// # Errors
    ///
    /// Returns [`StripeError::Configuration`] if `STRIPE_SECRET_KEY` is
    /// absent or empty.
    pub fn from_env() -> Result<Self, StripeError> {
        let secret_key = std::env::var(SECRET_KEY_ENV).unwrap_or_default();
        if secret_key.is_empty() {
            return Err(StripeError::Configuration(format!(
                "{SECRET_KEY_ENV} is not set"
            )));
        }

        let mut config = Self::new(secret_key);
        if let Ok(api_base) = std::env::var(API_BASE_ENV) {
            if !api_base.is_empty() {
                config = config.with_api_base(api_base);
            }
        }

        tracing::debug!(api_base = %config.api_base, "Loaded Stripe configuration");
        Ok(config)
    }

    /// Set the API base URL.
    #[must_use]
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the request timeout in seconds.
    #[must_use]
    pub fn with_timeout_seconds(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }
}
