//! Error types and retry classification for the price data crate.
//!
//! This module provides:
//! - [`PriceLookupError`]: The main error enum for all price lookup operations
//! - [`RetryClass`]: Classification for determining retry behavior

mod retry;

pub use retry::RetryClass;

use thiserror::Error;

/// Errors that can occur during price lookup operations.
///
/// Each variant is classified into a [`RetryClass`] via the
/// [`retry_class`](Self::retry_class) method, which determines whether a
/// caller should retry the lookup.
#[derive(Error, Debug)]
pub enum PriceLookupError {
    /// The requested product was not found, or has no priced variant for
    /// the requested region. This is a terminal error - retrying won't help.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// The provider rate limited the request (HTTP 429).
    /// Should retry with exponential backoff.
    #[error("Rate limited: {provider}")]
    RateLimited {
        /// The provider that rate limited the request
        provider: String,
    },

    /// The request to the provider timed out.
    /// Should retry with exponential backoff.
    #[error("Timeout: {provider}")]
    Timeout {
        /// The provider that timed out
        provider: String,
    },

    /// A provider-specific error occurred (HTTP 5xx, unexpected status).
    #[error("Provider error: {provider} - {message}")]
    ProviderError {
        /// The provider that returned the error
        provider: String,
        /// The error message from the provider
        message: String,
    },

    /// The provider returned a response that could not be parsed.
    #[error("Invalid response: {message}")]
    InvalidResponse {
        /// Description of the parsing failure
        message: String,
    },

    /// A network error occurred while communicating with the provider.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl PriceLookupError {
    /// Returns the retry classification for this error.
    ///
    /// - [`RetryClass::Never`]: Don't retry, the error is terminal
    /// - [`RetryClass::WithBackoff`]: Retry with exponential backoff
    ///
    /// # Examples
    ///
    /// ```
    /// use storefront_price_data::errors::{PriceLookupError, RetryClass};
    ///
    /// let error = PriceLookupError::RateLimited { provider: "COMMERCE_API".to_string() };
    /// assert_eq!(error.retry_class(), RetryClass::WithBackoff);
    ///
    /// let error = PriceLookupError::ProductNotFound("prod_missing".to_string());
    /// assert_eq!(error.retry_class(), RetryClass::Never);
    /// ```
    pub fn retry_class(&self) -> RetryClass {
        match self {
            // Terminal errors - never retry
            Self::ProductNotFound(_) | Self::InvalidResponse { .. } => RetryClass::Never,

            // Transient errors - retry with backoff
            Self::RateLimited { .. } | Self::Timeout { .. } => RetryClass::WithBackoff,

            // Provider and network failures - a retry hits the same backend,
            // so back off rather than hammer it
            Self::ProviderError { .. } | Self::Network(_) => RetryClass::WithBackoff,
        }
    }

    /// Returns true if this error is transient and should be retried.
    pub fn is_transient(&self) -> bool {
        self.retry_class() == RetryClass::WithBackoff
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_not_found_never_retries() {
        let error = PriceLookupError::ProductNotFound("prod_01".to_string());
        assert_eq!(error.retry_class(), RetryClass::Never);
        assert!(!error.is_transient());
    }

    #[test]
    fn test_invalid_response_never_retries() {
        let error = PriceLookupError::InvalidResponse {
            message: "unexpected body".to_string(),
        };
        assert_eq!(error.retry_class(), RetryClass::Never);
    }

    #[test]
    fn test_rate_limited_retries_with_backoff() {
        let error = PriceLookupError::RateLimited {
            provider: "COMMERCE_API".to_string(),
        };
        assert_eq!(error.retry_class(), RetryClass::WithBackoff);
        assert!(error.is_transient());
    }

    #[test]
    fn test_timeout_retries_with_backoff() {
        let error = PriceLookupError::Timeout {
            provider: "COMMERCE_API".to_string(),
        };
        assert_eq!(error.retry_class(), RetryClass::WithBackoff);
    }

    #[test]
    fn test_provider_error_retries_with_backoff() {
        let error = PriceLookupError::ProviderError {
            provider: "COMMERCE_API".to_string(),
            message: "Internal server error".to_string(),
        };
        assert_eq!(error.retry_class(), RetryClass::WithBackoff);
    }

    #[test]
    fn test_error_display() {
        let error = PriceLookupError::ProductNotFound("prod_01".to_string());
        assert_eq!(format!("{}", error), "Product not found: prod_01");

        let error = PriceLookupError::RateLimited {
            provider: "COMMERCE_API".to_string(),
        };
        assert_eq!(format!("{}", error), "Rate limited: COMMERCE_API");

        let error = PriceLookupError::ProviderError {
            provider: "COMMERCE_API".to_string(),
            message: "publishable key invalid".to_string(),
        };
        assert_eq!(
            format!("{}", error),
            "Provider error: COMMERCE_API - publishable key invalid"
        );
    }
}
