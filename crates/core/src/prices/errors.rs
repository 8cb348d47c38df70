//! Price-related error types.
//!
//! This error type bridges between the price-data crate's detailed error
//! types and the core domain's error handling needs.

use thiserror::Error;

use storefront_price_data::errors::PriceLookupError;

/// Errors that can occur during price operations.
#[derive(Error, Debug)]
pub enum PriceError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Provider error: {0}")]
    ProviderError(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),
}

impl PriceError {
    /// Returns true if this error is transient and a retry may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            PriceError::RateLimitExceeded(_)
                | PriceError::Timeout(_)
                | PriceError::NetworkError(_)
        )
    }
}

impl From<PriceLookupError> for PriceError {
    fn from(error: PriceLookupError) -> Self {
        match error {
            PriceLookupError::ProductNotFound(product_id) => {
                PriceError::NotFound(format!("Product not found: {}", product_id))
            }
            PriceLookupError::RateLimited { provider } => PriceError::RateLimitExceeded(provider),
            PriceLookupError::Timeout { provider } => PriceError::Timeout(provider),
            PriceLookupError::ProviderError { provider, message } => {
                PriceError::ProviderError(format!("{}: {}", provider, message))
            }
            PriceLookupError::InvalidResponse { message } => PriceError::InvalidData(message),
            PriceLookupError::Network(e) => PriceError::NetworkError(e),
        }
    }
}
