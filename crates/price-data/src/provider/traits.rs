//! Price provider trait definitions.
//!
//! This module defines the core `PriceProvider` trait that all price
//! sources must implement, along with their rate limiting configuration.

use std::time::Duration;

use async_trait::async_trait;

use crate::errors::PriceLookupError;
use crate::models::{Price, PriceRequest};

/// Rate limiting configuration for a provider.
///
/// Controls how aggressively we can call a price source. The storefront
/// shares its commerce backend with cart and checkout traffic, so price
/// enrichment must not saturate it.
#[derive(Clone, Debug)]
pub struct RateLimit {
    /// Maximum requests allowed per minute.
    pub requests_per_minute: u32,

    /// Maximum burst of back-to-back requests.
    pub burst_capacity: f64,

    /// Minimum delay between requests.
    pub min_delay: Duration,
}

impl Default for RateLimit {
    fn default() -> Self {
        Self {
            requests_per_minute: 120,
            burst_capacity: 10.0,
            min_delay: Duration::from_millis(50),
        }
    }
}

/// Trait for cheapest-price sources.
///
/// Implement this trait to add support for a new price source. A failed
/// lookup is always a per-item failure: batch aggregation, caching, and
/// error recovery live with the caller.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use storefront_price_data::{Price, PriceProvider, PriceRequest, RateLimit};
///
/// struct MyProvider;
///
/// #[async_trait]
/// impl PriceProvider for MyProvider {
///     fn id(&self) -> &'static str {
///         "MY_PROVIDER"
///     }
///
///     async fn get_cheapest_price(
///         &self,
///         request: &PriceRequest,
///     ) -> Result<Price, PriceLookupError> {
///         // ... fetch and convert
///     }
/// }
/// ```
#[async_trait]
pub trait PriceProvider: Send + Sync {
    /// Unique identifier for this provider.
    ///
    /// Should be a constant string like "COMMERCE_API". Used for logging
    /// and for tagging the `source` field of returned prices.
    fn id(&self) -> &'static str;

    /// Rate limiting configuration.
    ///
    /// Returns the rate limits that should be applied when calling this
    /// provider.
    fn rate_limit(&self) -> RateLimit {
        RateLimit::default()
    }

    /// Fetch the cheapest price for a product in a region.
    ///
    /// # Arguments
    ///
    /// * `request` - The product id and country code to price
    ///
    /// # Returns
    ///
    /// The computed cheapest price on success, or a `PriceLookupError` on
    /// failure. A product without a purchasable variant for the region is
    /// `ProductNotFound`.
    async fn get_cheapest_price(&self, request: &PriceRequest)
        -> Result<Price, PriceLookupError>;
}
