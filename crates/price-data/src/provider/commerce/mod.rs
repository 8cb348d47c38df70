//! Commerce backend provider implementation.
//!
//! This provider fetches computed cheapest prices from the commerce
//! backend's store API. Requests are authenticated with a publishable key
//! header when one is configured.
//!
//! # API Endpoint
//!
//! - Cheapest price: `{base_url}/store/products/{id}/cheapest-price?country_code={cc}`
//!
//! # Response Format
//!
//! The endpoint returns the product id together with a `cheapest_price`
//! object, or `null` when no variant is purchasable for the region.
//! Amounts arrive in minor currency units.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::errors::PriceLookupError;
use crate::models::{Price, PriceRequest};
use crate::provider::{PriceProvider, RateLimit};
use crate::rate_limiter::RateLimiter;

const STORE_PRODUCTS_PATH: &str = "/store/products";
const PROVIDER_ID: &str = "COMMERCE_API";
const PUBLISHABLE_KEY_HEADER: &str = "x-publishable-api-key";

/// Default HTTP request timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Response from the cheapest-price endpoint.
#[derive(Debug, Deserialize)]
struct CheapestPriceResponse {
    product_id: String,
    /// Absent or null when no variant is purchasable for the region
    #[serde(default)]
    cheapest_price: Option<PricePayload>,
}

#[derive(Debug, Deserialize)]
struct PricePayload {
    /// Final amount in minor units
    calculated_amount: i64,
    currency_code: String,
    /// Pre-discount amount in minor units
    #[serde(default)]
    original_amount: Option<i64>,
}

/// Commerce backend provider for cheapest-price lookups.
///
/// # Example
///
/// ```ignore
/// let provider = CommerceApiProvider::with_publishable_key(
///     "https://store.example.com",
///     "pk_01...",
/// );
/// let price = provider.get_cheapest_price(&request).await?;
/// ```
pub struct CommerceApiProvider {
    client: Client,
    base_url: String,
    publishable_key: Option<String>,
    limiter: RateLimiter,
}

impl CommerceApiProvider {
    /// Create a provider for a backend that does not require a key.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::build(base_url.into(), None)
    }

    /// Create a provider authenticating with a publishable API key.
    pub fn with_publishable_key(base_url: impl Into<String>, key: impl Into<String>) -> Self {
        Self::build(base_url.into(), Some(key.into()))
    }

    fn build(base_url: String, publishable_key: Option<String>) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            publishable_key,
            limiter: RateLimiter::new(&Self::rate_limit_config()),
        }
    }

    fn rate_limit_config() -> RateLimit {
        RateLimit {
            requests_per_minute: 240,
            burst_capacity: 20.0,
            min_delay: Duration::from_millis(25),
        }
    }

    fn build_url(&self, request: &PriceRequest) -> String {
        format!(
            "{}{}/{}/cheapest-price?country_code={}",
            self.base_url,
            STORE_PRODUCTS_PATH,
            urlencoding::encode(&request.product_id),
            urlencoding::encode(&request.country_code),
        )
    }

    /// Fetch from the API, mapping transport and status failures.
    async fn fetch(&self, url: &str, product_id: &str) -> Result<String, PriceLookupError> {
        let mut request = self.client.get(url);
        if let Some(key) = &self.publishable_key {
            request = request.header(PUBLISHABLE_KEY_HEADER, key);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                PriceLookupError::Timeout {
                    provider: PROVIDER_ID.to_string(),
                }
            } else {
                PriceLookupError::ProviderError {
                    provider: PROVIDER_ID.to_string(),
                    message: e.to_string(),
                }
            }
        })?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(PriceLookupError::RateLimited {
                provider: PROVIDER_ID.to_string(),
            });
        }

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(PriceLookupError::ProductNotFound(product_id.to_string()));
        }

        if !response.status().is_success() {
            return Err(PriceLookupError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("HTTP error: {}", response.status()),
            });
        }

        response
            .text()
            .await
            .map_err(|e| PriceLookupError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: e.to_string(),
            })
    }

    /// Parse a cheapest-price response body into a [`Price`].
    fn parse_cheapest_price(body: &str, product_id: &str) -> Result<Price, PriceLookupError> {
        let response: CheapestPriceResponse =
            serde_json::from_str(body).map_err(|e| PriceLookupError::InvalidResponse {
                message: format!("Failed to parse response: {}", e),
            })?;

        if response.product_id != product_id {
            return Err(PriceLookupError::InvalidResponse {
                message: format!(
                    "Response is for product '{}', requested '{}'",
                    response.product_id, product_id
                ),
            });
        }

        let payload = response
            .cheapest_price
            .ok_or_else(|| PriceLookupError::ProductNotFound(product_id.to_string()))?;

        let amount = minor_units_to_decimal(payload.calculated_amount);
        // An "original" at or below the sale amount is not a discount
        let original = payload
            .original_amount
            .filter(|o| *o > payload.calculated_amount)
            .map(minor_units_to_decimal);

        Ok(match original {
            Some(original_amount) => Price::discounted(
                amount,
                original_amount,
                payload.currency_code,
                PROVIDER_ID.to_string(),
            ),
            None => Price::new(amount, payload.currency_code, PROVIDER_ID.to_string()),
        })
    }
}

fn minor_units_to_decimal(amount: i64) -> Decimal {
    Decimal::new(amount, 2)
}

#[async_trait]
impl PriceProvider for CommerceApiProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn rate_limit(&self) -> RateLimit {
        Self::rate_limit_config()
    }

    async fn get_cheapest_price(
        &self,
        request: &PriceRequest,
    ) -> Result<Price, PriceLookupError> {
        self.limiter.acquire().await;

        let url = self.build_url(request);
        let body = self.fetch(&url, &request.product_id).await?;
        Self::parse_cheapest_price(&body, &request.product_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_provider_id() {
        let provider = CommerceApiProvider::new("https://store.example.com");
        assert_eq!(provider.id(), "COMMERCE_API");
    }

    #[test]
    fn test_rate_limit() {
        let provider = CommerceApiProvider::new("https://store.example.com");
        let rate = provider.rate_limit();

        assert_eq!(rate.requests_per_minute, 240);
        assert_eq!(rate.burst_capacity, 20.0);
        assert_eq!(rate.min_delay, Duration::from_millis(25));
    }

    #[test]
    fn test_build_url_strips_trailing_slash_and_encodes() {
        let provider = CommerceApiProvider::new("https://store.example.com/");
        let request = PriceRequest::new("prod_01 special", "DE");

        assert_eq!(
            provider.build_url(&request),
            "https://store.example.com/store/products/prod_01%20special/cheapest-price?country_code=de"
        );
    }

    #[test]
    fn test_parse_plain_price() {
        let body = r#"{
            "product_id": "prod_01",
            "cheapest_price": {
                "calculated_amount": 1999,
                "currency_code": "eur"
            }
        }"#;

        let price = CommerceApiProvider::parse_cheapest_price(body, "prod_01").unwrap();
        assert_eq!(price.amount, dec!(19.99));
        assert_eq!(price.currency, "eur");
        assert_eq!(price.source, "COMMERCE_API");
        assert!(price.original_amount.is_none());
    }

    #[test]
    fn test_parse_discounted_price() {
        let body = r#"{
            "product_id": "prod_01",
            "cheapest_price": {
                "calculated_amount": 1999,
                "original_amount": 2499,
                "currency_code": "eur"
            }
        }"#;

        let price = CommerceApiProvider::parse_cheapest_price(body, "prod_01").unwrap();
        assert_eq!(price.amount, dec!(19.99));
        assert_eq!(price.original_amount, Some(dec!(24.99)));
        assert_eq!(price.discount_percent(), Some(dec!(20)));
    }

    #[test]
    fn test_parse_drops_non_discount_original() {
        let body = r#"{
            "product_id": "prod_01",
            "cheapest_price": {
                "calculated_amount": 1999,
                "original_amount": 1999,
                "currency_code": "eur"
            }
        }"#;

        let price = CommerceApiProvider::parse_cheapest_price(body, "prod_01").unwrap();
        assert!(price.original_amount.is_none());
    }

    #[test]
    fn test_parse_null_price_is_not_found() {
        let body = r#"{ "product_id": "prod_01", "cheapest_price": null }"#;

        let err = CommerceApiProvider::parse_cheapest_price(body, "prod_01").unwrap_err();
        assert!(matches!(err, PriceLookupError::ProductNotFound(id) if id == "prod_01"));
    }

    #[test]
    fn test_parse_mismatched_product_is_invalid() {
        let body = r#"{
            "product_id": "prod_02",
            "cheapest_price": {
                "calculated_amount": 100,
                "currency_code": "eur"
            }
        }"#;

        let err = CommerceApiProvider::parse_cheapest_price(body, "prod_01").unwrap_err();
        assert!(matches!(err, PriceLookupError::InvalidResponse { .. }));
    }

    #[test]
    fn test_parse_malformed_body_is_invalid() {
        let err = CommerceApiProvider::parse_cheapest_price("not json", "prod_01").unwrap_err();
        assert!(matches!(err, PriceLookupError::InvalidResponse { .. }));
    }
}
