//! Price Client - facade for the price-data crate.
//!
//! This module provides the interface between the core domain layer and
//! the price-data crate's provider system: it owns the storefront's region,
//! converts provider prices into core [`ResolvedPrice`] values, and bridges
//! provider errors into the core error taxonomy.

use std::sync::Arc;

use log::{debug, warn};

use storefront_price_data::{Price, PriceProvider, PriceRequest};

use crate::errors::{Error, Result};

use super::errors::PriceError;
use super::model::ResolvedPrice;

/// Facade for fetching cheapest prices via the price-data crate.
pub struct PriceClient {
    provider: Arc<dyn PriceProvider>,
    country_code: String,
}

impl PriceClient {
    /// Create a client for one storefront region.
    pub fn new(provider: Arc<dyn PriceProvider>, country_code: &str) -> Self {
        Self {
            provider,
            country_code: country_code.to_lowercase(),
        }
    }

    /// Fetch the cheapest price for a product in the client's region.
    pub async fn fetch_cheapest(&self, product_id: &str) -> Result<ResolvedPrice> {
        if product_id.trim().is_empty() {
            return Err(Error::Validation("product id is empty".to_string()));
        }

        let request = PriceRequest::new(product_id, &self.country_code);
        debug!(
            "Fetching cheapest price for '{}' ({})",
            product_id, self.country_code
        );

        match self.provider.get_cheapest_price(&request).await {
            Ok(price) => Ok(Self::convert_price(price, product_id)),
            Err(e) => {
                let bridged = PriceError::from(e);
                if bridged.is_transient() {
                    warn!("Price lookup failed for '{}': {}", product_id, bridged);
                } else {
                    debug!("Price lookup failed for '{}': {}", product_id, bridged);
                }
                Err(bridged.into())
            }
        }
    }

    /// Convert a price-data Price to a core ResolvedPrice.
    fn convert_price(price: Price, product_id: &str) -> ResolvedPrice {
        ResolvedPrice {
            product_id: product_id.to_string(),
            amount: price.amount,
            currency: price.currency,
            original_amount: price.original_amount,
            fetched_at: price.calculated_at,
        }
    }

    /// The region this client prices for.
    pub fn country_code(&self) -> &str {
        &self.country_code
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use rust_decimal_macros::dec;
    use storefront_price_data::errors::PriceLookupError;

    struct FixedProvider;

    #[async_trait]
    impl PriceProvider for FixedProvider {
        fn id(&self) -> &'static str {
            "FIXED"
        }

        async fn get_cheapest_price(
            &self,
            request: &PriceRequest,
        ) -> std::result::Result<Price, PriceLookupError> {
            if request.product_id == "prod_missing" {
                return Err(PriceLookupError::ProductNotFound(
                    request.product_id.clone(),
                ));
            }
            Ok(Price::discounted(
                dec!(19.99),
                dec!(24.99),
                "eur".to_string(),
                "FIXED".to_string(),
            ))
        }
    }

    fn client() -> PriceClient {
        PriceClient::new(Arc::new(FixedProvider), "DE")
    }

    #[test]
    fn test_country_code_is_normalized() {
        assert_eq!(client().country_code(), "de");
    }

    #[tokio::test]
    async fn test_fetch_converts_provider_price() {
        let resolved = client().fetch_cheapest("prod_01").await.unwrap();

        assert_eq!(resolved.product_id, "prod_01");
        assert_eq!(resolved.amount, dec!(19.99));
        assert_eq!(resolved.original_amount, Some(dec!(24.99)));
        assert_eq!(resolved.currency, "eur");
    }

    #[tokio::test]
    async fn test_fetch_bridges_provider_errors() {
        let err = client().fetch_cheapest("prod_missing").await.unwrap_err();
        assert!(matches!(err, Error::Price(PriceError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_empty_product_id_is_rejected() {
        let err = client().fetch_cheapest("  ").await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }
}
