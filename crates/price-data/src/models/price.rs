use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Lookup key for a cheapest-price request.
///
/// Prices are region-dependent: the commerce backend selects the price list
/// and tax treatment from the country code, so the same product can resolve
/// to different amounts per region.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PriceRequest {
    /// Product identifier as issued by the commerce backend
    pub product_id: String,

    /// ISO 3166-1 alpha-2 country code, lowercase
    pub country_code: String,
}

impl PriceRequest {
    /// Create a request, normalizing the country code to lowercase.
    pub fn new(product_id: impl Into<String>, country_code: &str) -> Self {
        Self {
            product_id: product_id.into(),
            country_code: country_code.to_lowercase(),
        }
    }
}

/// The computed cheapest price for a product.
///
/// "Cheapest" is across the product's purchasable variants for the requested
/// region, as calculated by the source. Amounts are in major currency units.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Price {
    /// Final amount the customer pays
    pub amount: Decimal,

    /// Currency code (ISO 4217, lowercase as the backend reports it)
    pub currency: String,

    /// Pre-discount amount, when the source reports a sale price
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_amount: Option<Decimal>,

    /// When the price was calculated by the source
    pub calculated_at: DateTime<Utc>,

    /// Source of the price (COMMERCE_API, mocks, etc.)
    pub source: String,
}

impl Price {
    /// Create a price with no discount information.
    pub fn new(amount: Decimal, currency: String, source: String) -> Self {
        Self {
            amount,
            currency,
            original_amount: None,
            calculated_at: Utc::now(),
            source,
        }
    }

    /// Create a discounted price with its pre-sale amount.
    pub fn discounted(
        amount: Decimal,
        original_amount: Decimal,
        currency: String,
        source: String,
    ) -> Self {
        Self {
            amount,
            currency,
            original_amount: Some(original_amount),
            calculated_at: Utc::now(),
            source,
        }
    }

    /// Percentage saved versus the original amount, rounded to a whole
    /// percent for badge display.
    ///
    /// Returns `None` when there is no discount, or when the original
    /// amount is zero or not actually higher than the sale amount.
    pub fn discount_percent(&self) -> Option<Decimal> {
        let original = self.original_amount?;
        if original <= Decimal::ZERO || original <= self.amount {
            return None;
        }
        let saved = (original - self.amount) / original * Decimal::ONE_HUNDRED;
        Some(saved.round_dp(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_request_normalizes_country_code() {
        let request = PriceRequest::new("prod_01", "DE");
        assert_eq!(request.product_id, "prod_01");
        assert_eq!(request.country_code, "de");
    }

    #[test]
    fn test_price_new() {
        let price = Price::new(dec!(19.99), "eur".to_string(), "COMMERCE_API".to_string());
        assert_eq!(price.amount, dec!(19.99));
        assert_eq!(price.currency, "eur");
        assert!(price.original_amount.is_none());
        assert!(price.discount_percent().is_none());
    }

    #[test]
    fn test_discount_percent() {
        let price = Price::discounted(
            dec!(75),
            dec!(100),
            "usd".to_string(),
            "COMMERCE_API".to_string(),
        );
        assert_eq!(price.discount_percent(), Some(dec!(25)));
    }

    #[test]
    fn test_discount_percent_rounds_to_whole() {
        let price = Price::discounted(
            dec!(29.99),
            dec!(44.99),
            "eur".to_string(),
            "COMMERCE_API".to_string(),
        );
        // 15.00 / 44.99 = 33.34%
        assert_eq!(price.discount_percent(), Some(dec!(33)));
    }

    #[test]
    fn test_discount_percent_ignores_bogus_original() {
        // Original not above sale amount means no badge
        let price = Price::discounted(
            dec!(20),
            dec!(20),
            "eur".to_string(),
            "COMMERCE_API".to_string(),
        );
        assert!(price.discount_percent().is_none());

        let price = Price::discounted(
            dec!(20),
            dec!(0),
            "eur".to_string(),
            "COMMERCE_API".to_string(),
        );
        assert!(price.discount_percent().is_none());
    }
}
