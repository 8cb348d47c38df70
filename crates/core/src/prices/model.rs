//! Resolved price models.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A price resolved for a single product, as rendered by result views.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedPrice {
    pub product_id: String,

    /// Final amount in major currency units
    pub amount: Decimal,

    /// Currency code as the backend reports it
    pub currency: String,

    /// Pre-discount amount, when the product is on sale
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_amount: Option<Decimal>,

    /// When the source calculated this price
    pub fetched_at: DateTime<Utc>,
}

/// Result of one batch resolution over a hit set.
///
/// Applied to the consuming view as a single update once every lookup has
/// settled; a batch is never delivered partially.
#[derive(Clone, Debug)]
pub struct PriceBatch {
    /// Resolved prices keyed by product id. Ids whose lookup failed are
    /// absent.
    pub prices: HashMap<String, ResolvedPrice>,

    /// Product ids whose lookup failed, in request order.
    pub failed: Vec<String>,

    /// Sequence number of the resolve call that produced this batch.
    pub generation: u64,
}

impl PriceBatch {
    /// Single batch-level error indicator: true if any lookup failed.
    /// Views show one generic notice rather than per-item errors.
    pub fn has_errors(&self) -> bool {
        !self.failed.is_empty()
    }

    /// Price for a product id, if its lookup succeeded.
    pub fn get(&self, product_id: &str) -> Option<&ResolvedPrice> {
        self.prices.get(product_id)
    }

    /// Number of successfully priced products.
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    /// Returns true if no product resolved to a price.
    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}
