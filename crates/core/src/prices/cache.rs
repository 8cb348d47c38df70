//! Bounded, TTL-checked price cache.
//!
//! One cache belongs to one view instance; it is never shared across views
//! or page loads. Expiry is checked on read and entries are swept at the
//! start of every resolve batch, so memory stays bounded by live entries
//! plus the capacity cap rather than by the history of products seen.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use log::debug;

use super::model::ResolvedPrice;

struct CacheEntry {
    price: ResolvedPrice,
    inserted_at: Instant,
}

/// Key→price cache with a TTL window and a hard size cap.
pub struct PriceCache {
    entries: HashMap<String, CacheEntry>,
    ttl: Duration,
    capacity: usize,
}

impl PriceCache {
    /// Create a cache. `capacity` is clamped to at least one entry.
    pub fn new(ttl: Duration, capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
            capacity: capacity.max(1),
        }
    }

    /// Look up a product id. An entry is served only while
    /// `now - inserted_at < ttl`; an expired entry is removed on access.
    pub fn get(&mut self, product_id: &str) -> Option<&ResolvedPrice> {
        let fresh = self
            .entries
            .get(product_id)
            .map(|entry| entry.inserted_at.elapsed() < self.ttl);

        match fresh {
            Some(true) => self.entries.get(product_id).map(|entry| &entry.price),
            Some(false) => {
                self.entries.remove(product_id);
                None
            }
            None => None,
        }
    }

    /// Insert or overwrite a price with a fresh timestamp.
    ///
    /// At capacity, expired entries are swept first; if the cache is still
    /// full, the oldest entry by insertion time is evicted.
    pub fn insert(&mut self, price: ResolvedPrice) {
        if !self.entries.contains_key(&price.product_id) && self.entries.len() >= self.capacity {
            self.sweep_expired();
            if self.entries.len() >= self.capacity {
                self.evict_oldest();
            }
        }

        self.entries.insert(
            price.product_id.clone(),
            CacheEntry {
                price,
                inserted_at: Instant::now(),
            },
        );
    }

    /// Drop every entry past its TTL.
    pub fn sweep_expired(&mut self) {
        let ttl = self.ttl;
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.inserted_at.elapsed() < ttl);

        let swept = before - self.entries.len();
        if swept > 0 {
            debug!("price cache: swept {} expired entries", swept);
        }
    }

    fn evict_oldest(&mut self) {
        let oldest = self
            .entries
            .iter()
            .min_by_key(|(_, entry)| entry.inserted_at)
            .map(|(product_id, _)| product_id.clone());

        if let Some(product_id) = oldest {
            debug!("price cache: evicting '{}' (at capacity)", product_id);
            self.entries.remove(&product_id);
        }
    }

    /// Number of entries, live or expired-but-unswept.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Shift an entry's insertion time into the past.
    #[cfg(test)]
    fn backdate(&mut self, product_id: &str, by: Duration) {
        if let Some(entry) = self.entries.get_mut(product_id) {
            entry.inserted_at -= by;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    const TTL: Duration = Duration::from_secs(300);

    fn price(product_id: &str, amount: rust_decimal::Decimal) -> ResolvedPrice {
        ResolvedPrice {
            product_id: product_id.to_string(),
            amount,
            currency: "eur".to_string(),
            original_amount: None,
            fetched_at: Utc::now(),
        }
    }

    #[test]
    fn test_get_within_ttl() {
        let mut cache = PriceCache::new(TTL, 8);
        cache.insert(price("prod_a", dec!(10)));

        let hit = cache.get("prod_a").expect("entry should be fresh");
        assert_eq!(hit.amount, dec!(10));
    }

    #[test]
    fn test_get_after_ttl_removes_entry() {
        let mut cache = PriceCache::new(TTL, 8);
        cache.insert(price("prod_a", dec!(10)));
        cache.backdate("prod_a", TTL + Duration::from_millis(1));

        assert!(cache.get("prod_a").is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_insert_overwrites_and_refreshes() {
        let mut cache = PriceCache::new(TTL, 8);
        cache.insert(price("prod_a", dec!(10)));
        cache.backdate("prod_a", TTL - Duration::from_secs(1));

        cache.insert(price("prod_a", dec!(12)));

        let hit = cache.get("prod_a").expect("overwritten entry is fresh");
        assert_eq!(hit.amount, dec!(12));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_sweep_drops_only_expired() {
        let mut cache = PriceCache::new(TTL, 8);
        cache.insert(price("prod_old", dec!(1)));
        cache.insert(price("prod_new", dec!(2)));
        cache.backdate("prod_old", TTL + Duration::from_secs(1));

        cache.sweep_expired();

        assert_eq!(cache.len(), 1);
        assert!(cache.get("prod_new").is_some());
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let mut cache = PriceCache::new(TTL, 2);
        cache.insert(price("prod_a", dec!(1)));
        cache.insert(price("prod_b", dec!(2)));
        // Force a strict age ordering between the two entries
        cache.backdate("prod_a", Duration::from_secs(20));
        cache.backdate("prod_b", Duration::from_secs(10));

        cache.insert(price("prod_c", dec!(3)));

        assert_eq!(cache.len(), 2);
        assert!(cache.get("prod_a").is_none());
        assert!(cache.get("prod_b").is_some());
        assert!(cache.get("prod_c").is_some());
    }

    #[test]
    fn test_capacity_prefers_sweeping_expired() {
        let mut cache = PriceCache::new(TTL, 2);
        cache.insert(price("prod_stale", dec!(1)));
        cache.insert(price("prod_live", dec!(2)));
        cache.backdate("prod_stale", TTL + Duration::from_secs(1));

        cache.insert(price("prod_c", dec!(3)));

        // The expired entry went first; the live one survived
        assert!(cache.get("prod_live").is_some());
        assert!(cache.get("prod_c").is_some());
        assert!(cache.get("prod_stale").is_none());
    }

    #[test]
    fn test_clear() {
        let mut cache = PriceCache::new(TTL, 8);
        cache.insert(price("prod_a", dec!(1)));
        cache.clear();
        assert!(cache.is_empty());
    }
}
