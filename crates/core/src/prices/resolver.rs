//! Batch price resolution for a result view.
//!
//! One resolver belongs to one view instance. Every resolve call claims a
//! fresh generation number; lookups for the batch run concurrently and the
//! batch settles only once all of them have. A batch whose generation is no
//! longer current by the time it settles is discarded without touching the
//! cache, so a slow response from an old hit set can never overwrite newer
//! entries.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use futures::future::join_all;
use log::{debug, info, warn};

use crate::constants::{PRICE_CACHE_CAPACITY, PRICE_CACHE_TTL, PRICE_DEBOUNCE_WINDOW};

use super::cache::PriceCache;
use super::client::PriceClient;
use super::model::{PriceBatch, ResolvedPrice};

/// Resolves prices for hit sets against a per-view cache.
pub struct PriceResolver {
    client: PriceClient,
    cache: Mutex<PriceCache>,
    generation: AtomicU64,
    debounce: Duration,
}

impl PriceResolver {
    /// Create a resolver with the default TTL, capacity, and debounce
    /// window.
    pub fn new(client: PriceClient) -> Self {
        Self::with_config(
            client,
            PRICE_CACHE_TTL,
            PRICE_CACHE_CAPACITY,
            PRICE_DEBOUNCE_WINDOW,
        )
    }

    /// Create a resolver with explicit cache and debounce settings.
    pub fn with_config(
        client: PriceClient,
        ttl: Duration,
        capacity: usize,
        debounce: Duration,
    ) -> Self {
        Self {
            client,
            cache: Mutex::new(PriceCache::new(ttl, capacity)),
            generation: AtomicU64::new(0),
            debounce,
        }
    }

    /// Resolve prices for a hit set.
    ///
    /// Returns `None` if a newer resolve call started before this batch
    /// settled; the superseded results are discarded and the cache is left
    /// untouched. Otherwise returns the batch to apply as a single update.
    pub async fn resolve(&self, hits: &[String]) -> Option<PriceBatch> {
        let generation = self.claim_generation();
        self.resolve_generation(hits, generation).await
    }

    /// Resolve after a quiet window, e.g. while a search query is being
    /// typed.
    ///
    /// Claims its generation up front, so a call that arrives during the
    /// window supersedes this one before any lookup is issued.
    pub async fn resolve_debounced(&self, hits: &[String]) -> Option<PriceBatch> {
        let generation = self.claim_generation();

        tokio::time::sleep(self.debounce).await;
        if self.generation.load(Ordering::SeqCst) != generation {
            debug!("price batch {}: superseded during debounce", generation);
            return None;
        }

        self.resolve_generation(hits, generation).await
    }

    async fn resolve_generation(&self, hits: &[String], generation: u64) -> Option<PriceBatch> {
        let mut prices: HashMap<String, ResolvedPrice> = HashMap::new();
        let mut missing: Vec<String> = Vec::new();

        {
            let mut cache = self.lock_cache();
            cache.sweep_expired();

            let mut seen: HashSet<&str> = HashSet::new();
            for product_id in hits {
                if !seen.insert(product_id.as_str()) {
                    continue;
                }
                match cache.get(product_id) {
                    Some(price) => {
                        prices.insert(product_id.clone(), price.clone());
                    }
                    None => missing.push(product_id.clone()),
                }
            }
        }

        debug!(
            "price batch {}: {} cached, {} lookups",
            generation,
            prices.len(),
            missing.len()
        );

        let lookups: Vec<_> = missing
            .iter()
            .map(|product_id| self.client.fetch_cheapest(product_id))
            .collect();
        let results = join_all(lookups).await;

        if self.generation.load(Ordering::SeqCst) != generation {
            debug!(
                "price batch {}: superseded, discarding {} settled lookups",
                generation,
                results.len()
            );
            return None;
        }

        let lookup_count = missing.len();
        let mut failed: Vec<String> = Vec::new();
        {
            let mut cache = self.lock_cache();
            for (product_id, result) in missing.into_iter().zip(results) {
                match result {
                    Ok(price) => {
                        cache.insert(price.clone());
                        prices.insert(product_id, price);
                    }
                    // Already logged by the client; absent from the mapping
                    Err(_) => failed.push(product_id),
                }
            }
        }

        if failed.is_empty() {
            info!(
                "price batch {}: resolved {} hits ({} fetched)",
                generation,
                prices.len(),
                lookup_count
            );
        } else {
            warn!(
                "price batch {}: {} of {} hits failed to price",
                generation,
                failed.len(),
                prices.len() + failed.len()
            );
        }

        Some(PriceBatch {
            prices,
            failed,
            generation,
        })
    }

    fn claim_generation(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Number of cached entries, for instrumentation.
    pub fn cached_len(&self) -> usize {
        self.lock_cache().len()
    }

    /// Lock the cache, recovering from poison if necessary.
    fn lock_cache(&self) -> MutexGuard<'_, PriceCache> {
        self.cache.lock().unwrap_or_else(|poisoned| {
            warn!("price cache mutex was poisoned, recovering");
            poisoned.into_inner()
        })
    }
}
