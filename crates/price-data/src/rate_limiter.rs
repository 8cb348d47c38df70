//! Token bucket rate limiter for price lookups.
//!
//! Each provider instance owns one bucket sized from its [`RateLimit`]
//! configuration. Batches of concurrent lookups drain the burst capacity
//! first and then settle at the configured steady rate.

use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

use log::{debug, warn};

use crate::provider::RateLimit;

/// Token bucket state.
#[derive(Debug)]
struct TokenBucket {
    /// Current number of available tokens.
    tokens: f64,
    /// Last time the bucket was updated.
    last_update: Instant,
    /// Token refill rate (tokens per second).
    rate: f64,
    /// Maximum bucket capacity.
    capacity: f64,
}

impl TokenBucket {
    fn new(config: &RateLimit) -> Self {
        Self {
            tokens: config.burst_capacity,
            last_update: Instant::now(),
            rate: f64::from(config.requests_per_minute) / 60.0,
            capacity: config.burst_capacity,
        }
    }

    /// Refill tokens based on elapsed time.
    fn refill(&mut self) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_update).as_secs_f64();
        let new_tokens = elapsed * self.rate;

        self.tokens = (self.tokens + new_tokens).min(self.capacity);
        self.last_update = now;
    }

    /// Try to acquire a token immediately.
    /// Returns true if a token was available, false otherwise.
    fn try_acquire(&mut self) -> bool {
        self.refill();

        if self.tokens >= 1.0 {
            self.tokens -= 1.0;
            true
        } else {
            false
        }
    }

    /// Calculate the wait time until a token becomes available.
    fn time_until_available(&mut self) -> Duration {
        self.refill();

        if self.tokens >= 1.0 {
            Duration::ZERO
        } else {
            let tokens_needed = 1.0 - self.tokens;
            let seconds_needed = tokens_needed / self.rate;
            Duration::from_secs_f64(seconds_needed)
        }
    }
}

/// Token bucket rate limiter for a single price source.
///
/// Thread-safe; one instance is shared by every in-flight lookup against
/// the same provider.
pub struct RateLimiter {
    bucket: Mutex<TokenBucket>,
}

impl RateLimiter {
    /// Create a rate limiter sized from the provider's configuration.
    pub fn new(config: &RateLimit) -> Self {
        Self {
            bucket: Mutex::new(TokenBucket::new(config)),
        }
    }

    /// Lock the bucket mutex, recovering from poison if necessary.
    ///
    /// The worst case of recovering is slightly incorrect rate limiting,
    /// which is better than panicking.
    fn lock_bucket(&self) -> MutexGuard<'_, TokenBucket> {
        self.bucket.lock().unwrap_or_else(|poisoned| {
            warn!("Rate limiter bucket mutex was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    /// Acquire a token, waiting (asynchronously) until one is available.
    pub async fn acquire(&self) {
        loop {
            let wait_time = {
                let mut bucket = self.lock_bucket();

                if bucket.try_acquire() {
                    return;
                }

                bucket.time_until_available()
            };

            if wait_time > Duration::ZERO {
                debug!("Rate limiter: waiting {:?} for a token", wait_time);
                tokio::time::sleep(wait_time).await;
            }
        }
    }

    /// Try to acquire a token without waiting.
    ///
    /// Returns true if a token was acquired, false if rate limited.
    pub fn try_acquire(&self) -> bool {
        self.lock_bucket().try_acquire()
    }

    /// Get the remaining tokens.
    pub fn remaining_tokens(&self) -> f64 {
        let mut bucket = self.lock_bucket();
        bucket.refill();
        bucket.tokens
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(&RateLimit::default())
    }
}
