use std::time::Duration;

/// How long a resolved price stays valid in a view's cache
pub const PRICE_CACHE_TTL: Duration = Duration::from_secs(5 * 60);

/// Upper bound on cached prices per view
pub const PRICE_CACHE_CAPACITY: usize = 256;

/// Quiet window before a new hit set resolves prices
pub const PRICE_DEBOUNCE_WINDOW: Duration = Duration::from_millis(300);
