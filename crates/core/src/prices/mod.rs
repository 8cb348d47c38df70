//! Price resolution for result views.
//!
//! This module provides the types and services a search-results (or
//! collection) view uses to enrich its hits with prices:
//!
//! - [`model`] - Resolved prices and the batch result applied to a view
//! - [`cache`] - Bounded, TTL-checked per-view price cache
//! - [`client`] - Facade for the price-data crate providers
//! - [`resolver`] - Generation-tagged batch resolution
//! - [`errors`] - Core-side price error taxonomy
//!
//! # Architecture
//!
//! ```text
//! PriceResolver → PriceCache (per view)
//!       ↓
//! PriceClient → price-data crate (providers)
//! ```
//!
//! One resolver belongs to one view instance. A batch settles as a whole:
//! the view re-renders exactly once per resolved hit set, never from a
//! half-finished batch.

pub mod cache;
pub mod client;
pub mod errors;
pub mod model;
pub mod resolver;

// Re-export commonly used types for convenience
pub use cache::PriceCache;
pub use client::PriceClient;
pub use errors::PriceError;
pub use model::{PriceBatch, ResolvedPrice};
pub use resolver::PriceResolver;
