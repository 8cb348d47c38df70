//! Storefront Price Data Crate
//!
//! This crate provides provider-agnostic cheapest-price lookups for the
//! storefront's interactive views (search results, wishlist, collection
//! grids).
//!
//! # Overview
//!
//! The price data crate supports:
//! - Region-aware cheapest-price lookups keyed by product id and country
//! - A provider trait so the commerce backend can be swapped or mocked
//! - Rate limiting against the shared store endpoint
//! - VAT estimation helpers for display prices
//!
//! # Architecture
//!
//! ```text
//! +------------------+     +------------------+
//! |    View Layer    | --> |   PriceRequest   |  (product id + country)
//! +------------------+     +------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          |  PriceProvider   |  (commerce backend, mocks)
//!                          +------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          |      Price       |  (cheapest calculated price)
//!                          +------------------+
//! ```
//!
//! # Core Types
//!
//! - [`PriceRequest`] - Lookup key for a cheapest-price request
//! - [`Price`] - The computed cheapest price for a product
//! - [`PriceProvider`] - Trait implemented by price sources
//! - [`RateLimit`] - Per-provider rate limiting configuration

pub mod errors;
pub mod models;
pub mod provider;
pub mod rate_limiter;

// Re-export all public types from models
pub use models::{with_tax, without_tax, Price, PriceRequest};

// Re-export provider types
pub use provider::commerce::CommerceApiProvider;
pub use provider::{PriceProvider, RateLimit};

// Re-export rate limiter
pub use rate_limiter::RateLimiter;
