//! Core error types for the storefront.
//!
//! This module defines backend-agnostic error types. Provider-specific
//! errors (from the price-data crate) are converted to these types at the
//! client facade.

use thiserror::Error;

use crate::prices::PriceError;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the storefront core.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Price operation failed: {0}")]
    Price(#[from] PriceError),

    #[error("Input validation failed: {0}")]
    Validation(String),
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}
