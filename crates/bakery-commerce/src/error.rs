//! Commerce error types.

use thiserror::Error;

/// Errors that can occur in cart operations.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Invalid quantity.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Invalid unit price.
    #[error("Invalid price: {0}")]
    InvalidPrice(i64),

    /// Quantity exceeds maximum allowed.
    #[error("Quantity {0} exceeds maximum allowed ({1})")]
    QuantityExceedsLimit(i64, i64),

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// Checkout requested for a cart with no items.
    #[error("Cart is empty")]
    EmptyCart,

    /// Cache error.
    #[error("Cache error: {0}")]
    CacheError(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Validation error.
    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl CommerceError {
    /// Whether a mutation was rejected before touching the cart.
    ///
    /// Covers bad input and changes whose line or cart total would overflow.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            CommerceError::InvalidQuantity(_)
                | CommerceError::InvalidPrice(_)
                | CommerceError::QuantityExceedsLimit(..)
                | CommerceError::Overflow
                | CommerceError::ValidationError(_)
        )
    }
}

#[cfg(feature = "storage")]
impl From<bakery_cache::CacheError> for CommerceError {
    fn from(e: bakery_cache::CacheError) -> Self {
        CommerceError::CacheError(e.to_string())
    }
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::SerializationError(e.to_string())
    }
}
