//! Commerce error types.
//!
//! Cart mutations are total and never produce these; they come from
//! checkout validation, review submission, catalog variant selection and
//! the storage layer.

use thiserror::Error;

/// Errors that can occur in storefront operations.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Checkout attempted with nothing in the cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// Terms and conditions were not accepted.
    #[error("Terms and conditions must be accepted")]
    TermsNotAccepted,

    /// A required checkout field was left blank.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// Email address is malformed.
    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    /// Requested size/colour is not offered for the product.
    #[error("Variant {size}/{color} is not available for product {product_id}")]
    VariantUnavailable {
        product_id: String,
        size: String,
        color: String,
    },

    /// Product offers no sizes or no colours to pick a default from.
    #[error("Product {0} has no selectable variant")]
    NoDefaultVariant(String),

    /// Reviews can only be written by a signed-in shopper.
    #[error("Sign in to write a review")]
    SignInRequired,

    /// Review ratings run from 1 to 5 stars.
    #[error("Rating must be between 1 and 5 stars, got {0}")]
    InvalidRating(u8),

    /// Storage error.
    #[error("Storage error: {0}")]
    Cache(#[from] teeshack_cache::CacheError),
}
