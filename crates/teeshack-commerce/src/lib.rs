//! Storefront domain types and logic for TeeShack.
//!
//! This crate provides the client-side state of the shop:
//!
//! - **Cart**: line items keyed by product and variant, the application
//!   store with observers, snapshot persistence, order summary pricing
//! - **Catalog**: the product shape the cart consumes
//! - **Checkout**: form validation and order placement
//! - **Reviews**: star ratings, rating breakdown and review submission
//!
//! # Example
//!
//! ```rust,ignore
//! use teeshack_commerce::prelude::*;
//!
//! let cache = Cache::open_dir(".teeshack")?;
//! let mut store = CartStore::restore(cache, Currency::EUR);
//!
//! let price = Money::from_decimal(20.0, Currency::EUR);
//! store.add_item(ProductId::new("1"), "Tee", price, "tee.jpg", "M", "Black");
//! store.add_item(ProductId::new("1"), "Tee", price, "tee.jpg", "M", "Black");
//!
//! assert_eq!(store.total_items(), 2);
//! println!("Total: {}", store.total_price());
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod reviews;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Cart
    pub use crate::cart::{
        Cart, CartEvent, CartObserver, CartPricing, CartStore, LineItem, PricingPolicy,
        SnapshotPersister, VariantKey,
    };

    // Catalog
    pub use crate::catalog::Product;

    // Checkout
    pub use crate::checkout::{place_order, CardDetails, CheckoutDetails, Order, OrderNumber};

    // Reviews
    pub use crate::reviews::{Rating, Review, ReviewAuthor, ReviewBoard, ReviewSort};

    pub use teeshack_cache::Cache;
}
