//! Shopping cart module.
//!
//! Contains the cart state, the application-facing store, snapshot
//! persistence and order summary pricing.

mod cart;
mod persist;
mod pricing;
mod store;

pub use cart::{Cart, LineItem, VariantKey};
pub use persist::{load_cart, read_snapshot, SnapshotPersister, CART_SNAPSHOT_KEY};
pub use pricing::{CartPricing, PricingPolicy};
pub use store::{CartEvent, CartObserver, CartStore};
