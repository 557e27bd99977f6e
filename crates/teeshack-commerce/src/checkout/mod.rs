//! Checkout module.
//!
//! Contains the checkout form, its validation and order placement.

mod details;
mod order;

pub use details::{CardDetails, CheckoutDetails, DEFAULT_COUNTRY};
pub use order::{place_order, place_order_at, Order, OrderNumber, DELIVERY_DAYS};
