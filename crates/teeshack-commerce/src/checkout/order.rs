//! Order placement.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::cart::{CartPricing, CartStore, LineItem, PricingPolicy};
use crate::checkout::CheckoutDetails;
use crate::error::CommerceError;

/// Days between placement and estimated delivery.
pub const DELIVERY_DAYS: i64 = 5;

const ORDER_PREFIX: &str = "TS-";
const ORDER_SUFFIX_LEN: usize = 9;
const ORDER_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Human-facing order reference, e.g. `TS-K3Q9ZP1LA`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderNumber(String);

impl OrderNumber {
    /// Generate a new random order number.
    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();
        let suffix: String = (0..ORDER_SUFFIX_LEN)
            .map(|_| ORDER_CHARSET[rng.gen_range(0..ORDER_CHARSET.len())] as char)
            .collect();
        Self(format!("{}{}", ORDER_PREFIX, suffix))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Confirmation of a placed order. Orders are not stored anywhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub number: OrderNumber,
    pub placed_at: DateTime<Utc>,
    pub estimated_delivery: NaiveDate,
    pub email: String,
    pub ship_to: String,
    /// Last four digits of the card used.
    pub card_last_four: String,
    pub items: Vec<LineItem>,
    pub pricing: CartPricing,
}

impl Order {
    /// Number of units ordered.
    pub fn item_count(&self) -> i64 {
        self.pricing.item_count
    }
}

/// Place an order for everything in the cart.
///
/// On success the cart is cleared. On failure the cart is left untouched.
pub fn place_order(
    store: &mut CartStore,
    details: &CheckoutDetails,
    policy: &PricingPolicy,
) -> Result<Order, CommerceError> {
    place_order_at(store, details, policy, Utc::now())
}

/// [`place_order`] with an explicit placement time.
pub fn place_order_at(
    store: &mut CartStore,
    details: &CheckoutDetails,
    policy: &PricingPolicy,
    now: DateTime<Utc>,
) -> Result<Order, CommerceError> {
    if store.is_empty() {
        return Err(CommerceError::EmptyCart);
    }
    details.validate()?;

    let order = Order {
        number: OrderNumber::generate(),
        placed_at: now,
        estimated_delivery: (now + Duration::days(DELIVERY_DAYS)).date_naive(),
        email: details.email.trim().to_string(),
        ship_to: details.ship_to(),
        card_last_four: details.card.last_four(),
        items: store.items().to_vec(),
        pricing: store.pricing(policy),
    };
    store.clear();

    tracing::info!(
        order = %order.number,
        items = order.item_count(),
        total = %order.pricing.grand_total,
        "order placed"
    );
    Ok(order)
}
