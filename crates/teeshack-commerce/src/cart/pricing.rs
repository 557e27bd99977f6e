//! Order summary pricing.

use crate::cart::Cart;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Shipping and tax rules applied on top of the cart subtotal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricingPolicy {
    /// Subtotal at or above which shipping is free.
    pub free_shipping_threshold: Money,
    /// Flat shipping fee below the threshold.
    pub shipping_fee: Money,
    /// Tax rate applied to the subtotal (0.21 = 21% VAT).
    pub tax_rate: f64,
}

impl PricingPolicy {
    /// Free shipping from 50.00, otherwise 5.99, plus 21% VAT.
    pub fn standard(currency: Currency) -> Self {
        Self {
            free_shipping_threshold: Money::new(5000, currency),
            shipping_fee: Money::new(599, currency),
            tax_rate: 0.21,
        }
    }
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self::standard(Currency::default())
    }
}

/// Complete pricing breakdown for a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartPricing {
    /// Number of units in the cart.
    pub item_count: i64,
    /// Sum of line totals.
    pub subtotal: Money,
    /// Shipping cost.
    pub shipping: Money,
    /// Tax on the subtotal.
    pub tax: Money,
    /// Subtotal + shipping + tax.
    pub grand_total: Money,
    /// How much more the shopper must spend for free shipping.
    pub free_shipping_remaining: Money,
}

impl CartPricing {
    /// Price `cart` under `policy`.
    ///
    /// An empty cart ships for free, so its summary is all zeros.
    pub fn calculate(cart: &Cart, policy: &PricingPolicy) -> Self {
        let currency = cart.currency();
        let subtotal = cart.total_price();
        let threshold = policy.free_shipping_threshold.amount_cents;

        let free = cart.is_empty() || subtotal.amount_cents >= threshold;
        let shipping = if free {
            Money::zero(currency)
        } else {
            Money::new(policy.shipping_fee.amount_cents, currency)
        };
        let tax = subtotal.scale(policy.tax_rate);
        let grand_total = Money::new(
            subtotal
                .amount_cents
                .saturating_add(shipping.amount_cents)
                .saturating_add(tax.amount_cents),
            currency,
        );
        let free_shipping_remaining = if free {
            Money::zero(currency)
        } else {
            Money::new(threshold, currency)
                .try_subtract(&subtotal)
                .unwrap_or_else(|| Money::zero(currency))
        };

        Self {
            item_count: cart.total_items(),
            subtotal,
            shipping,
            tax,
            grand_total,
            free_shipping_remaining,
        }
    }

    /// Check if shipping is free.
    pub fn has_free_shipping(&self) -> bool {
        self.shipping.is_zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::ProductId;

    fn cart_with(unit_cents: i64, quantity: i64) -> Cart {
        let mut cart = Cart::new(Currency::EUR);
        let id = ProductId::new("1");
        cart.add_item(
            id.clone(),
            "Tee",
            Money::new(unit_cents, Currency::EUR),
            "tee.jpg",
            "M",
            "Black",
        );
        cart.update_quantity(&id, "M", "Black", quantity);
        cart
    }

    #[test]
    fn test_below_threshold_pays_shipping() {
        let pricing = CartPricing::calculate(&cart_with(2000, 2), &PricingPolicy::default());

        assert_eq!(pricing.subtotal.amount_cents, 4000);
        assert_eq!(pricing.shipping.amount_cents, 599);
        assert_eq!(pricing.tax.amount_cents, 840);
        assert_eq!(pricing.grand_total.amount_cents, 5439);
        assert_eq!(pricing.free_shipping_remaining.amount_cents, 1000);
        assert!(!pricing.has_free_shipping());
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let pricing = CartPricing::calculate(&cart_with(2500, 2), &PricingPolicy::default());

        assert!(pricing.has_free_shipping());
        assert_eq!(pricing.grand_total.amount_cents, 5000 + 1050);
        assert!(pricing.free_shipping_remaining.is_zero());
    }

    #[test]
    fn test_empty_cart_is_all_zero() {
        let pricing = CartPricing::calculate(&Cart::new(Currency::EUR), &PricingPolicy::default());

        assert_eq!(pricing.item_count, 0);
        assert!(pricing.grand_total.is_zero());
        assert!(pricing.shipping.is_zero());
    }

    #[test]
    fn test_custom_policy() {
        let policy = PricingPolicy {
            free_shipping_threshold: Money::new(10_000, Currency::EUR),
            shipping_fee: Money::new(300, Currency::EUR),
            tax_rate: 0.0,
        };
        let pricing = CartPricing::calculate(&cart_with(2500, 2), &policy);

        assert_eq!(pricing.shipping.amount_cents, 300);
        assert_eq!(pricing.grand_total.amount_cents, 5300);
    }

    #[test]
    fn test_extreme_negative_subtotal_saturates() {
        let policy = PricingPolicy::default();
        let refund = -10_000_000_000_000_000;
        let pricing = CartPricing::calculate(&cart_with(refund, 1), &policy);

        assert!(!pricing.has_free_shipping());
        assert_eq!(pricing.free_shipping_remaining.amount_cents, 5000 - refund);

        let pricing = CartPricing::calculate(&cart_with(i64::MIN, 1), &policy);
        assert_eq!(pricing.free_shipping_remaining.amount_cents, i64::MAX);
    }
}
