//! Cart and line item types.
//!
//! A [`Cart`] holds at most one [`LineItem`] per product and variant. The
//! operations here are pure state transitions; notification and persistence
//! live in [`CartStore`](crate::cart::CartStore).

use crate::ids::ProductId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// The `(size, color)` pair distinguishing otherwise-identical products.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VariantKey {
    /// Size label, e.g. "M".
    pub size: String,
    /// Colour label, e.g. "Black".
    pub color: String,
}

impl VariantKey {
    pub fn new(size: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            size: size.into(),
            color: color.into(),
        }
    }

    fn matches(&self, size: &str, color: &str) -> bool {
        self.size == size && self.color == color
    }
}

impl std::fmt::Display for VariantKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} / {}", self.size, self.color)
    }
}

/// One product variant in the cart with a quantity.
///
/// Serialized flat, in the snapshot record layout
/// `{productId, name, unitPrice, imageUrl, size, color, quantity}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Product being purchased.
    pub product_id: ProductId,
    /// Product name, captured when the item was added.
    pub name: String,
    /// Unit price, captured when the item was added.
    pub unit_price: Money,
    /// Image shown next to the item.
    pub image_url: String,
    /// Selected size and colour.
    #[serde(flatten)]
    pub variant: VariantKey,
    /// Quantity, always positive.
    pub quantity: i64,
}

impl LineItem {
    /// Check whether this item has the given identity.
    pub fn is(&self, product_id: &ProductId, size: &str, color: &str) -> bool {
        &self.product_id == product_id && self.variant.matches(size, color)
    }

    /// Unit price times quantity.
    pub fn line_total(&self) -> Money {
        self.unit_price.times(self.quantity)
    }
}

/// Ordered collection of line items, in insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Cart {
    currency: Currency,
    items: Vec<LineItem>,
}

impl Cart {
    /// Create an empty cart priced in `currency`.
    pub fn new(currency: Currency) -> Self {
        Self {
            currency,
            items: Vec::new(),
        }
    }

    /// Rebuild a cart from previously stored items.
    ///
    /// Items sharing an identity are merged into the first occurrence and
    /// items with a non-positive quantity are dropped, so a hand-edited
    /// snapshot cannot break the one-item-per-variant rule. Items priced in
    /// another currency are dropped too.
    pub fn from_items(currency: Currency, items: impl IntoIterator<Item = LineItem>) -> Self {
        let mut cart = Self::new(currency);
        for item in items {
            if item.quantity <= 0 {
                continue;
            }
            if item.unit_price.currency != currency {
                tracing::warn!(
                    product_id = %item.product_id,
                    variant = %item.variant,
                    price = %item.unit_price,
                    cart_currency = %currency,
                    "dropping line priced in another currency"
                );
                continue;
            }
            match cart.position(&item.product_id, &item.variant.size, &item.variant.color) {
                Some(idx) => {
                    let existing = &mut cart.items[idx];
                    existing.quantity = existing.quantity.saturating_add(item.quantity);
                }
                None => cart.items.push(item),
            }
        }
        cart
    }

    /// Add one unit of a product variant.
    ///
    /// Increments the existing line item for the same product, size and
    /// colour, otherwise appends a new one with quantity 1. Returns the
    /// resulting quantity, or 0 when `unit_price` is not in the cart
    /// currency and nothing was added.
    pub fn add_item(
        &mut self,
        product_id: ProductId,
        name: impl Into<String>,
        unit_price: Money,
        image_url: impl Into<String>,
        size: impl Into<String>,
        color: impl Into<String>,
    ) -> i64 {
        if unit_price.currency != self.currency {
            tracing::warn!(
                %product_id,
                price = %unit_price,
                cart_currency = %self.currency,
                "price in another currency, not added"
            );
            return 0;
        }

        let variant = VariantKey::new(size, color);
        if let Some(idx) = self.position(&product_id, &variant.size, &variant.color) {
            let existing = &mut self.items[idx];
            existing.quantity = existing.quantity.saturating_add(1);
            return existing.quantity;
        }

        self.items.push(LineItem {
            product_id,
            name: name.into(),
            unit_price,
            image_url: image_url.into(),
            variant,
            quantity: 1,
        });
        1
    }

    /// Set the quantity of a line item.
    ///
    /// A quantity of zero or less removes the item. Returns `false` when no
    /// matching item exists.
    pub fn update_quantity(
        &mut self,
        product_id: &ProductId,
        size: &str,
        color: &str,
        quantity: i64,
    ) -> bool {
        if quantity <= 0 {
            return self.remove_item(product_id, size, color);
        }

        match self.position(product_id, size, color) {
            Some(idx) => {
                self.items[idx].quantity = quantity;
                true
            }
            None => false,
        }
    }

    /// Remove a line item. Returns `false` if it was not present.
    pub fn remove_item(&mut self, product_id: &ProductId, size: &str, color: &str) -> bool {
        match self.position(product_id, size, color) {
            Some(idx) => {
                self.items.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Remove all items.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of quantities.
    pub fn total_items(&self) -> i64 {
        self.items
            .iter()
            .fold(0_i64, |acc, i| acc.saturating_add(i.quantity))
    }

    /// Sum of `unit_price * quantity`, in the cart currency.
    pub fn total_price(&self) -> Money {
        self.items
            .iter()
            .map(LineItem::line_total)
            .fold(Money::zero(self.currency), |total, line| {
                total.try_add(&line).unwrap_or(total)
            })
    }

    /// Items in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Look up a line item.
    pub fn get(&self, product_id: &ProductId, size: &str, color: &str) -> Option<&LineItem> {
        self.items.iter().find(|i| i.is(product_id, size, color))
    }

    /// Number of distinct line items.
    pub fn line_count(&self) -> usize {
        self.items.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Currency totals are expressed in.
    pub fn currency(&self) -> Currency {
        self.currency
    }

    fn position(&self, product_id: &ProductId, size: &str, color: &str) -> Option<usize> {
        self.items.iter().position(|i| i.is(product_id, size, color))
    }
}
