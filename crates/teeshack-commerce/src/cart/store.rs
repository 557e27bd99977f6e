//! Application-owned cart state.
//!
//! [`CartStore`] wraps a [`Cart`] with the panel visibility flag and a list
//! of [`CartObserver`]s. Observers run synchronously after every mutation
//! that changed the cart; persistence is one such observer.

use crate::cart::{Cart, CartPricing, LineItem, PricingPolicy, VariantKey};
use crate::catalog::Product;
use crate::ids::ProductId;
use crate::money::{Currency, Money};

/// What a mutation did to the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartEvent {
    /// A unit was added; `quantity` is the resulting quantity.
    ItemAdded {
        product_id: ProductId,
        variant: VariantKey,
        quantity: i64,
    },
    /// A line item's quantity was set.
    QuantityUpdated {
        product_id: ProductId,
        variant: VariantKey,
        quantity: i64,
    },
    /// A line item was removed.
    ItemRemoved {
        product_id: ProductId,
        variant: VariantKey,
    },
    /// The cart was emptied.
    Cleared,
}

/// Receives the cart after each mutation.
pub trait CartObserver {
    fn on_change(&self, event: &CartEvent, cart: &Cart);
}

impl<F> CartObserver for F
where
    F: Fn(&CartEvent, &Cart),
{
    fn on_change(&self, event: &CartEvent, cart: &Cart) {
        self(event, cart)
    }
}

/// Cart state shared by the listing, detail, cart and checkout views.
///
/// Constructed once at application start and handed to whoever needs it.
///
/// # Example
///
/// ```rust,ignore
/// let mut store = CartStore::restore(cache, Currency::EUR);
/// store.add_item(ProductId::new("1"), "Tee", price, "tee.jpg", "M", "Black");
/// println!("{} items, {}", store.total_items(), store.total_price());
/// ```
pub struct CartStore {
    cart: Cart,
    is_open: bool,
    observers: Vec<Box<dyn CartObserver>>,
}

impl CartStore {
    /// Empty store with no observers.
    pub fn new(currency: Currency) -> Self {
        Self::with_cart(Cart::new(currency))
    }

    /// Store seeded with an existing cart.
    pub fn with_cart(cart: Cart) -> Self {
        Self {
            cart,
            is_open: false,
            observers: Vec::new(),
        }
    }

    /// Register an observer. Observers run in registration order.
    pub fn subscribe(&mut self, observer: impl CartObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Add one unit of a product variant.
    ///
    /// A price in a currency other than the cart's is refused without
    /// notifying observers.
    pub fn add_item(
        &mut self,
        product_id: ProductId,
        name: impl Into<String>,
        unit_price: Money,
        image_url: impl Into<String>,
        size: impl Into<String>,
        color: impl Into<String>,
    ) {
        let variant = VariantKey::new(size, color);
        let quantity = self.cart.add_item(
            product_id.clone(),
            name,
            unit_price,
            image_url,
            variant.size.clone(),
            variant.color.clone(),
        );
        if quantity == 0 {
            return;
        }
        tracing::debug!(%product_id, %variant, quantity, "cart item added");
        self.notify(CartEvent::ItemAdded {
            product_id,
            variant,
            quantity,
        });
    }

    /// Add one unit of a catalog product in the chosen variant.
    pub fn add_product(&mut self, product: &Product, variant: VariantKey) {
        self.add_item(
            product.id.clone(),
            product.name.clone(),
            product.price,
            product.primary_image(),
            variant.size,
            variant.color,
        );
    }

    /// Set a line item's quantity; zero or less removes it.
    pub fn update_quantity(&mut self, product_id: &ProductId, size: &str, color: &str, quantity: i64) {
        if quantity <= 0 {
            self.remove_item(product_id, size, color);
            return;
        }

        if self.cart.update_quantity(product_id, size, color, quantity) {
            tracing::debug!(%product_id, size, color, quantity, "cart quantity updated");
            self.notify(CartEvent::QuantityUpdated {
                product_id: product_id.clone(),
                variant: VariantKey::new(size, color),
                quantity,
            });
        }
    }

    /// Remove a line item if present.
    pub fn remove_item(&mut self, product_id: &ProductId, size: &str, color: &str) {
        if self.cart.remove_item(product_id, size, color) {
            tracing::debug!(%product_id, size, color, "cart item removed");
            self.notify(CartEvent::ItemRemoved {
                product_id: product_id.clone(),
                variant: VariantKey::new(size, color),
            });
        }
    }

    /// Empty the cart. Observers are notified even if it was already empty.
    pub fn clear(&mut self) {
        self.cart.clear();
        tracing::debug!("cart cleared");
        self.notify(CartEvent::Cleared);
    }

    /// Sum of all quantities.
    pub fn total_items(&self) -> i64 {
        self.cart.total_items()
    }

    /// Sum of `unit_price * quantity`.
    pub fn total_price(&self) -> Money {
        self.cart.total_price()
    }

    /// Order summary under `policy`.
    pub fn pricing(&self, policy: &PricingPolicy) -> CartPricing {
        CartPricing::calculate(&self.cart, policy)
    }

    pub fn items(&self) -> &[LineItem] {
        self.cart.items()
    }

    pub fn get(&self, product_id: &ProductId, size: &str, color: &str) -> Option<&LineItem> {
        self.cart.get(product_id, size, color)
    }

    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    /// Number of distinct line items.
    pub fn line_count(&self) -> usize {
        self.cart.line_count()
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Whether the cart panel is shown.
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn set_open(&mut self, open: bool) {
        self.is_open = open;
    }

    pub fn toggle(&mut self) {
        self.is_open = !self.is_open;
    }

    fn notify(&self, event: CartEvent) {
        for observer in &self.observers {
            observer.on_change(&event, &self.cart);
        }
    }
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new(Currency::default())
    }
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("cart", &self.cart)
            .field("is_open", &self.is_open)
            .field("observers", &self.observers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recording_store() -> (CartStore, Rc<RefCell<Vec<CartEvent>>>) {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = events.clone();
        let mut store = CartStore::new(Currency::EUR);
        store.subscribe(move |event: &CartEvent, _: &Cart| sink.borrow_mut().push(event.clone()));
        (store, events)
    }

    fn add_tee(store: &mut CartStore, size: &str) {
        store.add_item(
            ProductId::new("1"),
            "Tee",
            Money::new(2000, Currency::EUR),
            "tee.jpg",
            size,
            "Black",
        );
    }

    #[test]
    fn test_observers_see_each_mutation() {
        let (mut store, events) = recording_store();
        let id = ProductId::new("1");

        add_tee(&mut store, "M");
        add_tee(&mut store, "M");
        store.update_quantity(&id, "M", "Black", 4);
        store.remove_item(&id, "M", "Black");
        store.clear();

        let events = events.borrow();
        assert_eq!(events.len(), 5);
        assert!(matches!(events[1], CartEvent::ItemAdded { quantity: 2, .. }));
        assert!(matches!(events[2], CartEvent::QuantityUpdated { quantity: 4, .. }));
        assert!(matches!(events[3], CartEvent::ItemRemoved { .. }));
        assert_eq!(events[4], CartEvent::Cleared);
    }

    #[test]
    fn test_noops_do_not_notify() {
        let (mut store, events) = recording_store();
        let id = ProductId::new("1");

        store.remove_item(&id, "M", "Black");
        store.update_quantity(&id, "M", "Black", 3);
        store.update_quantity(&id, "M", "Black", 0);
        store.add_item(id, "Tee", Money::new(2000, Currency::JPY), "tee.jpg", "M", "Black");

        assert!(events.borrow().is_empty());
        assert!(store.is_empty());
    }

    #[test]
    fn test_zero_quantity_reports_removal() {
        let (mut store, events) = recording_store();
        add_tee(&mut store, "M");
        store.update_quantity(&ProductId::new("1"), "M", "Black", -1);

        assert!(store.is_empty());
        assert!(matches!(events.borrow()[1], CartEvent::ItemRemoved { .. }));
    }

    #[test]
    fn test_observer_sees_updated_cart() {
        let totals = Rc::new(RefCell::new(Vec::new()));
        let sink = totals.clone();
        let mut store = CartStore::new(Currency::EUR);
        store.subscribe(move |_: &CartEvent, cart: &Cart| sink.borrow_mut().push(cart.total_items()));

        add_tee(&mut store, "M");
        add_tee(&mut store, "L");
        assert_eq!(*totals.borrow(), vec![1, 2]);
    }

    #[test]
    fn test_visibility_flag() {
        let mut store = CartStore::default();
        assert!(!store.is_open());
        store.set_open(true);
        assert!(store.is_open());
        store.toggle();
        assert!(!store.is_open());
    }

    #[test]
    fn test_add_product_uses_catalog_data() {
        let product = Product::new("7", "Hoodie", Money::new(4500, Currency::EUR))
            .with_images(["hoodie-front.jpg", "hoodie-back.jpg"])
            .with_sizes(["S", "M"])
            .with_colors(["Grey"]);
        let mut store = CartStore::new(Currency::EUR);

        let variant = product.default_variant().unwrap();
        store.add_product(&product, variant);

        let item = &store.items()[0];
        assert_eq!(item.image_url, "hoodie-front.jpg");
        assert_eq!(item.variant, VariantKey::new("S", "Grey"));
        assert_eq!(store.total_price().amount_cents, 4500);
    }
}
