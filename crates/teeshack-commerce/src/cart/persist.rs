//! Cart snapshot persistence.
//!
//! The snapshot is the ordered list of line items stored under
//! [`CART_SNAPSHOT_KEY`]. It is read once when the store is built and
//! rewritten by [`SnapshotPersister`] after every mutation.

use teeshack_cache::Cache;

use crate::cart::{Cart, CartEvent, CartObserver, CartStore, LineItem};
use crate::error::CommerceError;
use crate::money::Currency;

/// Slot holding the cart snapshot.
pub const CART_SNAPSHOT_KEY: &str = "teeshack_cart";

/// Observer that mirrors the cart into a [`Cache`].
///
/// An empty cart removes the key. Write failures are logged and otherwise
/// ignored; the in-memory cart stays authoritative.
#[derive(Debug, Clone)]
pub struct SnapshotPersister {
    cache: Cache,
}

impl SnapshotPersister {
    pub fn new(cache: Cache) -> Self {
        Self { cache }
    }

    /// Write the snapshot for `cart` now.
    pub fn save(&self, cart: &Cart) -> Result<(), CommerceError> {
        if cart.is_empty() {
            self.cache.delete(CART_SNAPSHOT_KEY)?;
        } else {
            self.cache.set(CART_SNAPSHOT_KEY, cart.items())?;
        }
        Ok(())
    }
}

impl CartObserver for SnapshotPersister {
    fn on_change(&self, event: &CartEvent, cart: &Cart) {
        if let Err(e) = self.save(cart) {
            tracing::warn!(error = %e, ?event, "failed to persist cart snapshot");
        }
    }
}

/// Read the stored line items, if any.
pub fn read_snapshot(cache: &Cache) -> Result<Option<Vec<LineItem>>, CommerceError> {
    Ok(cache.get(CART_SNAPSHOT_KEY)?)
}

/// Rebuild the cart from the snapshot.
///
/// A missing or unreadable snapshot yields an empty cart.
pub fn load_cart(cache: &Cache, currency: Currency) -> Cart {
    match read_snapshot(cache) {
        Ok(Some(items)) => {
            let cart = Cart::from_items(currency, items);
            tracing::debug!(lines = cart.line_count(), "restored cart snapshot");
            cart
        }
        Ok(None) => Cart::new(currency),
        Err(e) => {
            tracing::warn!(error = %e, "discarding unreadable cart snapshot");
            Cart::new(currency)
        }
    }
}

impl CartStore {
    /// Build a store from the snapshot in `cache` and keep it persisted.
    pub fn restore(cache: Cache, currency: Currency) -> Self {
        let mut store = Self::with_cart(load_cart(&cache, currency));
        store.subscribe(SnapshotPersister::new(cache));
        store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::ProductId;
    use crate::money::Money;

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
    fn test_absent_snapshot_is_empty_cart() {
        let store = CartStore::restore(Cache::in_memory(), Currency::EUR);
        assert!(store.is_empty());
    }

    #[test]
    fn test_each_mutation_is_written() {
        let cache = Cache::in_memory();
        let mut store = CartStore::restore(cache.clone(), Currency::EUR);

        add_tee(&mut store, "M");
        let items = read_snapshot(&cache).unwrap().unwrap();
        assert_eq!(items.len(), 1);

        store.update_quantity(&ProductId::new("1"), "M", "Black", 3);
        let items = read_snapshot(&cache).unwrap().unwrap();
        assert_eq!(items[0].quantity, 3);
    }

    #[test]
    fn test_clear_removes_key() {
        let cache = Cache::in_memory();
        let mut store = CartStore::restore(cache.clone(), Currency::EUR);

        add_tee(&mut store, "M");
        assert!(cache.exists(CART_SNAPSHOT_KEY).unwrap());

        store.clear();
        assert!(!cache.exists(CART_SNAPSHOT_KEY).unwrap());
    }

    #[test]
    fn test_garbage_snapshot_is_discarded() {
        let cache = Cache::in_memory();
        cache.set(CART_SNAPSHOT_KEY, "not a cart").unwrap();

        let cart = load_cart(&cache, Currency::EUR);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_reload_preserves_order() {
        let cache = Cache::in_memory();
        {
            let mut store = CartStore::restore(cache.clone(), Currency::EUR);
            add_tee(&mut store, "L");
            add_tee(&mut store, "S");
            add_tee(&mut store, "L");
        }

        let reloaded = CartStore::restore(cache, Currency::EUR);
        let sizes: Vec<&str> = reloaded
            .items()
            .iter()
            .map(|i| i.variant.size.as_str())
            .collect();
        assert_eq!(sizes, ["L", "S"]);
        assert_eq!(reloaded.total_items(), 3);
    }

    #[test]
    fn test_snapshot_in_another_currency_is_not_relabelled() {
        let cache = Cache::in_memory();
        {
            let mut store = CartStore::restore(cache.clone(), Currency::JPY);
            store.add_item(
                ProductId::new("1"),
                "Tee",
                Money::new(2000, Currency::JPY),
                "tee.jpg",
                "M",
                "Black",
            );
            assert_eq!(store.total_price(), Money::new(2000, Currency::JPY));
        }

        let mut store = CartStore::restore(cache.clone(), Currency::EUR);
        assert!(store.is_empty());
        assert_eq!(store.total_price(), Money::zero(Currency::EUR));

        add_tee(&mut store, "M");
        assert_eq!(store.total_price(), Money::new(2000, Currency::EUR));
        let items = read_snapshot(&cache).unwrap().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].unit_price.currency, Currency::EUR);
    }
}
