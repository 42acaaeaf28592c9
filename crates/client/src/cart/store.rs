//! Observable cart store.
//!
//! One `CartStore` exists per running application, constructed by the
//! persistence load (see [`super::persistence::restore`]) and threaded to
//! every consumer - there is no global lookup that can fail. The handle is
//! cheaply cloneable; all clones share the same state.

use std::sync::Arc;

use tokio::sync::watch;

use prickly_pear_core::types::{CartLineItem, ProductVariant};

use super::ops;

/// Shared handle to the application's cart.
///
/// Mutations compute the next sequence through the pure merge logic, replace
/// the held collection, and notify observers synchronously within the same
/// call: a read on the same task immediately sees the new state, while the
/// persistence write trails asynchronously.
///
/// No-op mutations (removing an absent key, re-setting an identical
/// quantity) do not notify observers, so callers never observe a spurious
/// re-render or storage write.
#[derive(Clone)]
pub struct CartStore {
    inner: Arc<CartStoreInner>,
}

struct CartStoreInner {
    items: watch::Sender<Vec<CartLineItem>>,
}

impl CartStore {
    /// Create a store seeded with the given items.
    ///
    /// Only the persistence adapter constructs stores, which is what makes
    /// "reading the cart before it is loaded" unrepresentable.
    pub(crate) fn seeded(items: Vec<CartLineItem>) -> Self {
        let (tx, _rx) = watch::channel(items);
        Self {
            inner: Arc::new(CartStoreInner { items: tx }),
        }
    }

    /// Snapshot of the current line items, in insertion order.
    #[must_use]
    pub fn items(&self) -> Vec<CartLineItem> {
        self.inner.items.borrow().clone()
    }

    /// Subscribe to cart changes.
    ///
    /// The receiver observes every notified mutation; the current value at
    /// subscribe time is already marked as seen.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Vec<CartLineItem>> {
        self.inner.items.subscribe()
    }

    /// Number of line items (not units).
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.items.borrow().len()
    }

    /// Whether the cart holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.items.borrow().is_empty()
    }

    /// Total unit count across all line items (the badge number).
    #[must_use]
    pub fn total_quantity(&self) -> u32 {
        self.inner
            .items
            .borrow()
            .iter()
            .map(|item| item.quantity)
            .sum()
    }

    /// Total price of the cart, formatted to two decimals.
    #[must_use]
    pub fn total_price(&self) -> String {
        ops::total_price(&self.inner.items.borrow())
    }

    /// Add one unit of `variant`, merging into an existing line item when the
    /// `(product_id, variant.id)` key is already present.
    pub fn add_item(&self, product_id: &str, product_title: &str, variant: &ProductVariant) {
        self.inner.items.send_modify(|items| {
            let next = ops::add_item(items, product_id, product_title, variant);
            *items = next;
        });
    }

    /// Remove the line item keyed by `(product_id, variant_id)`.
    ///
    /// Removing an absent key is a silent no-op.
    pub fn remove_item(&self, product_id: &str, variant_id: &str) {
        self.inner.items.send_if_modified(|items| {
            let next = ops::remove_item(items, product_id, variant_id);
            if next.len() == items.len() {
                return false;
            }
            *items = next;
            true
        });
    }

    /// Set the quantity of the line item keyed by `(product_id, variant_id)`.
    ///
    /// A quantity of zero or less means deletion and routes through
    /// [`Self::remove_item`], so removal side effects fire exactly once.
    pub fn update_quantity(&self, product_id: &str, variant_id: &str, quantity: i64) {
        if quantity <= 0 {
            self.remove_item(product_id, variant_id);
            return;
        }

        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        self.inner.items.send_if_modified(|items| {
            let next = ops::update_quantity(items, product_id, variant_id, quantity);
            if next == *items {
                return false;
            }
            *items = next;
            true
        });
    }

    /// Empty the cart unconditionally. Confirmation UX is a caller concern.
    pub fn clear_cart(&self) {
        self.inner.items.send_if_modified(|items| {
            if items.is_empty() {
                return false;
            }
            items.clear();
            true
        });
    }
}

#[cfg(test)]
mod tests {
    use prickly_pear_core::types::Image;

    use super::*;

    fn variant(id: &str, price: &str) -> ProductVariant {
        ProductVariant {
            id: id.to_string(),
            title: format!("Variant {id}"),
            price: price.to_string(),
            available: true,
            image: Some(Image::new("img")),
        }
    }

    #[test]
    fn test_scenario_add_merge_remove() {
        let store = CartStore::seeded(Vec::new());
        assert_eq!(store.total_price(), "0.00");

        store.add_item("p1", "Product 1", &variant("v1", "10.00"));
        assert_eq!(store.total_price(), "10.00");
        assert_eq!(store.len(), 1);

        store.add_item("p1", "Product 1", &variant("v1", "10.00"));
        assert_eq!(store.total_price(), "20.00");
        assert_eq!(store.len(), 1);
        assert_eq!(store.items()[0].quantity, 2);

        store.remove_item("p1", "v1");
        assert_eq!(store.total_price(), "0.00");
        assert!(store.is_empty());
    }

    #[test]
    fn test_two_variants_same_product() {
        let store = CartStore::seeded(Vec::new());
        store.add_item("p1", "Product 1", &variant("v1", "10.00"));
        store.add_item("p1", "Product 1", &variant("v2", "15.00"));
        store.add_item("p1", "Product 1", &variant("v2", "15.00"));

        let items = store.items();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].variant_id, "v1");
        assert_eq!(items[1].variant_id, "v2");
        assert_eq!(items[0].quantity, 1);
        assert_eq!(items[1].quantity, 2);
        assert_eq!(store.total_quantity(), 3);
    }

    #[test]
    fn test_update_quantity_zero_and_negative_remove() {
        for quantity in [0_i64, -1, -100] {
            let store = CartStore::seeded(Vec::new());
            store.add_item("p1", "Product 1", &variant("v1", "10.00"));
            store.update_quantity("p1", "v1", quantity);
            assert!(store.is_empty(), "quantity {quantity} should remove");
        }
    }

    #[test]
    fn test_mutation_visible_to_immediate_read() {
        let store = CartStore::seeded(Vec::new());
        store.add_item("p1", "Product 1", &variant("v1", "10.00"));
        // Same logical turn: no awaiting between mutation and read.
        assert_eq!(store.items().len(), 1);
    }

    #[test]
    fn test_subscriber_notified_on_mutation() {
        let store = CartStore::seeded(Vec::new());
        let rx = store.subscribe();
        assert!(!rx.has_changed().unwrap());

        store.add_item("p1", "Product 1", &variant("v1", "10.00"));
        assert!(rx.has_changed().unwrap());
    }

    #[test]
    fn test_noop_removal_does_not_notify() {
        let store = CartStore::seeded(Vec::new());
        store.add_item("p1", "Product 1", &variant("v1", "10.00"));

        let rx = store.subscribe();
        store.remove_item("p1", "missing");
        assert!(!rx.has_changed().unwrap());
    }

    #[test]
    fn test_noop_quantity_update_does_not_notify() {
        let store = CartStore::seeded(Vec::new());
        store.add_item("p1", "Product 1", &variant("v1", "10.00"));

        let rx = store.subscribe();
        store.update_quantity("p1", "v1", 1);
        assert!(!rx.has_changed().unwrap());
        store.update_quantity("p1", "missing", 4);
        assert!(!rx.has_changed().unwrap());
    }

    #[test]
    fn test_clear_cart() {
        let store = CartStore::seeded(Vec::new());
        store.add_item("p1", "Product 1", &variant("v1", "10.00"));
        store.add_item("p2", "Product 2", &variant("v1", "20.00"));

        store.clear_cart();
        assert!(store.is_empty());
        assert_eq!(store.total_price(), "0.00");
    }

    #[test]
    fn test_clones_share_state() {
        let store = CartStore::seeded(Vec::new());
        let other = store.clone();
        store.add_item("p1", "Product 1", &variant("v1", "10.00"));
        assert_eq!(other.len(), 1);
    }
}
