//! Cart line item type.

use serde::{Deserialize, Serialize};

use super::product::Image;

/// A line item in the cart.
///
/// The `(product_id, variant_id)` pair is the unique key: no two line items
/// in a cart share it, and the cart exposes items as an insertion-ordered
/// sequence.
///
/// Title, price, and image are snapshots captured when the item was first
/// added. Later catalog changes do not retroactively alter items already in
/// the cart; in particular `price` is frozen at add-time.
///
/// The serde layout is forward-compatible by field name: unknown fields are
/// ignored on load and a missing image defaults to the empty-URL image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineItem {
    /// Owning product ID.
    pub product_id: String,
    /// Variant ID within the product.
    pub variant_id: String,
    /// Product title snapshot.
    pub product_title: String,
    /// Variant title snapshot.
    pub variant_title: String,
    /// Price snapshot as a decimal string.
    pub price: String,
    /// Image snapshot.
    #[serde(default)]
    pub image: Image,
    /// Quantity, always >= 1. A quantity update to zero removes the item
    /// instead of storing it.
    pub quantity: u32,
}

impl CartLineItem {
    /// Whether this item is keyed by the given `(product_id, variant_id)`.
    #[must_use]
    pub fn matches(&self, product_id: &str, variant_id: &str) -> bool {
        self.product_id == product_id && self.variant_id == variant_id
    }
}
