//! Pure line-item merge logic.
//!
//! Side-effect-free functions over an ordered sequence of [`CartLineItem`];
//! each returns a new sequence and never mutates its input. The sequence is a
//! de-facto map keyed by `(product_id, variant_id)` that preserves insertion
//! order for display.
//!
//! Every function here is total: removing an absent key, updating an absent
//! key, and totalling a malformed price are all well-defined non-errors.

use prickly_pear_core::types::money::{format_amount, line_total};
use prickly_pear_core::types::{CartLineItem, ProductVariant};

/// Add one unit of `variant` to the sequence.
///
/// If an item with the same `(product_id, variant.id)` key exists, its
/// quantity is incremented by one and its snapshot fields (titles, price,
/// image) are left as captured at first add - later catalog price changes do
/// not reach into the cart. Otherwise a new item with quantity 1 is appended
/// at the end; existing items keep their relative order.
#[must_use]
pub fn add_item(
    items: &[CartLineItem],
    product_id: &str,
    product_title: &str,
    variant: &ProductVariant,
) -> Vec<CartLineItem> {
    let exists = items.iter().any(|item| item.matches(product_id, &variant.id));

    if exists {
        return items
            .iter()
            .cloned()
            .map(|mut item| {
                if item.matches(product_id, &variant.id) {
                    item.quantity += 1;
                }
                item
            })
            .collect();
    }

    let mut next = items.to_vec();
    next.push(CartLineItem {
        product_id: product_id.to_string(),
        variant_id: variant.id.clone(),
        product_title: product_title.to_string(),
        variant_title: variant.title.clone(),
        price: variant.price.clone(),
        image: variant.image.clone().unwrap_or_default(),
        quantity: 1,
    });
    next
}

/// Remove the item keyed by `(product_id, variant_id)`.
///
/// A miss is a no-op: the returned sequence has identical contents and order.
#[must_use]
pub fn remove_item(items: &[CartLineItem], product_id: &str, variant_id: &str) -> Vec<CartLineItem> {
    items
        .iter()
        .filter(|item| !item.matches(product_id, variant_id))
        .cloned()
        .collect()
}

/// Set the quantity of the item keyed by `(product_id, variant_id)`.
///
/// Zero means deletion, not a no-op. Otherwise the quantity is replaced
/// exactly; all other fields and the item order are unchanged, and a miss is
/// a no-op.
#[must_use]
pub fn update_quantity(
    items: &[CartLineItem],
    product_id: &str,
    variant_id: &str,
    quantity: u32,
) -> Vec<CartLineItem> {
    if quantity == 0 {
        return remove_item(items, product_id, variant_id);
    }

    items
        .iter()
        .cloned()
        .map(|mut item| {
            if item.matches(product_id, variant_id) {
                item.quantity = quantity;
            }
            item
        })
        .collect()
}

/// Total price across the sequence, formatted to two decimals.
///
/// Sum of `price * quantity` per item. An item whose price fails to parse
/// contributes zero rather than aborting the computation. `"0.00"` for an
/// empty sequence.
#[must_use]
pub fn total_price(items: &[CartLineItem]) -> String {
    format_amount(
        items
            .iter()
            .map(|item| line_total(&item.price, item.quantity))
            .sum(),
    )
}
