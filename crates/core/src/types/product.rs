//! Catalog product types.
//!
//! These are the clean domain types handed to the presentation layer and the
//! cart engine, separate from the raw feed wire format.

use serde::{Deserialize, Serialize};

/// Product or variant image.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    /// Image URL. The empty string is the documented "no image" fallback.
    pub url: String,
}

impl Image {
    /// Create an image from a URL.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

/// A product variant (specific combination of options).
///
/// Immutable once fetched; the cart snapshots the fields it needs at
/// add-time rather than holding a reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductVariant {
    /// Variant ID, unique within its product.
    pub id: String,
    /// Variant title (e.g., "Small").
    pub title: String,
    /// Current price as a decimal string (e.g., `"29.99"`).
    pub price: String,
    /// Whether this variant is available for sale.
    pub available: bool,
    /// Variant image, if any.
    pub image: Option<Image>,
}

/// A product in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Product ID.
    pub id: String,
    /// Product title.
    pub title: String,
    /// Plain text description (HTML already stripped by the catalog client).
    pub description: String,
    /// Main product image.
    pub image: Image,
    /// Product variants. Never empty: the catalog client synthesizes a
    /// default variant for products without one.
    pub variants: Vec<ProductVariant>,
}
