//! Raw product feed wire types.
//!
//! The remote feed is Shopify-shaped JSON, either a bare array of products or
//! an object wrapping one under `products`. Parsing is tolerant: every field
//! the transform can repair is optional here, and repair policy lives in
//! [`super::conversions`].

use serde::Deserialize;

/// Top-level feed payload: a bare array or a `{"products": [...]}` envelope.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ProductFeed {
    /// Bare array of products.
    Products(Vec<FeedProduct>),
    /// Envelope object. A missing `products` field reads as an empty feed.
    Envelope {
        #[serde(default)]
        products: Vec<FeedProduct>,
    },
}

impl ProductFeed {
    /// Unwrap to the product list.
    #[must_use]
    pub fn into_products(self) -> Vec<FeedProduct> {
        match self {
            Self::Products(products) | Self::Envelope { products } => products,
        }
    }
}

/// A product as it appears on the wire.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedProduct {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description_html: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub images: Vec<FeedImage>,
    #[serde(default)]
    pub variants: Vec<FeedVariant>,
}

/// A product image on the wire.
#[derive(Debug, Deserialize)]
pub struct FeedImage {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

/// A product variant on the wire.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedVariant {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub price: Option<FeedPrice>,
    #[serde(default)]
    pub available_for_sale: Option<bool>,
    #[serde(default)]
    pub image: Option<FeedImageRef>,
}

/// A variant price: modern feeds send `{"amount": "29.99"}`, older ones a
/// bare string or number.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum FeedPrice {
    Amount {
        #[serde(default)]
        amount: Option<String>,
    },
    Text(String),
    Number(f64),
}

/// Reference from a variant to one of its product's images.
#[derive(Debug, Deserialize)]
pub struct FeedImageRef {
    #[serde(default)]
    pub id: Option<String>,
}
