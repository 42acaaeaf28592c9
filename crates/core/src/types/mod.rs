//! Core types for Prickly Pear.
//!
//! Domain types shared between the catalog client and the cart engine.

pub mod cart;
pub mod money;
pub mod product;

pub use cart::CartLineItem;
pub use product::{Image, Product, ProductVariant};
