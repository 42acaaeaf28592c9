//! Prickly Pear Core - Shared types library.
//!
//! This crate provides common types used across all Prickly Pear components:
//! - `client` - Storefront client library (catalog fetch + cart engine)
//! - host applications embedding the client
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients, no async. This keeps it lightweight and allows it to be used
//! anywhere.
//!
//! # Modules
//!
//! - [`types`] - Product, variant, and cart line item types plus decimal
//!   money arithmetic

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
