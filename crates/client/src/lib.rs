//! Prickly Pear storefront client library.
//!
//! The engine behind a product-browsing and shopping-cart client: it fetches
//! a product catalog from a remote JSON feed and maintains a persistent,
//! observable client-side cart. Rendering, navigation, and theming are the
//! host application's concern; this crate only hands it state.
//!
//! # Architecture
//!
//! - [`catalog`] - feed fetch-and-transform client (`reqwest` + `moka` cache)
//! - [`cart`] - pure merge logic, the observable [`cart::CartStore`], and the
//!   persistence adapter that mirrors it to device-local storage
//! - [`error`] / [`retry`] - the failure taxonomy and the retry-with-backoff
//!   envelope shared by persistence and fetch paths
//! - [`state`] - the single shared [`state::AppState`] a host threads through
//!   its views
//!
//! # Example
//!
//! ```rust,ignore
//! use prickly_pear_client::config::ClientConfig;
//! use prickly_pear_client::state::AppState;
//!
//! let config = ClientConfig::from_env()?;
//! let state = AppState::load(config).await;
//!
//! let products = state.catalog().fetch_products().await?;
//! let product = &products[0];
//! state.cart().add_item(&product.id, &product.title, &product.variants[0]);
//! assert_eq!(state.cart().total_quantity(), 1);
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod retry;
pub mod state;
