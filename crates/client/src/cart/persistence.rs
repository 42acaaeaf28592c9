//! Persistence adapter: mirrors the cart store into device-local storage.
//!
//! The cart lives under a single fixed key as a JSON array of line items.
//! [`restore`] reads it once, seeds the store, and only then starts the save
//! reactor - so the seed itself never triggers a save, and no mutation can be
//! observed before the store counts as loaded.
//!
//! Failures never cross this boundary. A missing key is the empty cart; a
//! corrupt payload is discarded with a warning; a failed write leaves the
//! in-memory store authoritative and the next successful write reconciles
//! storage.

use tokio::sync::watch;

use prickly_pear_core::types::CartLineItem;

use crate::retry::{RetryPolicy, with_retry};

use super::storage::KeyValueStorage;
use super::store::CartStore;

/// The fixed, application-namespaced storage key for the cart.
pub const CART_STORAGE_KEY: &str = "@prickly_pear:cart_items";

/// Load the persisted cart from `storage`, seed a store with it, and spawn
/// the background reactor that writes every later change back.
///
/// Always succeeds: absence, corruption, and exhausted read retries all
/// yield an empty cart rather than an error.
pub async fn restore<S>(storage: S) -> CartStore
where
    S: KeyValueStorage + 'static,
{
    let items = load_items(&storage).await;
    let store = CartStore::seeded(items);

    // Subscribing after the seed marks the seeded value as seen: the reactor
    // only wakes for mutations made from here on.
    let rx = store.subscribe();
    tokio::spawn(persist_loop(storage, rx));

    store
}

/// Read and parse the persisted line items, falling back to empty.
async fn load_items<S: KeyValueStorage>(storage: &S) -> Vec<CartLineItem> {
    let raw = match with_retry(|| storage.load(CART_STORAGE_KEY), RetryPolicy::default()).await {
        Ok(raw) => raw,
        Err(err) => {
            tracing::warn!(error = %err, "failed to read persisted cart, starting empty");
            return Vec::new();
        }
    };

    let Some(raw) = raw else {
        return Vec::new();
    };

    match serde_json::from_str::<Vec<CartLineItem>>(&raw) {
        Ok(items) => {
            tracing::debug!(count = items.len(), "restored persisted cart");
            items
        }
        Err(err) => {
            tracing::warn!(error = %err, "discarding corrupt persisted cart");
            Vec::new()
        }
    }
}

/// Save reactor: writes the current snapshot after every notified change.
///
/// Rapid mutations coalesce into the latest snapshot (last write wins), and
/// because this task is the only writer, two snapshots can never interleave.
/// Ends when the store is dropped.
async fn persist_loop<S: KeyValueStorage>(storage: S, mut rx: watch::Receiver<Vec<CartLineItem>>) {
    while rx.changed().await.is_ok() {
        let snapshot = rx.borrow_and_update().clone();

        let payload = match serde_json::to_string(&snapshot) {
            Ok(payload) => payload,
            Err(err) => {
                tracing::warn!(error = %err, "failed to serialize cart, skipping write");
                continue;
            }
        };

        if let Err(err) = storage.save(CART_STORAGE_KEY, &payload).await {
            tracing::warn!(error = %err, "failed to persist cart, in-memory state stays authoritative");
        }
    }
}
