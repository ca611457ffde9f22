//! # Item Catalog Lookup
//!
//! The contract to the external item catalog, and an in-memory
//! implementation for a standalone register.
//!
//! ## Contract
//! ```text
//! fetch(item_id) ──► Item                      (found)
//!                ──► LookupError::NotFound     (id unknown, carries the id)
//!                ──► LookupError::Unavailable  (backing store unreachable)
//! ```
//!
//! A fetch never returns partial item data: the caller either gets a
//! complete, validated [`Item`] or a typed error.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tracing::debug;

use till_core::{Item, ItemId};

use crate::error::{LookupError, LookupResult};

// =============================================================================
// Contract
// =============================================================================

/// Item lookup by identifier.
///
/// Blocking and synchronous; implementations fronting a remote store own
/// their own timeout discipline.
pub trait ItemCatalog {
    /// Fetches complete item data for `item_id`.
    fn fetch(&self, item_id: ItemId) -> LookupResult<Item>;
}

/// Shared handles look up through the same catalog.
impl<T: ItemCatalog + ?Sized> ItemCatalog for Arc<T> {
    fn fetch(&self, item_id: ItemId) -> LookupResult<Item> {
        (**self).fetch(item_id)
    }
}

// =============================================================================
// In-Memory Implementation
// =============================================================================

/// In-memory item catalog.
///
/// Interior mutability (`Mutex`) so a shared `Arc` handle can restock the
/// catalog, or simulate an outage, after a controller has taken ownership
/// of another handle to it.
///
/// The outage switch makes connectivity failure injectable: while an
/// outage reason is set, every fetch fails `Unavailable` with that reason.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    items: Mutex<HashMap<ItemId, Item>>,
    outage: Mutex<Option<String>>,
}

impl InMemoryCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces an item, keyed by its identifier.
    pub fn stock(&self, item: Item) {
        self.items
            .lock()
            .expect("catalog mutex poisoned")
            .insert(item.id, item);
    }

    /// Sets or clears the simulated outage.
    ///
    /// `Some(reason)` makes every subsequent fetch fail `Unavailable`;
    /// `None` restores normal operation.
    pub fn set_outage(&self, reason: Option<&str>) {
        *self.outage.lock().expect("catalog mutex poisoned") = reason.map(str::to_string);
    }

    /// Number of stocked items.
    pub fn len(&self) -> usize {
        self.items.lock().expect("catalog mutex poisoned").len()
    }

    /// Checks whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ItemCatalog for InMemoryCatalog {
    fn fetch(&self, item_id: ItemId) -> LookupResult<Item> {
        debug!(item_id = %item_id, "catalog fetch");

        if let Some(reason) = self.outage.lock().expect("catalog mutex poisoned").as_ref() {
            return Err(LookupError::Unavailable {
                reason: reason.clone(),
            });
        }

        self.items
            .lock()
            .expect("catalog mutex poisoned")
            .get(&item_id)
            .cloned()
            .ok_or(LookupError::NotFound { item_id })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
