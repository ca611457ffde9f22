//! # Stock Sale Observers
//!
//! Ready-made [`SaleObserver`] implementations for the two side effects
//! every register needs: a running revenue figure and an append-only
//! journal of completed sales.
//!
//! Both use interior mutability (`Mutex`) because observers are held as
//! shared `Arc` handles by the controller for its whole lifetime while
//! the embedder keeps a second handle to read them.

use std::sync::Mutex;

use serde_json::json;
use tracing::info;

use till_core::{Money, Sale, SaleObserver};

// =============================================================================
// Revenue Tracker
// =============================================================================

/// Accumulates the discounted totals of completed sales.
///
/// This is *revenue* (what the goods sold for), unlike the cash register
/// balance which tracks tendered cash.
#[derive(Debug, Default)]
pub struct RevenueTracker {
    total: Mutex<Money>,
}

impl RevenueTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total revenue observed so far.
    pub fn total(&self) -> Money {
        *self.total.lock().expect("revenue mutex poisoned")
    }
}

impl SaleObserver for RevenueTracker {
    fn on_sale_completed(&self, sale: &Sale) {
        let mut total = self.total.lock().expect("revenue mutex poisoned");
        *total += sale.total();
        let revenue = *total;
        info!(sale_id = %sale.id(), revenue = %revenue, "revenue updated");
    }
}

// =============================================================================
// Sales Journal
// =============================================================================

/// Append-only journal of completed sales, one JSON record per sale.
///
/// The record carries the data an external bookkeeping system wants:
/// sale id, line count, totals and tender. Entries are kept in memory;
/// shipping them anywhere is the embedder's job.
#[derive(Debug, Default)]
pub struct SalesJournal {
    entries: Mutex<Vec<String>>,
}

impl SalesJournal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Journal entries in completion order.
    pub fn entries(&self) -> Vec<String> {
        self.entries.lock().expect("journal mutex poisoned").clone()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().expect("journal mutex poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SaleObserver for SalesJournal {
    fn on_sale_completed(&self, sale: &Sale) {
        let record = json!({
            "sale_id": sale.id(),
            "started_at": sale.started_at().to_rfc3339(),
            "line_count": sale.items().len(),
            "subtotal_cents": sale.subtotal().cents(),
            "discount_cents": sale.discount_amount().cents(),
            "total_cents": sale.total().cents(),
            "vat_cents": sale.vat_total().cents(),
            "tendered_cents": sale.payment().map(|p| p.tendered().cents()),
            "change_cents": sale.payment().map(|p| p.change().cents()),
        });

        self.entries
            .lock()
            .expect("journal mutex poisoned")
            .push(record.to_string());
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
