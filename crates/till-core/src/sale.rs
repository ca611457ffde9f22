//! # Sale Aggregate
//!
//! The transaction aggregate for a single point-of-sale transaction, plus
//! the observer capability notified when a sale completes.
//!
//! ## Sale Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                        Sale Lifecycle                               │
//! │                                                                     │
//! │   Sale::new()                                                       │
//! │       │                                                             │
//! │       ▼                                                             │
//! │   ┌────────┐  add_item / apply_discount   ┌──────┐                  │
//! │   │ Active │ ───────────────────────────► │Active│ (repeat)         │
//! │   └────────┘                              └──────┘                  │
//! │       │                                                             │
//! │       │ pay(tendered ≥ total)                                       │
//! │       ▼                                                             │
//! │   ┌────────┐   observers notified, in order, exactly once           │
//! │   │  Paid  │   read-only: totals, change, receipt data              │
//! │   └────────┘                                                        │
//! │                                                                     │
//! │   pay(tendered < total) leaves the sale Active — retry allowed      │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - Lines keep insertion order; duplicate item ids are repeated units,
//!   never merged
//! - The discount rate overwrites, it never accumulates
//! - Totals are recomputed from live state on every call, never cached
//! - The payment is recorded at most once and is immutable afterwards

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{CashPayment, DiscountRate, Item, SaleStatus};

// =============================================================================
// Sale Observer
// =============================================================================

/// A capability notified when a sale completes payment.
///
/// Observers are registered on the checkout controller for its whole
/// lifetime and invoked synchronously, in registration order, exactly once
/// per successfully paid sale. The sale is already settled when observers
/// run, so the trait has no error channel: an observer fronting a fallible
/// external system handles its own failures.
pub trait SaleObserver: Send + Sync {
    /// Called with the finalized (Paid) sale.
    fn on_sale_completed(&self, sale: &Sale);
}

// =============================================================================
// Sale
// =============================================================================

/// A single in-progress or completed sale transaction.
///
/// Owned by the checkout controller and replaced wholesale on every new
/// sale; nothing in this type survives `start_sale`.
#[derive(Debug, Clone, Serialize)]
pub struct Sale {
    id: String,
    started_at: DateTime<Utc>,
    lines: Vec<Item>,
    discount: DiscountRate,
    status: SaleStatus,
    payment: Option<CashPayment>,
}

impl Sale {
    /// Creates a fresh, empty, `Active` sale.
    pub fn new() -> Self {
        Sale {
            id: Uuid::new_v4().to_string(),
            started_at: Utc::now(),
            lines: Vec::new(),
            discount: DiscountRate::zero(),
            status: SaleStatus::Active,
            payment: None,
        }
    }

    /// Appends an item to the line list.
    ///
    /// Multiple units of the same item are modeled as repeated entries, so
    /// duplicates are never rejected or merged. The running total changes
    /// on the next read.
    pub fn add_item(&mut self, item: Item) -> CoreResult<()> {
        self.ensure_active()?;
        self.lines.push(item);
        Ok(())
    }

    /// Sets the discount rate, replacing any earlier rate.
    ///
    /// Overwrite, not accumulate: applying r1 then r2 leaves the sale
    /// discounted by r2. The rate comes from the discount service, which
    /// owns range validation; zero is a legal no-op.
    pub fn apply_discount(&mut self, rate: DiscountRate) -> CoreResult<()> {
        self.ensure_active()?;
        self.discount = rate;
        Ok(())
    }

    /// Settles the sale with a cash payment.
    ///
    /// Fails with [`CoreError::InsufficientPayment`] when `tendered` is
    /// below the current total, leaving the sale `Active` and untouched so
    /// the caller can retry with a corrected amount.
    ///
    /// On success the sale transitions to `Paid`, records the immutable
    /// payment (change = tendered − total), notifies every observer in
    /// order with the finalized sale, and returns the change.
    pub fn pay(
        &mut self,
        tendered: Money,
        observers: &[Arc<dyn SaleObserver>],
    ) -> CoreResult<Money> {
        self.ensure_active()?;

        let total = self.total();
        if tendered < total {
            return Err(CoreError::InsufficientPayment { tendered, total });
        }

        let change = tendered - total;
        self.payment = Some(CashPayment::new(tendered, change));
        self.status = SaleStatus::Paid;

        // Single notification point: the controller never re-notifies.
        for observer in observers {
            observer.on_sale_completed(self);
        }

        Ok(change)
    }

    /// The running total: VAT-inclusive line sum × (1 − discount).
    ///
    /// Pure function of the current lines and discount rate, recomputed on
    /// every call.
    pub fn total(&self) -> Money {
        self.subtotal().apply_discount(self.discount)
    }

    /// The VAT-inclusive line sum before the discount.
    pub fn subtotal(&self) -> Money {
        self.lines
            .iter()
            .fold(Money::zero(), |sum, item| sum + item.price)
    }

    /// The amount deducted by the current discount rate.
    pub fn discount_amount(&self) -> Money {
        self.subtotal().discount_amount(self.discount)
    }

    /// Total VAT contained in the (pre-discount) line sum.
    ///
    /// The customer discount is reported as a separate deduction on the
    /// receipt and is not re-allocated across VAT.
    pub fn vat_total(&self) -> Money {
        self.lines
            .iter()
            .fold(Money::zero(), |sum, item| sum + item.vat_amount())
    }

    /// Change owed to the customer.
    ///
    /// Valid only after [`Sale::pay`]; fails with
    /// [`CoreError::NoPaymentRecorded`] before settlement.
    pub fn change(&self) -> CoreResult<Money> {
        self.payment
            .as_ref()
            .map(CashPayment::change)
            .ok_or_else(|| CoreError::NoPaymentRecorded {
                sale_id: self.id.clone(),
            })
    }

    /// The ordered items rung up so far (read-only view).
    pub fn items(&self) -> &[Item] {
        &self.lines
    }

    /// Unique sale identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// When the sale was started.
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Current discount rate.
    pub fn discount(&self) -> DiscountRate {
        self.discount
    }

    /// Current lifecycle status.
    pub fn status(&self) -> SaleStatus {
        self.status
    }

    /// The settled payment, if any.
    pub fn payment(&self) -> Option<&CashPayment> {
        self.payment.as_ref()
    }

    fn ensure_active(&self) -> CoreResult<()> {
        match self.status {
            SaleStatus::Active => Ok(()),
            SaleStatus::Paid => Err(CoreError::SaleAlreadyPaid {
                sale_id: self.id.clone(),
            }),
        }
    }
}

impl Default for Sale {
    fn default() -> Self {
        Sale::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
