//! # Domain Types
//!
//! Core domain types used throughout Till POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                          Domain Types                               │
//! │                                                                     │
//! │  ┌───────────────┐   ┌───────────────┐   ┌────────────────┐        │
//! │  │     Item      │   │  CashPayment  │   │   SaleStatus   │        │
//! │  │  ───────────  │   │  ───────────  │   │  ────────────  │        │
//! │  │  id (ItemId)  │   │  tendered     │   │  Active        │        │
//! │  │  name         │   │  change       │   │  Paid          │        │
//! │  │  price (incl.)│   │  paid_at      │   └────────────────┘        │
//! │  │  vat (bps)    │   └───────────────┘                             │
//! │  └───────────────┘                                                 │
//! │                                                                     │
//! │  ┌───────────────┐   ┌───────────────┐                             │
//! │  │    VatRate    │   │ DiscountRate  │                             │
//! │  │  bps (u32)    │   │  bps (u32)    │                             │
//! │  │  1200 = 12%   │   │  2000 = 20%   │                             │
//! │  └───────────────┘   └───────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Item prices are **VAT-inclusive** (the EU/UK model): the shelf price is
//! what the customer pays, and the receipt works backwards to report the
//! VAT contained in it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Rates
// =============================================================================

/// VAT rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 1200 bps = 12% (e.g., food VAT in Sweden)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VatRate(u32);

impl VatRate {
    /// Creates a VAT rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        VatRate(bps)
    }

    /// Creates a VAT rate from a percentage (for convenience).
    pub fn from_percentage(pct: f64) -> Self {
        VatRate((pct * 100.0).round() as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero VAT rate.
    #[inline]
    pub const fn zero() -> Self {
        VatRate(0)
    }

    /// Checks if the rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for VatRate {
    fn default() -> Self {
        VatRate::zero()
    }
}

/// Customer discount rate in basis points, in `[0, 10000]`.
///
/// The range is the *producer's* contract: rates are minted by the
/// discount service, and the sale applies whatever it is handed without
/// re-validating. Zero is a legal "no discount" rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountRate(u32);

impl DiscountRate {
    /// Creates a discount rate from basis points (2000 = 20%).
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        DiscountRate(bps)
    }

    /// Creates a discount rate from a percentage.
    pub fn from_percentage(pct: f64) -> Self {
        DiscountRate((pct * 100.0).round() as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// The zero (no discount) rate.
    #[inline]
    pub const fn zero() -> Self {
        DiscountRate(0)
    }

    /// Checks if the rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for DiscountRate {
    fn default() -> Self {
        DiscountRate::zero()
    }
}

// =============================================================================
// Identifiers
// =============================================================================

/// Catalog item identifier, unique per catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(u32);

impl ItemId {
    #[inline]
    pub const fn new(id: u32) -> Self {
        ItemId(id)
    }

    #[inline]
    pub const fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ItemId {
    fn from(id: u32) -> Self {
        ItemId(id)
    }
}

/// Customer identifier used for discount lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CustomerId(u32);

impl CustomerId {
    #[inline]
    pub const fn new(id: u32) -> Self {
        CustomerId(id)
    }

    #[inline]
    pub const fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for CustomerId {
    fn from(id: u32) -> Self {
        CustomerId(id)
    }
}

// =============================================================================
// Item
// =============================================================================

/// A catalog item as fetched by the item lookup.
///
/// Immutable once constructed: the sale keeps the exact data it was handed,
/// so a later catalog change never alters a line already rung up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Catalog identifier.
    pub id: ItemId,

    /// Display name shown to the cashier and on the receipt.
    pub name: String,

    /// Shelf price, VAT-inclusive.
    pub price: Money,

    /// VAT rate contained in the price.
    pub vat: VatRate,
}

impl Item {
    /// Creates an item, validating its fields.
    ///
    /// ## Rules
    /// - `name` must not be empty (after trimming) and at most 200 chars
    /// - `price` must be non-negative
    pub fn new(
        id: ItemId,
        name: impl Into<String>,
        price: Money,
        vat: VatRate,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        let name = name.trim();

        if name.is_empty() {
            return Err(ValidationError::Required {
                field: "name".to_string(),
            });
        }

        if name.len() > 200 {
            return Err(ValidationError::TooLong {
                field: "name".to_string(),
                max: 200,
            });
        }

        if price.is_negative() {
            return Err(ValidationError::MustBeNonNegative {
                field: "price".to_string(),
            });
        }

        Ok(Item {
            id,
            name: name.to_string(),
            price,
            vat,
        })
    }

    /// The VAT amount contained in this item's price.
    #[inline]
    pub fn vat_amount(&self) -> Money {
        self.price.vat_portion(self.vat)
    }
}

// =============================================================================
// Sale Status
// =============================================================================

/// The lifecycle status of a sale.
///
/// `Active → Paid` is the only transition, performed by `Sale::pay`.
/// A new sale always starts `Active`; there is no way back from `Paid`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SaleStatus {
    /// Sale is in progress (items being added, discount may change).
    Active,
    /// Sale has been paid; read-only from here on.
    Paid,
}

impl Default for SaleStatus {
    fn default() -> Self {
        SaleStatus::Active
    }
}

// =============================================================================
// Cash Payment
// =============================================================================

/// A settled cash payment.
///
/// Constructed by the sale when payment settles; immutable afterwards.
/// `change` is already computed against the total at settlement time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashPayment {
    tendered: Money,
    change: Money,
    paid_at: DateTime<Utc>,
}

impl CashPayment {
    pub(crate) fn new(tendered: Money, change: Money) -> Self {
        CashPayment {
            tendered,
            change,
            paid_at: Utc::now(),
        }
    }

    /// The cash amount the customer handed over.
    #[inline]
    pub fn tendered(&self) -> Money {
        self.tendered
    }

    /// Change owed back to the customer (tendered − total).
    #[inline]
    pub fn change(&self) -> Money {
        self.change
    }

    /// When the payment settled.
    #[inline]
    pub fn paid_at(&self) -> DateTime<Utc> {
        self.paid_at
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
