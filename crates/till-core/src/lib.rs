//! # till-core: Pure Business Logic for Till POS
//!
//! This crate is the **heart** of Till POS. It models a single cash sale
//! as pure functions and types with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       Till POS Architecture                         │
//! │                                                                     │
//! │  ┌─────────────────────────────────────────────────────────────┐   │
//! │  │                 till-checkout (orchestration)               │   │
//! │  │     start_sale ──► enter_item ──► pay ──► print_receipt     │   │
//! │  └─────────────────────────────┬───────────────────────────────┘   │
//! │                                │                                    │
//! │  ┌─────────────────────────────▼───────────────────────────────┐   │
//! │  │               ★ till-core (THIS CRATE) ★                    │   │
//! │  │                                                             │   │
//! │  │   ┌─────────┐  ┌─────────┐  ┌──────────┐  ┌────────────┐   │   │
//! │  │   │  types  │  │  money  │  │   sale   │  │  register  │   │   │
//! │  │   │  Item   │  │  Money  │  │   Sale   │  │    Cash    │   │   │
//! │  │   │ VatRate │  │ rounding│  │ Observer │  │  Register  │   │   │
//! │  │   └─────────┘  └─────────┘  └──────────┘  └────────────┘   │   │
//! │  │                                                             │   │
//! │  │   NO I/O • NO LOOKUPS • NO PRINTING • PURE FUNCTIONS        │   │
//! │  └─────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Item, VatRate, CashPayment, etc.)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`sale`] - The Sale aggregate and the SaleObserver capability
//! - [`register`] - Running cash drawer balance
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Totals are recomputed from live state on every call
//! 2. **No I/O**: Catalog access, printing, logging setup are FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use till_core::money::Money;
//! use till_core::types::{DiscountRate, Item, ItemId, VatRate};
//! use till_core::sale::Sale;
//!
//! let coffee = Item::new(
//!     ItemId::new(1),
//!     "Coffee 500g",
//!     Money::from_cents(1000),       // $10.00, VAT-inclusive
//!     VatRate::from_bps(1200),       // 12%
//! ).unwrap();
//!
//! let mut sale = Sale::new();
//! sale.add_item(coffee).unwrap();
//! sale.apply_discount(DiscountRate::from_bps(2000)).unwrap(); // 20% off
//!
//! // $10.00 × (1 − 0.20) = $8.00
//! assert_eq!(sale.total().cents(), 800);
//! ```

pub mod error;
pub mod money;
pub mod register;
pub mod sale;
pub mod types;

// Re-exports for convenience: `use till_core::Money` instead of
// `use till_core::money::Money`

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use register::CashRegister;
pub use sale::{Sale, SaleObserver};
pub use types::*;
