//! # till-checkout: Sale Orchestration for Till POS
//!
//! The single entry point that drives a sale from start to receipt.
//!
//! ## Control Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Checkout Control Flow                          │
//! │                                                                     │
//! │  start_sale ──► enter_item (×N) ──► apply_discount? ──► pay         │
//! │                      │                    │              │          │
//! │                      ▼                    ▼              ▼          │
//! │                 ItemCatalog        DiscountService   CashRegister   │
//! │                 (may fail)         (never fails)     + observers    │
//! │                                                          │          │
//! │                                                          ▼          │
//! │                                                    print_receipt    │
//! │                                                    (ReceiptPrinter) │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`controller`] - The [`Checkout`] orchestrator
//! - [`receipt`] - Receipt building, formatting and the printer sink
//! - [`observers`] - Stock sale observers (revenue tracker, sales journal)
//! - [`error`] - The orchestration error type
//!
//! One sale at a time: the controller owns the current sale as a
//! replaceable field, and starting a new sale discards the previous one.

pub mod controller;
pub mod error;
pub mod observers;
pub mod receipt;

pub use controller::{Checkout, EnteredItem};
pub use error::{CheckoutError, CheckoutResult};
pub use observers::{RevenueTracker, SalesJournal};
pub use receipt::{ConsolePrinter, MemoryPrinter, Receipt, ReceiptLine, ReceiptPrinter};
