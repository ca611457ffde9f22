//! # till-services: External Collaborators for Till POS
//!
//! Contracts to the systems the till talks to but does not control, plus
//! in-memory implementations suitable for a single standalone register.
//!
//! - [`catalog`] - Item lookup by identifier; may fail (`NotFound`,
//!   `Unavailable`)
//! - [`discount`] - Customer discount rates; infallible, unknown customers
//!   simply get the zero rate
//! - [`error`] - The lookup failure taxonomy
//!
//! Lookups are blocking, synchronous calls. This crate does not retry or
//! back off; a failed lookup is surfaced immediately and the in-progress
//! sale is left untouched by the caller.

pub mod catalog;
pub mod discount;
pub mod error;

pub use catalog::{InMemoryCatalog, ItemCatalog};
pub use discount::{DiscountService, InMemoryDiscounts};
pub use error::{LookupError, LookupResult};
