//! # Lookup Errors
//!
//! Failure taxonomy for external lookups.
//!
//! Both variants are recoverable from the caller's perspective: the
//! in-progress sale is left unchanged either way, and the caller may retry
//! with a different identifier (`NotFound`) or after the backing store
//! comes back (`Unavailable`). Retry policy belongs to whoever drives the
//! till, not to this crate.

use thiserror::Error;

use till_core::ItemId;

/// Errors raised by external lookups.
#[derive(Debug, Error)]
pub enum LookupError {
    /// The identifier is not present in the catalog.
    ///
    /// Carries the offending identifier so the driving layer can tell the
    /// cashier exactly which entry failed.
    #[error("item {item_id} not found in catalog")]
    NotFound { item_id: ItemId },

    /// The backing store could not be reached.
    ///
    /// Connectivity loss, timeout upstream — the reason is human-readable
    /// and meant for the operator, not for matching.
    #[error("catalog unavailable: {reason}")]
    Unavailable { reason: String },
}

/// Convenience type alias for Results with LookupError.
pub type LookupResult<T> = Result<T, LookupError>;
