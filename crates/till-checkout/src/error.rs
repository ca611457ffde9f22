//! # Checkout Error Type
//!
//! Unified error type for the orchestration layer: what whatever drives
//! the till (UI, CLI, a test) sees. Lookup and payment failures are
//! propagated to the immediate caller, never swallowed; logging happens at
//! the point of failure but the error still travels.

use thiserror::Error;

use till_core::CoreError;
use till_services::LookupError;

/// Errors surfaced by the checkout controller.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// An operation requiring an active sale was invoked before
    /// `start_sale`.
    ///
    /// This is contract misuse by the driving layer, not a user
    /// condition; it is still a tagged variant so the driver can match it
    /// explicitly instead of crashing the register.
    #[error("no active sale; call start_sale first")]
    NoActiveSale,

    /// An external lookup failed (item not found, catalog unreachable).
    #[error(transparent)]
    Lookup(#[from] LookupError),

    /// A domain rule rejected the operation (insufficient payment,
    /// mutation after settlement, missing payment).
    #[error(transparent)]
    Sale(#[from] CoreError),
}

/// Convenience type alias for Results with CheckoutError.
pub type CheckoutResult<T> = Result<T, CheckoutError>;
