//! # Error Types
//!
//! Domain-specific error types for till-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                          Error Types                                │
//! │                                                                     │
//! │  till-core errors (this file)                                       │
//! │  ├── CoreError        - Sale/payment domain errors                  │
//! │  └── ValidationError  - Input validation failures                   │
//! │                                                                     │
//! │  till-services errors (separate crate)                              │
//! │  └── LookupError      - Catalog lookup failures                     │
//! │                                                                     │
//! │  till-checkout errors (orchestration)                               │
//! │  └── CheckoutError    - What the driving layer sees                 │
//! │                                                                     │
//! │  Flow: ValidationError → CoreError ─┐                               │
//! │                       LookupError ──┴──► CheckoutError → caller     │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error payloads (sale id, amounts, etc.)
//! 3. Errors are enum variants, never String
//! 4. Recoverable conditions stay recoverable: an insufficient payment
//!    leaves the sale open for a retry

use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations or domain contract
/// misuse. They are surfaced to whatever drives the sale, never swallowed.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Tendered cash does not cover the sale total.
    ///
    /// ## When This Occurs
    /// - `pay` called with an amount below the (discounted) total
    ///
    /// The sale stays `Active` and unchanged: the caller may retry with a
    /// corrected amount. Partial payments are not a thing in this domain —
    /// cash is exact-or-overpaid.
    #[error("insufficient payment: tendered {tendered}, total {total}")]
    InsufficientPayment { tendered: Money, total: Money },

    /// The sale has already been paid and is read-only.
    ///
    /// ## When This Occurs
    /// - Adding an item after payment settled
    /// - Re-applying a discount after payment settled
    /// - Calling `pay` a second time
    ///
    /// This is contract misuse by the driving layer, not a user condition.
    #[error("sale {sale_id} is already paid, cannot perform operation")]
    SaleAlreadyPaid { sale_id: String },

    /// No payment has been recorded yet.
    ///
    /// Raised by accessors that only make sense after settlement
    /// (`change`, receipt building).
    #[error("sale {sale_id} has no recorded payment")]
    NoPaymentRecorded { sale_id: String },

    /// Validation error (wraps ValidationError).
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when constructed data doesn't meet field requirements.
/// Used for early validation before domain logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be zero or positive.
    #[error("{field} must be non-negative")]
    MustBeNonNegative { field: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InsufficientPayment {
            tendered: Money::from_cents(500),
            total: Money::from_cents(800),
        };
        assert_eq!(
            err.to_string(),
            "insufficient payment: tendered $5.00, total $8.00"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::MustBeNonNegative {
            field: "price".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
