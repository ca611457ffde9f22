//! # Discount Service
//!
//! The contract to the customer discount registry.
//!
//! Unlike the catalog, this lookup has **no error channel**: a customer
//! with no registered discount simply gets the zero rate, and rate range
//! validation (0 ≤ rate ≤ 1) is this producer's contract to honor before
//! a rate ever reaches a sale.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tracing::debug;

use till_core::{CustomerId, DiscountRate};

/// Customer discount lookup.
pub trait DiscountService {
    /// Returns the applicable discount rate for `customer_id`.
    ///
    /// Unknown customers map to [`DiscountRate::zero`].
    fn rate_for(&self, customer_id: CustomerId) -> DiscountRate;
}

/// Shared handles look up through the same registry.
impl<T: DiscountService + ?Sized> DiscountService for Arc<T> {
    fn rate_for(&self, customer_id: CustomerId) -> DiscountRate {
        (**self).rate_for(customer_id)
    }
}

/// In-memory discount registry.
#[derive(Debug, Default)]
pub struct InMemoryDiscounts {
    rates: Mutex<HashMap<CustomerId, DiscountRate>>,
}

impl InMemoryDiscounts {
    /// Creates an empty registry: every customer gets the zero rate.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers (or replaces) a customer's discount rate.
    pub fn set_rate(&self, customer_id: CustomerId, rate: DiscountRate) {
        self.rates
            .lock()
            .expect("discount mutex poisoned")
            .insert(customer_id, rate);
    }
}

impl DiscountService for InMemoryDiscounts {
    fn rate_for(&self, customer_id: CustomerId) -> DiscountRate {
        let rate = self
            .rates
            .lock()
            .expect("discount mutex poisoned")
            .get(&customer_id)
            .copied()
            .unwrap_or_default();
        debug!(customer_id = %customer_id, rate_bps = rate.bps(), "discount lookup");
        rate
    }
}
