//! # Cash Register
//!
//! Running balance of accepted cash across the lifetime of a controller.
//!
//! The register is credited with the **tendered** amount, not the
//! discounted total: it mirrors the physical cash that entered the drawer,
//! not net revenue. Change handed back is not subtracted — this matches
//! the original drawer bookkeeping, where overpayment is unbounded and
//! change comes out of a float counted separately.

use serde::Serialize;

use crate::money::Money;
use crate::types::CashPayment;

/// Running balance of cash accepted since the register was opened.
///
/// Mutated exactly once per completed sale. No subtraction, no
/// per-denomination tracking.
#[derive(Debug, Default, Clone, Serialize)]
pub struct CashRegister {
    balance: Money,
}

impl CashRegister {
    /// Opens a register with a zero balance.
    pub fn new() -> Self {
        CashRegister {
            balance: Money::zero(),
        }
    }

    /// Credits the register with a settled payment's tendered amount.
    pub fn add_payment(&mut self, payment: &CashPayment) {
        self.balance += payment.tendered();
    }

    /// Current total balance.
    #[inline]
    pub fn balance(&self) -> Money {
        self.balance
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sale::Sale;
    use crate::types::{Item, ItemId, VatRate};

    fn paid_sale(price_cents: i64, tendered_cents: i64) -> Sale {
        let mut sale = Sale::new();
        sale.add_item(
            Item::new(
                ItemId::new(1),
                "Item 1",
                Money::from_cents(price_cents),
                VatRate::zero(),
            )
            .unwrap(),
        )
        .unwrap();
        sale.pay(Money::from_cents(tendered_cents), &[]).unwrap();
        sale
    }

    #[test]
    fn test_register_starts_empty() {
        assert!(CashRegister::new().balance().is_zero());
    }

    #[test]
    fn test_register_accumulates_tendered_amounts() {
        let mut register = CashRegister::new();

        let first = paid_sale(800, 1000);
        let second = paid_sale(500, 500);

        register.add_payment(first.payment().unwrap());
        register.add_payment(second.payment().unwrap());

        // Tendered amounts, not totals: 1000 + 500, not 800 + 500
        assert_eq!(register.balance().cents(), 1500);
    }
}
