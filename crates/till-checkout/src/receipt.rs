//! # Receipt
//!
//! Receipt building and the printer sink.
//!
//! A receipt is a frozen snapshot of a finalized (Paid) sale: line items
//! in ring-up order, totals, the VAT contained in them, tender and change.
//! Building one from an unpaid sale is an error — there is nothing to
//! print until the payment settles.

use std::fmt;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::Serialize;

use till_core::{CoreError, CoreResult, Money, Sale, VatRate};

// =============================================================================
// Receipt Data
// =============================================================================

/// One line on the receipt, in ring-up order.
#[derive(Debug, Clone, Serialize)]
pub struct ReceiptLine {
    pub name: String,
    /// Shelf price, VAT-inclusive.
    pub price: Money,
    pub vat: VatRate,
}

/// A formatted-ready snapshot of a completed sale.
#[derive(Debug, Clone, Serialize)]
pub struct Receipt {
    pub sale_id: String,
    pub receipt_number: String,
    pub issued_at: DateTime<Utc>,
    pub lines: Vec<ReceiptLine>,
    /// VAT-inclusive line sum before the discount.
    pub subtotal: Money,
    /// Amount deducted by the customer discount.
    pub discount: Money,
    /// VAT contained in the line sum.
    pub vat_total: Money,
    pub total: Money,
    pub tendered: Money,
    pub change: Money,
}

impl Receipt {
    /// Builds a receipt from a finalized sale.
    ///
    /// Fails with [`CoreError::NoPaymentRecorded`] while the sale is
    /// still unpaid.
    pub fn from_sale(sale: &Sale) -> CoreResult<Self> {
        let payment = sale
            .payment()
            .ok_or_else(|| CoreError::NoPaymentRecorded {
                sale_id: sale.id().to_string(),
            })?;

        Ok(Receipt {
            sale_id: sale.id().to_string(),
            receipt_number: generate_receipt_number(),
            issued_at: payment.paid_at(),
            lines: sale
                .items()
                .iter()
                .map(|item| ReceiptLine {
                    name: item.name.clone(),
                    price: item.price,
                    vat: item.vat,
                })
                .collect(),
            subtotal: sale.subtotal(),
            discount: sale.discount_amount(),
            vat_total: sale.vat_total(),
            total: sale.total(),
            tendered: payment.tendered(),
            change: payment.change(),
        })
    }
}

/// Fixed-width text rendering, as a till printer would cut it.
impl fmt::Display for Receipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:=^42}", " RECEIPT ")?;
        writeln!(f, "No. {}", self.receipt_number)?;
        writeln!(f, "{}", self.issued_at.format("%Y-%m-%d %H:%M:%S UTC"))?;
        writeln!(f, "{:-<42}", "")?;
        for line in &self.lines {
            writeln!(f, "{:<30}{:>12}", line.name, line.price.to_string())?;
        }
        writeln!(f, "{:-<42}", "")?;
        if !self.discount.is_zero() {
            writeln!(f, "{:<30}{:>12}", "Subtotal", self.subtotal.to_string())?;
            writeln!(f, "{:<30}{:>12}", "Discount", format!("-{}", self.discount))?;
        }
        writeln!(f, "{:<30}{:>12}", "Total", self.total.to_string())?;
        writeln!(f, "{:<30}{:>12}", " of which VAT", self.vat_total.to_string())?;
        writeln!(f, "{:<30}{:>12}", "Tendered", self.tendered.to_string())?;
        writeln!(f, "{:<30}{:>12}", "Change", self.change.to_string())?;
        write!(f, "{:=<42}", "")
    }
}

/// Generates a time-derived receipt number.
///
/// Unique enough for one register: second-resolution timestamp plus a
/// sub-second disambiguator.
fn generate_receipt_number() -> String {
    let now = Utc::now();
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .subsec_nanos();
    format!("{}-{:04}", now.format("%y%m%d-%H%M%S"), nanos % 10000)
}

// =============================================================================
// Printer Sink
// =============================================================================

/// The receipt output device.
///
/// Infallible sink: a jammed physical printer is the device driver's
/// problem, the sale is already settled when printing happens.
pub trait ReceiptPrinter: Send + Sync {
    fn print(&self, receipt: &Receipt);
}

/// Prints receipts to stdout. Stand-in for a till printer device.
#[derive(Debug, Default)]
pub struct ConsolePrinter;

impl ReceiptPrinter for ConsolePrinter {
    fn print(&self, receipt: &Receipt) {
        println!("{}", receipt);
    }
}

/// Captures printed receipts in memory.
///
/// Useful for embedders that render receipts themselves, and for tests.
#[derive(Debug, Default)]
pub struct MemoryPrinter {
    printed: Mutex<Vec<Receipt>>,
}

impl MemoryPrinter {
    pub fn new() -> Self {
        Self::default()
    }

    /// All receipts printed so far, in print order.
    pub fn printed(&self) -> Vec<Receipt> {
        self.printed.lock().expect("printer mutex poisoned").clone()
    }

    pub fn len(&self) -> usize {
        self.printed.lock().expect("printer mutex poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ReceiptPrinter for MemoryPrinter {
    fn print(&self, receipt: &Receipt) {
        self.printed
            .lock()
            .expect("printer mutex poisoned")
            .push(receipt.clone());
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use till_core::{DiscountRate, Item, ItemId};

    fn paid_sale() -> Sale {
        let mut sale = Sale::new();
        sale.add_item(
            Item::new(
                ItemId::new(1),
                "Coffee 500g",
                Money::from_cents(1120),
                VatRate::from_bps(1200),
            )
            .unwrap(),
        )
        .unwrap();
        sale.apply_discount(DiscountRate::from_bps(2000)).unwrap();
        sale.pay(Money::from_cents(1000), &[]).unwrap();
        sale
    }

    #[test]
    fn test_receipt_snapshots_paid_sale() {
        let sale = paid_sale();
        let receipt = Receipt::from_sale(&sale).unwrap();

        assert_eq!(receipt.sale_id, sale.id());
        assert_eq!(receipt.lines.len(), 1);
        assert_eq!(receipt.lines[0].name, "Coffee 500g");
        assert_eq!(receipt.subtotal.cents(), 1120);
        assert_eq!(receipt.discount.cents(), 224);
        assert_eq!(receipt.total.cents(), 896);
        assert_eq!(receipt.vat_total.cents(), 120);
        assert_eq!(receipt.tendered.cents(), 1000);
        assert_eq!(receipt.change.cents(), 104);
    }

    #[test]
    fn test_receipt_requires_payment() {
        let sale = Sale::new();
        assert!(matches!(
            Receipt::from_sale(&sale).unwrap_err(),
            CoreError::NoPaymentRecorded { .. }
        ));
    }

    #[test]
    fn test_receipt_rendering() {
        let receipt = Receipt::from_sale(&paid_sale()).unwrap();
        let text = receipt.to_string();

        assert!(text.contains("RECEIPT"));
        assert!(text.contains("Coffee 500g"));
        assert!(text.contains("$11.20"));
        assert!(text.contains("Discount"));
        assert!(text.contains("-$2.24"));
        assert!(text.contains("Change"));
    }

    #[test]
    fn test_memory_printer_captures_in_order() {
        let printer = MemoryPrinter::new();
        assert!(printer.is_empty());

        let first = Receipt::from_sale(&paid_sale()).unwrap();
        let second = Receipt::from_sale(&paid_sale()).unwrap();
        printer.print(&first);
        printer.print(&second);

        let printed = printer.printed();
        assert_eq!(printed.len(), 2);
        assert_eq!(printed[0].sale_id, first.sale_id);
        assert_eq!(printed[1].sale_id, second.sale_id);
    }
}
