//! # Checkout Controller
//!
//! The single entry point coordinating a sale: the transaction aggregate,
//! the external lookups, payment settlement and receipt output.
//!
//! ## Ownership
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       Checkout<C, D>                                │
//! │                                                                     │
//! │   catalog: C (ItemCatalog)      discounts: D (DiscountService)      │
//! │   register: CashRegister        printer: Arc<dyn ReceiptPrinter>    │
//! │   observers: Vec<Arc<dyn SaleObserver>>   (process-lifetime)        │
//! │   current: Option<Sale>                   (replaced per sale)       │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The current sale is an owned, replaceable field — never a global.
//! Exactly one sale is current at a time; `start_sale` discards whatever
//! came before it, paid or not. Single-threaded, sequential: one caller
//! drives the till at a time, so no locking around the current sale.

use std::sync::Arc;

use tracing::{debug, info, warn};

use till_core::{CashRegister, CustomerId, Item, ItemId, Money, Sale, SaleObserver};
use till_services::{DiscountService, ItemCatalog};

use crate::error::{CheckoutError, CheckoutResult};
use crate::receipt::{Receipt, ReceiptPrinter};

/// Outcome of ringing up an item: what was added and the new running
/// total, ready for the cashier display.
#[derive(Debug, Clone)]
pub struct EnteredItem {
    pub item: Item,
    pub running_total: Money,
}

/// The checkout controller.
///
/// Generic over its two external collaborators so embedders and tests can
/// plug in anything satisfying the lookup contracts.
pub struct Checkout<C, D>
where
    C: ItemCatalog,
    D: DiscountService,
{
    catalog: C,
    discounts: D,
    register: CashRegister,
    printer: Arc<dyn ReceiptPrinter>,
    observers: Vec<Arc<dyn SaleObserver>>,
    current: Option<Sale>,
}

impl<C, D> Checkout<C, D>
where
    C: ItemCatalog,
    D: DiscountService,
{
    /// Creates a controller with a fresh, empty cash register and no
    /// registered observers. No sale is active until [`Checkout::start_sale`].
    pub fn new(catalog: C, discounts: D, printer: Arc<dyn ReceiptPrinter>) -> Self {
        Checkout {
            catalog,
            discounts,
            register: CashRegister::new(),
            printer,
            observers: Vec::new(),
            current: None,
        }
    }

    /// Registers an observer for all future sales of this controller.
    ///
    /// Registration is process-lifetime, not per-sale; observers are
    /// notified in registration order when a sale completes payment.
    pub fn add_sale_observer(&mut self, observer: Arc<dyn SaleObserver>) {
        self.observers.push(observer);
    }

    /// Starts a new sale, discarding any prior sale state.
    ///
    /// Always succeeds: starting over is legal from every state, paid or
    /// not. Archiving the discarded sale is not this controller's job —
    /// observers saw it when it completed.
    pub fn start_sale(&mut self) {
        let sale = Sale::new();
        info!(sale_id = %sale.id(), "sale started");
        self.current = Some(sale);
    }

    /// Looks up an item and adds it to the active sale.
    ///
    /// On lookup failure the sale is left unmodified and the typed error
    /// is surfaced: `NotFound` carries the offending identifier,
    /// `Unavailable` the outage reason. No partial item ever reaches the
    /// sale.
    pub fn enter_item(&mut self, item_id: ItemId) -> CheckoutResult<EnteredItem> {
        debug!(item_id = %item_id, "enter_item");
        let sale = self.current.as_mut().ok_or(CheckoutError::NoActiveSale)?;

        let item = self.catalog.fetch(item_id).map_err(|err| {
            warn!(item_id = %item_id, error = %err, "item lookup failed");
            err
        })?;

        sale.add_item(item.clone())?;
        let running_total = sale.total();
        info!(
            sale_id = %sale.id(),
            item_id = %item_id,
            total = %running_total,
            "item added"
        );

        Ok(EnteredItem {
            item,
            running_total,
        })
    }

    /// Fetches the customer's discount rate and applies it to the sale.
    ///
    /// The discount service has no error channel: customers without a
    /// discount get the zero rate, which is a legal no-op. Re-applying
    /// overwrites the previous rate.
    pub fn apply_discount(&mut self, customer_id: CustomerId) -> CheckoutResult<()> {
        debug!(customer_id = %customer_id, "apply_discount");
        let sale = self.current.as_mut().ok_or(CheckoutError::NoActiveSale)?;

        let rate = self.discounts.rate_for(customer_id);
        sale.apply_discount(rate)?;
        info!(
            sale_id = %sale.id(),
            customer_id = %customer_id,
            rate_bps = rate.bps(),
            "discount applied"
        );
        Ok(())
    }

    /// The running total of the active sale.
    ///
    /// Callable at any point after `start_sale`; before payment it is the
    /// amount due, after payment the amount that was due.
    pub fn total(&self) -> CheckoutResult<Money> {
        self.current
            .as_ref()
            .map(Sale::total)
            .ok_or(CheckoutError::NoActiveSale)
    }

    /// Settles the active sale with a cash payment and returns the change.
    ///
    /// On success the cash register is credited with the tendered amount
    /// and the sale has already notified every observer — the sale owns
    /// the single notification point, the controller never re-notifies.
    /// An insufficient tender leaves sale and register untouched.
    pub fn pay(&mut self, tendered: Money) -> CheckoutResult<Money> {
        debug!(tendered = %tendered, "pay");
        let sale = self.current.as_mut().ok_or(CheckoutError::NoActiveSale)?;

        let change = sale.pay(tendered, &self.observers).map_err(|err| {
            warn!(sale_id = %sale.id(), error = %err, "payment rejected");
            err
        })?;

        if let Some(payment) = sale.payment().copied() {
            self.register.add_payment(&payment);
        }

        info!(
            sale_id = %sale.id(),
            tendered = %tendered,
            change = %change,
            register_balance = %self.register.balance(),
            "sale paid"
        );
        Ok(change)
    }

    /// Change owed to the customer for the settled sale.
    pub fn change(&self) -> CheckoutResult<Money> {
        let sale = self.current.as_ref().ok_or(CheckoutError::NoActiveSale)?;
        Ok(sale.change()?)
    }

    /// Builds the receipt for the settled sale and hands it to the
    /// printer sink.
    ///
    /// Returns the printed receipt; fails while the sale is unpaid.
    pub fn print_receipt(&self) -> CheckoutResult<Receipt> {
        let sale = self.current.as_ref().ok_or(CheckoutError::NoActiveSale)?;
        let receipt = Receipt::from_sale(sale)?;
        self.printer.print(&receipt);
        info!(
            sale_id = %sale.id(),
            receipt_number = %receipt.receipt_number,
            "receipt printed"
        );
        Ok(receipt)
    }

    /// The cash register fed by this controller.
    pub fn register(&self) -> &CashRegister {
        &self.register
    }

    /// The current sale, if one has been started.
    pub fn sale(&self) -> Option<&Sale> {
        self.current.as_ref()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use till_core::{DiscountRate, SaleStatus, VatRate};
    use till_services::{InMemoryCatalog, InMemoryDiscounts, LookupError};

    use crate::observers::RevenueTracker;
    use crate::receipt::MemoryPrinter;

    type TestCheckout = Checkout<Arc<InMemoryCatalog>, Arc<InMemoryDiscounts>>;

    struct Fixture {
        checkout: TestCheckout,
        catalog: Arc<InMemoryCatalog>,
        discounts: Arc<InMemoryDiscounts>,
        printer: Arc<MemoryPrinter>,
    }

    /// Item 1: $10.00 VAT-inclusive. Customer 1: 20% discount.
    fn fixture() -> Fixture {
        let catalog = Arc::new(InMemoryCatalog::new());
        catalog.stock(
            Item::new(
                ItemId::new(1),
                "Item 1",
                Money::from_cents(1000),
                VatRate::from_bps(1200),
            )
            .unwrap(),
        );
        catalog.stock(
            Item::new(
                ItemId::new(2),
                "Item 2",
                Money::from_cents(500),
                VatRate::from_bps(1200),
            )
            .unwrap(),
        );

        let discounts = Arc::new(InMemoryDiscounts::new());
        discounts.set_rate(CustomerId::new(1), DiscountRate::from_bps(2000));

        let printer = Arc::new(MemoryPrinter::new());
        let checkout = Checkout::new(
            Arc::clone(&catalog),
            Arc::clone(&discounts),
            Arc::clone(&printer) as Arc<dyn ReceiptPrinter>,
        );

        Fixture {
            checkout,
            catalog,
            discounts,
            printer,
        }
    }

    /// Observer double that records sale ids with a label.
    struct Recorder {
        label: &'static str,
        log: Arc<Mutex<Vec<(&'static str, String)>>>,
    }

    impl SaleObserver for Recorder {
        fn on_sale_completed(&self, sale: &Sale) {
            self.log
                .lock()
                .expect("recorder mutex poisoned")
                .push((self.label, sale.id().to_string()));
        }
    }

    #[test]
    fn test_worked_example_discounted_sale() {
        let mut f = fixture();

        // start, add $10.00 item, 20% discount → total $8.00
        f.checkout.start_sale();
        let entered = f.checkout.enter_item(ItemId::new(1)).unwrap();
        assert_eq!(entered.running_total.cents(), 1000);

        f.checkout.apply_discount(CustomerId::new(1)).unwrap();
        assert_eq!(f.checkout.total().unwrap().cents(), 800);

        // pay exactly → change $0.00, register credited with the tender
        let change = f.checkout.pay(Money::from_cents(800)).unwrap();
        assert_eq!(change.cents(), 0);
        assert_eq!(f.checkout.change().unwrap().cents(), 0);
        assert_eq!(f.checkout.register().balance().cents(), 800);

        // a second start_sale resets everything
        f.checkout.start_sale();
        assert_eq!(f.checkout.total().unwrap().cents(), 0);
        assert!(f.checkout.sale().unwrap().items().is_empty());
    }

    #[test]
    fn test_enter_item_unknown_id_leaves_sale_unchanged() {
        let mut f = fixture();
        f.checkout.start_sale();
        f.checkout.enter_item(ItemId::new(1)).unwrap();

        let err = f.checkout.enter_item(ItemId::new(123)).unwrap_err();
        assert!(matches!(
            err,
            CheckoutError::Lookup(LookupError::NotFound { item_id })
                if item_id == ItemId::new(123)
        ));

        assert_eq!(f.checkout.sale().unwrap().items().len(), 1);
        assert_eq!(f.checkout.total().unwrap().cents(), 1000);
    }

    #[test]
    fn test_enter_item_during_outage_leaves_sale_unchanged() {
        let mut f = fixture();
        f.checkout.start_sale();
        f.checkout.enter_item(ItemId::new(1)).unwrap();

        f.catalog.set_outage(Some("database not found, try reconnecting"));
        let err = f.checkout.enter_item(ItemId::new(2)).unwrap_err();
        assert!(matches!(
            err,
            CheckoutError::Lookup(LookupError::Unavailable { .. })
        ));
        assert_eq!(f.checkout.sale().unwrap().items().len(), 1);

        // recoverable: the caller may retry once the catalog is back
        f.catalog.set_outage(None);
        f.checkout.enter_item(ItemId::new(2)).unwrap();
        assert_eq!(f.checkout.sale().unwrap().items().len(), 2);
    }

    #[test]
    fn test_unknown_customer_discount_is_noop() {
        let mut f = fixture();
        f.checkout.start_sale();
        f.checkout.enter_item(ItemId::new(1)).unwrap();

        // customer 40 has no registered discount
        f.checkout.apply_discount(CustomerId::new(40)).unwrap();
        assert_eq!(f.checkout.total().unwrap().cents(), 1000);
    }

    #[test]
    fn test_discount_reapplied_overwrites() {
        let mut f = fixture();
        f.discounts
            .set_rate(CustomerId::new(2), DiscountRate::from_bps(1000));

        f.checkout.start_sale();
        f.checkout.enter_item(ItemId::new(1)).unwrap();
        f.checkout.apply_discount(CustomerId::new(1)).unwrap(); // 20%
        f.checkout.apply_discount(CustomerId::new(2)).unwrap(); // 10%

        // 10%, not 30%
        assert_eq!(f.checkout.total().unwrap().cents(), 900);
    }

    #[test]
    fn test_insufficient_payment_allows_retry() {
        let mut f = fixture();
        f.checkout.start_sale();
        f.checkout.enter_item(ItemId::new(1)).unwrap();

        let err = f.checkout.pay(Money::from_cents(500)).unwrap_err();
        assert!(matches!(
            err,
            CheckoutError::Sale(till_core::CoreError::InsufficientPayment { .. })
        ));

        // register untouched, sale still active
        assert!(f.checkout.register().balance().is_zero());
        assert_eq!(f.checkout.sale().unwrap().status(), SaleStatus::Active);

        // corrected amount settles; register credited with the tender
        let change = f.checkout.pay(Money::from_cents(1500)).unwrap();
        assert_eq!(change.cents(), 500);
        assert_eq!(f.checkout.register().balance().cents(), 1500);
    }

    #[test]
    fn test_register_accumulates_across_sales() {
        let mut f = fixture();

        f.checkout.start_sale();
        f.checkout.enter_item(ItemId::new(1)).unwrap();
        f.checkout.pay(Money::from_cents(1000)).unwrap();

        f.checkout.start_sale();
        f.checkout.enter_item(ItemId::new(2)).unwrap();
        f.checkout.pay(Money::from_cents(1000)).unwrap(); // $5.00 overpaid

        // tendered amounts: 1000 + 1000, not 1000 + 500
        assert_eq!(f.checkout.register().balance().cents(), 2000);
    }

    #[test]
    fn test_observers_shared_across_sales_in_order() {
        let mut f = fixture();
        let log = Arc::new(Mutex::new(Vec::new()));
        f.checkout.add_sale_observer(Arc::new(Recorder {
            label: "first",
            log: Arc::clone(&log),
        }));
        f.checkout.add_sale_observer(Arc::new(Recorder {
            label: "second",
            log: Arc::clone(&log),
        }));

        f.checkout.start_sale();
        f.checkout.enter_item(ItemId::new(1)).unwrap();
        f.checkout.pay(Money::from_cents(1000)).unwrap();
        let first_sale_id = f.checkout.sale().unwrap().id().to_string();

        f.checkout.start_sale();
        f.checkout.enter_item(ItemId::new(2)).unwrap();
        f.checkout.pay(Money::from_cents(500)).unwrap();

        let seen = log.lock().expect("recorder mutex poisoned").clone();
        // both observers, once per sale, registration order each time
        assert_eq!(seen.len(), 4);
        assert_eq!(seen[0].0, "first");
        assert_eq!(seen[1].0, "second");
        assert_eq!(seen[0].1, first_sale_id);
        assert_eq!(seen[0].1, seen[1].1);
        assert_ne!(seen[0].1, seen[2].1);
    }

    #[test]
    fn test_revenue_tracker_wired_through_checkout() {
        let mut f = fixture();
        let revenue = Arc::new(RevenueTracker::new());
        f.checkout.add_sale_observer(Arc::clone(&revenue) as Arc<dyn SaleObserver>);

        f.checkout.start_sale();
        f.checkout.enter_item(ItemId::new(1)).unwrap();
        f.checkout.apply_discount(CustomerId::new(1)).unwrap();
        f.checkout.pay(Money::from_cents(1000)).unwrap();

        // revenue is the discounted total, not the tender
        assert_eq!(revenue.total().cents(), 800);
    }

    #[test]
    fn test_print_receipt_hands_to_sink_once() {
        let mut f = fixture();
        f.checkout.start_sale();
        f.checkout.enter_item(ItemId::new(1)).unwrap();
        f.checkout.pay(Money::from_cents(1000)).unwrap();

        let receipt = f.checkout.print_receipt().unwrap();
        assert_eq!(receipt.total.cents(), 1000);
        assert_eq!(f.printer.len(), 1);
        assert_eq!(f.printer.printed()[0].sale_id, receipt.sale_id);
    }

    #[test]
    fn test_receipt_before_payment_fails() {
        let mut f = fixture();
        f.checkout.start_sale();
        f.checkout.enter_item(ItemId::new(1)).unwrap();

        assert!(matches!(
            f.checkout.print_receipt().unwrap_err(),
            CheckoutError::Sale(till_core::CoreError::NoPaymentRecorded { .. })
        ));
        assert!(f.printer.is_empty());
    }

    #[test]
    fn test_operations_before_start_sale_fail() {
        let mut f = fixture();

        assert!(matches!(
            f.checkout.enter_item(ItemId::new(1)).unwrap_err(),
            CheckoutError::NoActiveSale
        ));
        assert!(matches!(
            f.checkout.apply_discount(CustomerId::new(1)).unwrap_err(),
            CheckoutError::NoActiveSale
        ));
        assert!(matches!(
            f.checkout.pay(Money::from_cents(100)).unwrap_err(),
            CheckoutError::NoActiveSale
        ));
        assert!(matches!(
            f.checkout.total().unwrap_err(),
            CheckoutError::NoActiveSale
        ));
        assert!(matches!(
            f.checkout.change().unwrap_err(),
            CheckoutError::NoActiveSale
        ));
    }

    #[test]
    fn test_mutation_after_payment_rejected() {
        let mut f = fixture();
        f.checkout.start_sale();
        f.checkout.enter_item(ItemId::new(1)).unwrap();
        f.checkout.pay(Money::from_cents(1000)).unwrap();

        assert!(matches!(
            f.checkout.enter_item(ItemId::new(2)).unwrap_err(),
            CheckoutError::Sale(till_core::CoreError::SaleAlreadyPaid { .. })
        ));

        // but starting over is always legal
        f.checkout.start_sale();
        f.checkout.enter_item(ItemId::new(2)).unwrap();
        assert_eq!(f.checkout.total().unwrap().cents(), 500);
    }
}
