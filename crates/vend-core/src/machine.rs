//! # Vending Machine
//!
//! The machine: an ordered shelf of products plus its sales ledger.
//!
//! ## Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Machine Operations                                   │
//! │                                                                         │
//! │  Startup                         Per customer                           │
//! │  ───────                         ────────────                           │
//! │                                                                         │
//! │  add_product() ──► shelf         purchase(session, pos, qty)           │
//! │       │                               │                                 │
//! │       ▼                               ▼                                 │
//! │  apply_random_discounts()        complete_session() ──► SalesLedger    │
//! │                                                                         │
//! │  Shelf order = insertion order = display order (1-based positions)     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::Serialize;
use tracing::{debug, info};

use crate::error::{CoreError, CoreResult};
use crate::ledger::{SalesLedger, Transaction};
use crate::money::Money;
use crate::session::{ReceiptLine, Session};
use crate::types::{DiscountRate, Product};
use crate::validation::{validate_discount_percentage, validate_machine_name};

/// A discount drawn by [`VendingMachine::apply_random_discounts`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppliedDiscount {
    pub name: String,
    pub discount: DiscountRate,
    /// Effective price after the discount.
    pub new_price: Money,
}

/// A vending machine.
#[derive(Debug, Clone, Serialize)]
pub struct VendingMachine {
    name: String,
    products: Vec<Product>,
    ledger: SalesLedger,
}

impl VendingMachine {
    /// Creates an empty machine.
    pub fn new(name: impl Into<String>) -> CoreResult<Self> {
        let name = name.into();
        validate_machine_name(&name)?;

        Ok(VendingMachine {
            name: name.trim().to_string(),
            products: Vec::new(),
            ledger: SalesLedger::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Products in shelf order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn ledger(&self) -> &SalesLedger {
        &self.ledger
    }

    /// Appends a product to the end of the shelf and returns it.
    pub fn add_product(&mut self, product: Product) -> &Product {
        info!(
            machine = %self.name,
            product = %product.name(),
            stock = product.stock(),
            price = %product.price(),
            "Product added"
        );
        self.products.push(product);
        &self.products[self.products.len() - 1]
    }

    /// Looks up a product by its 1-based shelf position.
    pub fn product(&self, position: usize) -> CoreResult<&Product> {
        let index = self.index_of(position)?;
        Ok(&self.products[index])
    }

    /// Sets the discount of the product at 1-based `position`.
    pub fn apply_discount(&mut self, position: usize, rate: DiscountRate) -> CoreResult<&Product> {
        let index = self.index_of(position)?;
        self.products[index].apply_discount(rate)?;
        Ok(&self.products[index])
    }

    /// Gives every product an independently drawn discount of 0 to
    /// `max_pct` whole percent (inclusive).
    ///
    /// `max_pct` above 100 is rejected before any product is touched.
    ///
    /// ## Example
    /// ```rust
    /// use rand::{rngs::StdRng, SeedableRng};
    /// use vend_core::{Money, Product, ProductKind, VendingMachine};
    ///
    /// let mut machine = VendingMachine::new("Snack Machine").unwrap();
    /// machine.add_product(Product::new("Chips", Money::from_cents(150), 10, ProductKind::Standard).unwrap());
    ///
    /// let mut rng = StdRng::seed_from_u64(7);
    /// let applied = machine.apply_random_discounts(&mut rng, 20).unwrap();
    /// assert!(applied[0].discount.bps() <= 2000);
    /// ```
    pub fn apply_random_discounts<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        max_pct: u32,
    ) -> CoreResult<Vec<AppliedDiscount>> {
        validate_discount_percentage(max_pct)?;

        let mut applied = Vec::with_capacity(self.products.len());
        for product in self.products.iter_mut() {
            let rate = DiscountRate::from_percentage(rng.gen_range(0..=max_pct))?;
            product.apply_discount(rate)?;
            applied.push(AppliedDiscount {
                name: product.name().to_string(),
                discount: rate,
                new_price: product.effective_price(),
            });
        }

        info!(
            machine = %self.name,
            products = applied.len(),
            max_pct,
            "Random discounts applied"
        );
        Ok(applied)
    }

    /// Buys `quantity` units of the product at 1-based `position` and adds
    /// the resulting line to `session`.
    ///
    /// ## Failure Modes
    /// - position outside the shelf → [`CoreError::SelectionOutOfRange`]
    /// - expired limited-time product → [`CoreError::ProductUnavailable`]
    /// - bad quantity / not enough stock → see [`Product::check_purchase`]
    /// - line, session or ledger total past the `Money` range →
    ///   [`CoreError::AmountTooLarge`]
    ///
    /// Every check runs before anything changes, so nothing changes on
    /// failure.
    pub fn purchase(
        &mut self,
        session: &mut Session,
        position: usize,
        quantity: i64,
        now: DateTime<Utc>,
    ) -> CoreResult<ReceiptLine> {
        let index = self.index_of(position)?;
        let product = &self.products[index];

        if !product.is_available(now) {
            return Err(CoreError::ProductUnavailable {
                name: product.name().to_string(),
            });
        }
        product.check_purchase(quantity)?;

        let line = ReceiptLine::from_product(product, quantity)?;
        let fits = session
            .total_with(&line)
            .and_then(|total| self.ledger.total_sales().checked_add(total))
            .is_some();
        if !fits {
            return Err(CoreError::AmountTooLarge {
                name: line.name,
                quantity,
            });
        }

        session.add_line(line.clone())?;
        let product = &mut self.products[index];
        product.purchase(quantity)?;

        debug!(
            product = %line.name,
            quantity,
            line_total = %line.line_total(),
            remaining = product.stock(),
            "Purchase completed"
        );
        Ok(line)
    }

    /// Closes a customer's session.
    ///
    /// Sessions with at least one purchase become a [`Transaction`] and bump
    /// the ledger totals; empty sessions are dropped and yield `Ok(None)`.
    pub fn complete_session(
        &mut self,
        session: Session,
        now: DateTime<Utc>,
    ) -> CoreResult<Option<&Transaction>> {
        let Some(transaction) = self.ledger.record(session, now)? else {
            return Ok(None);
        };
        info!(
            machine = %self.name,
            transaction_id = %transaction.id,
            total = %transaction.total(),
            "Session recorded"
        );
        Ok(Some(transaction))
    }

    fn index_of(&self, position: usize) -> CoreResult<usize> {
        if position == 0 || position > self.products.len() {
            return Err(CoreError::SelectionOutOfRange {
                position,
                count: self.products.len(),
            });
        }
        Ok(position - 1)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
