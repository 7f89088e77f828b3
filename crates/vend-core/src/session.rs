//! # Purchase Session
//!
//! One customer's run of the purchase loop.
//!
//! ## Session Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Session Lifecycle                                    │
//! │                                                                         │
//! │  Session::new(now)                                                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  machine.purchase(&mut session, pos, qty) ──► ReceiptLine added        │
//! │       │         (repeat while the customer wants more)                  │
//! │       ▼                                                                 │
//! │  machine.complete_session(session)                                      │
//! │       ├── empty?     → nothing recorded                                 │
//! │       └── non-empty? → Transaction added to the SalesLedger             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{DiscountRate, Product};

/// A single successful purchase on a receipt.
///
/// Uses the snapshot pattern: name and prices are frozen at the moment of
/// sale so later discounts don't rewrite the receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptLine {
    /// Product name at time of sale.
    pub name: String,
    /// Base unit price in cents at time of sale.
    pub unit_price_cents: i64,
    /// Discount in effect at time of sale.
    pub discount_bps: u32,
    /// Discounted unit price in cents.
    pub effective_unit_price_cents: i64,
    pub quantity: i64,
    /// effective unit price × quantity
    pub line_total_cents: i64,
}

impl ReceiptLine {
    /// Freezes `product`'s current pricing for `quantity` units.
    ///
    /// Fails with [`CoreError::AmountTooLarge`] when the line total does not
    /// fit in [`Money`].
    pub fn from_product(product: &Product, quantity: i64) -> CoreResult<Self> {
        let effective = product.effective_price();
        let line_total =
            effective
                .checked_mul_quantity(quantity)
                .ok_or_else(|| CoreError::AmountTooLarge {
                    name: product.name().to_string(),
                    quantity,
                })?;

        Ok(ReceiptLine {
            name: product.name().to_string(),
            unit_price_cents: product.price().cents(),
            discount_bps: product.discount().bps(),
            effective_unit_price_cents: effective.cents(),
            quantity,
            line_total_cents: line_total.cents(),
        })
    }

    #[inline]
    pub fn effective_unit_price(&self) -> Money {
        Money::from_cents(self.effective_unit_price_cents)
    }

    #[inline]
    pub fn line_total(&self) -> Money {
        Money::from_cents(self.line_total_cents)
    }

    #[inline]
    pub fn discount(&self) -> DiscountRate {
        DiscountRate::from_bps(self.discount_bps)
    }
}

/// The purchases made by one customer, in order.
///
/// The running total always equals the sum of the lines.
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    lines: Vec<ReceiptLine>,
    total_cents: i64,
    started_at: DateTime<Utc>,
}

impl Session {
    pub fn new(started_at: DateTime<Utc>) -> Self {
        Session {
            lines: Vec::new(),
            total_cents: 0,
            started_at,
        }
    }

    /// Appends a line, rejecting it if the session total would overflow.
    pub fn add_line(&mut self, line: ReceiptLine) -> CoreResult<()> {
        let total = self
            .total_with(&line)
            .ok_or_else(|| CoreError::AmountTooLarge {
                name: line.name.clone(),
                quantity: line.quantity,
            })?;

        self.total_cents = total.cents();
        self.lines.push(line);
        Ok(())
    }

    /// What the total would be after adding `line`, or `None` on overflow.
    pub fn total_with(&self, line: &ReceiptLine) -> Option<Money> {
        self.total().checked_add(line.line_total())
    }

    pub fn lines(&self) -> &[ReceiptLine] {
        &self.lines
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Running total of every line so far.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub(crate) fn into_lines(self) -> Vec<ReceiptLine> {
        self.lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ProductKind;

    fn product(name: &str, cents: i64, stock: i64) -> Product {
        Product::new(name, Money::from_cents(cents), stock, ProductKind::Standard).unwrap()
    }

    #[test]
    fn test_receipt_line_snapshot() {
        let mut chips = product("Chips", 150, 10);
        chips.apply_discount(DiscountRate::from_bps(1000)).unwrap();

        let line = ReceiptLine::from_product(&chips, 3).unwrap();
        assert_eq!(line.unit_price_cents, 150);
        assert_eq!(line.effective_unit_price(), Money::from_cents(135));
        assert_eq!(line.line_total(), Money::from_cents(405));

        chips.apply_discount(DiscountRate::zero()).unwrap();
        assert_eq!(line.line_total(), Money::from_cents(405));
        assert_eq!(line.discount().bps(), 1000);
    }

    #[test]
    fn test_receipt_line_overflow_rejected() {
        let gold = product("Gold", i64::MAX / 2 + 1, 5);

        assert_eq!(
            ReceiptLine::from_product(&gold, 2),
            Err(CoreError::AmountTooLarge {
                name: "Gold".to_string(),
                quantity: 2,
            })
        );
        assert!(ReceiptLine::from_product(&gold, 1).is_ok());
    }

    #[test]
    fn test_session_totals() {
        let chips = product("Chips", 150, 10);
        let candy = product("Candy", 100, 15);

        let mut session = Session::new(Utc::now());
        assert!(session.is_empty());
        assert!(session.total().is_zero());

        session
            .add_line(ReceiptLine::from_product(&chips, 3).unwrap())
            .unwrap();
        session
            .add_line(ReceiptLine::from_product(&candy, 2).unwrap())
            .unwrap();

        assert_eq!(session.lines().len(), 2);
        assert_eq!(session.total(), Money::from_cents(650));
    }

    #[test]
    fn test_session_total_overflow_rejected() {
        let gold = product("Gold", i64::MAX / 2 + 1, 5);
        let line = ReceiptLine::from_product(&gold, 1).unwrap();

        let mut session = Session::new(Utc::now());
        session.add_line(line.clone()).unwrap();
        assert_eq!(session.total_with(&line), None);

        let err = session.add_line(line).unwrap_err();
        assert!(matches!(err, CoreError::AmountTooLarge { quantity: 1, .. }));
        assert_eq!(session.lines().len(), 1);
        assert_eq!(session.total(), Money::from_cents(i64::MAX / 2 + 1));
    }
}
