//! # Sales Ledger
//!
//! Running sales totals for a machine.
//!
//! The ledger is owned by the [`VendingMachine`](crate::VendingMachine) and
//! only grows through `complete_session`, so totals can't drift from the
//! recorded transactions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::session::{ReceiptLine, Session};

/// A completed session with at least one purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier (UUID v4).
    pub id: String,
    pub lines: Vec<ReceiptLine>,
    pub total_cents: i64,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
}

impl Transaction {
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

/// Accumulated sales across sessions.
///
/// Serialize-only: the totals must match the recorded transactions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SalesLedger {
    total_sales_cents: i64,
    total_transactions: i64,
    transactions: Vec<Transaction>,
}

impl SalesLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_sales(&self) -> Money {
        Money::from_cents(self.total_sales_cents)
    }

    pub fn total_transactions(&self) -> i64 {
        self.total_transactions
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Records `session` as a transaction.
    ///
    /// Returns `Ok(None)` and leaves the totals alone when the session has no
    /// purchases. Fails with [`CoreError::SalesTotalOverflow`], again leaving
    /// the ledger untouched, if the sales total would overflow.
    pub fn record(
        &mut self,
        session: Session,
        completed_at: DateTime<Utc>,
    ) -> CoreResult<Option<&Transaction>> {
        if session.is_empty() {
            return Ok(None);
        }

        let total = session.total();
        let total_sales = self
            .total_sales()
            .checked_add(total)
            .ok_or(CoreError::SalesTotalOverflow)?;
        let started_at = session.started_at();
        let transaction = Transaction {
            id: Uuid::new_v4().to_string(),
            lines: session.into_lines(),
            total_cents: total.cents(),
            started_at,
            completed_at,
        };

        self.total_sales_cents = total_sales.cents();
        self.total_transactions += 1;
        self.transactions.push(transaction);
        Ok(self.transactions.last())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Product, ProductKind};

    fn session_with(cents: i64, quantity: i64) -> Session {
        let product =
            Product::new("Chips", Money::from_cents(cents), 10, ProductKind::Standard).unwrap();
        let mut session = Session::new(Utc::now());
        session
            .add_line(ReceiptLine::from_product(&product, quantity).unwrap())
            .unwrap();
        session
    }

    #[test]
    fn test_empty_session_not_recorded() {
        let mut ledger = SalesLedger::new();
        assert_eq!(ledger.record(Session::new(Utc::now()), Utc::now()), Ok(None));
        assert!(ledger.total_sales().is_zero());
        assert_eq!(ledger.total_transactions(), 0);
        assert!(ledger.transactions().is_empty());
    }

    #[test]
    fn test_record_accumulates() {
        let mut ledger = SalesLedger::new();

        let first = ledger.record(session_with(150, 3), Utc::now()).unwrap().unwrap();
        assert_eq!(first.total(), Money::from_cents(450));
        assert!(uuid::Uuid::parse_str(&first.id).is_ok());

        ledger.record(session_with(150, 1), Utc::now()).unwrap();

        assert_eq!(ledger.total_sales(), Money::from_cents(600));
        assert_eq!(ledger.total_transactions(), 2);
        assert_ne!(ledger.transactions()[0].id, ledger.transactions()[1].id);
    }

    #[test]
    fn test_record_overflow_leaves_ledger_unchanged() {
        let big = i64::MAX / 2 + 1;
        let mut ledger = SalesLedger::new();
        ledger.record(session_with(big, 1), Utc::now()).unwrap();

        assert_eq!(
            ledger.record(session_with(big, 1), Utc::now()),
            Err(CoreError::SalesTotalOverflow)
        );
        assert_eq!(ledger.total_sales(), Money::from_cents(big));
        assert_eq!(ledger.total_transactions(), 1);
        assert_eq!(ledger.transactions().len(), 1);
    }

    #[test]
    fn test_ledger_serializes() {
        let mut ledger = SalesLedger::new();
        ledger.record(session_with(150, 2), Utc::now()).unwrap();

        let json = serde_json::to_value(&ledger).unwrap();
        assert_eq!(json["total_sales_cents"], 300);
        assert_eq!(json["total_transactions"], 1);
        assert_eq!(json["transactions"][0]["lines"][0]["name"], "Chips");
    }
}
