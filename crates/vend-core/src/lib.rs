//! # vend-core: Pure Business Logic for the Vending Machine
//!
//! This crate contains all vending machine bookkeeping as pure functions with
//! zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Vending Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Console (apps/vending)                       │   │
//! │  │    Display ──► Select ──► Quantity ──► Receipt ──► Summary      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ vend-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  session  │  │  machine  │  │   │
//! │  │   │  Product  │  │   Money   │  │  Receipt  │  │  Vending  │  │   │
//! │  │   │ Discount  │  │  ops      │  │  ledger   │  │  Machine  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO CONSOLE • NO GLOBAL STATE                        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, ProductKind, DiscountRate)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`session`] - One customer's purchases (receipt lines)
//! - [`ledger`] - Running sales totals across sessions
//! - [`machine`] - The vending machine itself
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Example Usage
//!
//! ```rust
//! use vend_core::{Money, Product, ProductKind, Session, VendingMachine};
//! use chrono::Utc;
//!
//! let mut machine = VendingMachine::new("Snack Machine").unwrap();
//! machine.add_product(Product::new("Chips", Money::from_cents(150), 10, ProductKind::Standard).unwrap());
//! machine.add_product(Product::new("Candy", Money::from_cents(100), 15, ProductKind::Standard).unwrap());
//!
//! let now = Utc::now();
//! let mut session = Session::new(now);
//! machine.purchase(&mut session, 1, 3, now).unwrap();
//!
//! assert_eq!(session.total().cents(), 450);
//! assert_eq!(machine.products()[0].stock(), 7);
//!
//! let transaction = machine.complete_session(session, now).unwrap().unwrap();
//! assert_eq!(transaction.total().cents(), 450);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod ledger;
pub mod machine;
pub mod money;
pub mod session;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use ledger::{SalesLedger, Transaction};
pub use machine::{AppliedDiscount, VendingMachine};
pub use money::Money;
pub use session::{ReceiptLine, Session};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Name used when no machine name is configured.
pub const DEFAULT_MACHINE_NAME: &str = "Snack Machine";

/// Upper bound (whole percent) for discounts drawn by
/// [`VendingMachine::apply_random_discounts`] when nothing else is configured.
pub const DEFAULT_MAX_RANDOM_DISCOUNT_PCT: u32 = 20;

/// Basis points in 100%.
pub const MAX_DISCOUNT_BPS: u32 = 10_000;
