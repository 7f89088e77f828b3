//! # Error Types
//!
//! Domain-specific error types for vend-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  vend-core errors (this file)                                          │
//! │  ├── CoreError        - Purchase and selection failures                │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  Console app errors (apps/vending)                                     │
//! │  └── AppError         - Config and I/O failures                        │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → console message / AppError        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every `CoreError` variant doubles as the message the console shows the
//! customer before re-prompting.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Selection does not match any product slot.
    ///
    /// Positions are 1-based, as shown to the customer.
    #[error("Invalid selection {position}: choose a product between 1 and {count}")]
    SelectionOutOfRange { position: usize, count: usize },

    /// Not enough stock to complete the purchase.
    ///
    /// ## User Workflow
    /// ```text
    /// Select Chips, quantity 12
    ///      │
    ///      ▼
    /// Check stock: available=10
    ///      │
    ///      ▼
    /// InsufficientStock { name: "Chips", available: 10, requested: 12 }
    ///      │
    ///      ▼
    /// Console shows the message and asks again
    /// ```
    #[error("Not enough stock for {name}: available {available}, requested {requested}")]
    InsufficientStock {
        name: String,
        available: i64,
        requested: i64,
    },

    /// Quantity is zero or negative.
    #[error("Quantity must be at least 1 (got {requested})")]
    InvalidQuantity { requested: i64 },

    /// Limited-time product whose sale window has closed.
    #[error("{name} is no longer available")]
    ProductUnavailable { name: String },

    /// The purchase would push a receipt, session or ledger total past the
    /// largest amount `Money` can hold.
    #[error("Purchase of {quantity} x {name} is too large to process")]
    AmountTooLarge { name: String, quantity: i64 },

    /// Recording the session would overflow the ledger's sales total.
    #[error("Sales total is too large to record")]
    SalesTotalOverflow,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when input doesn't meet requirements.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
