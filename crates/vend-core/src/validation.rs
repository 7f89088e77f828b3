//! # Validation Module
//!
//! Input validation utilities for the vending machine.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Console (apps/vending)                                       │
//! │  ├── Parse typed input (numbers, y/n)                                  │
//! │  └── Re-prompt on garbage                                              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  └── Business rule validation (names, prices, stock, discounts)        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Product / VendingMachine                                     │
//! │  └── Stock and availability checks at purchase time                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use vend_core::validation::{validate_product_name, validate_quantity};
//!
//! assert!(validate_product_name("Chips").is_ok());
//! assert!(validate_quantity(0).is_err());
//! ```

use crate::error::ValidationError;
use crate::MAX_DISCOUNT_BPS;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Maximum length of a product name.
pub const MAX_PRODUCT_NAME_LEN: usize = 200;

/// Maximum length of a machine name.
pub const MAX_MACHINE_NAME_LEN: usize = 100;

// =============================================================================
// String Validators
// =============================================================================

fn validate_name(field: &str, name: &str, max: usize) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if name.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(())
}

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - At most 200 characters
///
/// ## Example
/// ```rust
/// use vend_core::validation::validate_product_name;
///
/// assert!(validate_product_name("Potato Chips").is_ok());
/// assert!(validate_product_name("   ").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    validate_name("name", name, MAX_PRODUCT_NAME_LEN)
}

/// Validates a machine name. Same rules as product names, 100 characters max.
pub fn validate_machine_name(name: &str) -> ValidationResult<()> {
    validate_name("machine name", name, MAX_MACHINE_NAME_LEN)
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a purchase quantity.
///
/// ## Rules
/// - Must be positive (> 0)
///
/// The upper bound is the product's stock, which is checked at purchase time.
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates a stock level. Zero is allowed (sold out).
pub fn validate_stock(stock: i64) -> ValidationResult<()> {
    if stock < 0 {
        return Err(ValidationError::OutOfRange {
            field: "stock".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a price in cents.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free items)
///
/// ## Example
/// ```rust
/// use vend_core::validation::validate_price_cents;
///
/// assert!(validate_price_cents(150).is_ok());
/// assert!(validate_price_cents(0).is_ok());
/// assert!(validate_price_cents(-100).is_err());
/// ```
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a discount in basis points.
///
/// ## Rules
/// - Must be between 0 and 10000 (0% to 100%)
pub fn validate_discount_bps(bps: u32) -> ValidationResult<()> {
    if bps > MAX_DISCOUNT_BPS {
        return Err(ValidationError::OutOfRange {
            field: "discount".to_string(),
            min: 0,
            max: MAX_DISCOUNT_BPS as i64,
        });
    }

    Ok(())
}

/// Validates a discount given as a whole percentage (0-100).
pub fn validate_discount_percentage(pct: u32) -> ValidationResult<()> {
    if pct > 100 {
        return Err(ValidationError::OutOfRange {
            field: "discount".to_string(),
            min: 0,
            max: 100,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("Potato Chips").is_ok());
        assert!(validate_product_name("").is_err());
        assert!(validate_product_name("   ").is_err());
        assert!(validate_product_name(&"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_machine_name() {
        assert!(validate_machine_name("Snack Machine").is_ok());
        assert_eq!(
            validate_machine_name(""),
            Err(ValidationError::Required {
                field: "machine name".to_string()
            })
        );
        assert!(validate_machine_name(&"M".repeat(101)).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(1000).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
    }

    #[test]
    fn test_validate_stock() {
        assert!(validate_stock(0).is_ok());
        assert!(validate_stock(15).is_ok());
        assert!(validate_stock(-1).is_err());
    }

    #[test]
    fn test_validate_price_cents() {
        assert!(validate_price_cents(0).is_ok());
        assert!(validate_price_cents(150).is_ok());
        assert!(validate_price_cents(-100).is_err());
    }

    #[test]
    fn test_validate_discount() {
        assert!(validate_discount_bps(0).is_ok());
        assert!(validate_discount_bps(2000).is_ok());
        assert!(validate_discount_bps(10_000).is_ok());
        assert!(validate_discount_bps(10_001).is_err());

        assert!(validate_discount_percentage(20).is_ok());
        assert!(validate_discount_percentage(100).is_ok());
        assert!(validate_discount_percentage(101).is_err());
    }
}
