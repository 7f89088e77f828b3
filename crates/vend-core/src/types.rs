//! # Domain Types
//!
//! Core domain types of the vending machine.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────────┐   ┌─────────────────┐   │
//! │  │    Product      │   │    ProductKind      │   │  DiscountRate   │   │
//! │  │  ─────────────  │   │  ─────────────────  │   │  ─────────────  │   │
//! │  │  name           │   │  Standard           │   │  bps (u32)      │   │
//! │  │  price_cents    │──►│  Beverage { ml }    │   │  1000 = 10%     │   │
//! │  │  discount_bps   │   │  LimitedTime {      │   └─────────────────┘   │
//! │  │  stock          │   │    available_until  │                         │
//! │  │  kind           │   │  }                  │                         │
//! │  └─────────────────┘   └─────────────────────┘                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Product variants share pricing and stock bookkeeping; the kind only adds
//! display details and, for limited-time products, a sale window.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::validation::{
    validate_discount_bps, validate_discount_percentage, validate_price_cents,
    validate_product_name, validate_quantity, validate_stock, ValidationResult,
};

// =============================================================================
// Discount Rate
// =============================================================================

/// Discount rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 1000 bps = 10%, 10000 bps = 100%
///
/// Integer bps keep discount math exact until the single rounding step in
/// [`Money::apply_percentage_discount`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DiscountRate(u32);

impl DiscountRate {
    /// Creates a discount rate from basis points without range checks.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        DiscountRate(bps)
    }

    /// Creates a discount rate from basis points, rejecting anything above 100%.
    pub fn new(bps: u32) -> ValidationResult<Self> {
        validate_discount_bps(bps)?;
        Ok(DiscountRate(bps))
    }

    /// Creates a discount rate from a whole percentage (0-100).
    ///
    /// ## Example
    /// ```rust
    /// use vend_core::types::DiscountRate;
    ///
    /// assert_eq!(DiscountRate::from_percentage(15).unwrap().bps(), 1500);
    /// assert!(DiscountRate::from_percentage(101).is_err());
    /// ```
    pub fn from_percentage(pct: u32) -> ValidationResult<Self> {
        validate_discount_percentage(pct)?;
        Ok(DiscountRate(pct * 100))
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Zero discount.
    #[inline]
    pub const fn zero() -> Self {
        DiscountRate(0)
    }

    /// Checks if the discount is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for DiscountRate {
    fn default() -> Self {
        DiscountRate::zero()
    }
}

/// `10%` for whole percentages, `12.50%` otherwise.
impl fmt::Display for DiscountRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 % 100 == 0 {
            write!(f, "{}%", self.0 / 100)
        } else {
            write!(f, "{}.{:02}%", self.0 / 100, self.0 % 100)
        }
    }
}

// =============================================================================
// Product Kind
// =============================================================================

/// The variant of a product.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProductKind {
    /// Plain product with no extra attributes.
    #[default]
    Standard,
    /// Drink, shown with its volume.
    Beverage { volume_ml: u32 },
    /// Sold only before `available_until`.
    LimitedTime { available_until: DateTime<Utc> },
}

// =============================================================================
// Product
// =============================================================================

/// A product loaded into the machine.
///
/// ## Invariants
/// - `stock` is never negative
/// - `discount_bps` is within 0..=10000
///
/// Fields are private so both invariants hold for the product's whole life;
/// stock only changes through [`Product::purchase`]. Serialize-only for the
/// same reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    name: String,
    price_cents: i64,
    discount_bps: u32,
    stock: i64,
    kind: ProductKind,
}

impl Product {
    /// Creates a product with no discount.
    ///
    /// ## Example
    /// ```rust
    /// use vend_core::{Money, Product, ProductKind};
    ///
    /// let chips = Product::new("Chips", Money::from_cents(150), 10, ProductKind::Standard).unwrap();
    /// assert_eq!(chips.effective_price().cents(), 150);
    ///
    /// assert!(Product::new("", Money::from_cents(150), 10, ProductKind::Standard).is_err());
    /// assert!(Product::new("Chips", Money::from_cents(150), -1, ProductKind::Standard).is_err());
    /// ```
    pub fn new(
        name: impl Into<String>,
        price: Money,
        stock: i64,
        kind: ProductKind,
    ) -> CoreResult<Self> {
        let name = name.into();
        validate_product_name(&name)?;
        validate_price_cents(price.cents())?;
        validate_stock(stock)?;

        Ok(Product {
            name: name.trim().to_string(),
            price_cents: price.cents(),
            discount_bps: 0,
            stock,
            kind,
        })
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the base (undiscounted) price.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    #[inline]
    pub fn discount(&self) -> DiscountRate {
        DiscountRate::from_bps(self.discount_bps)
    }

    #[inline]
    pub fn stock(&self) -> i64 {
        self.stock
    }

    #[inline]
    pub fn kind(&self) -> &ProductKind {
        &self.kind
    }

    #[inline]
    pub fn is_discounted(&self) -> bool {
        self.discount_bps > 0
    }

    #[inline]
    pub fn is_sold_out(&self) -> bool {
        self.stock == 0
    }

    /// Returns the unit price after discount.
    ///
    /// `price × (1 − discount/100)`, rounded half-up to the cent.
    pub fn effective_price(&self) -> Money {
        self.price().apply_percentage_discount(self.discount())
    }

    /// Sets the product's discount, replacing any previous one.
    ///
    /// Rates above 100% are rejected and leave the product unchanged.
    pub fn apply_discount(&mut self, rate: DiscountRate) -> CoreResult<()> {
        validate_discount_bps(rate.bps())?;
        self.discount_bps = rate.bps();
        debug!(
            product = %self.name,
            discount = %rate,
            price = %self.effective_price(),
            "Discount applied"
        );
        Ok(())
    }

    /// Checks whether the product may be sold at `now`.
    ///
    /// Only limited-time products can become unavailable.
    pub fn is_available(&self, now: DateTime<Utc>) -> bool {
        match self.kind {
            ProductKind::LimitedTime { available_until } => now < available_until,
            ProductKind::Standard | ProductKind::Beverage { .. } => true,
        }
    }

    /// Checks that `quantity` units could be sold right now.
    ///
    /// ## Rules
    /// - `quantity <= 0` → [`CoreError::InvalidQuantity`]
    /// - `quantity > stock` → [`CoreError::InsufficientStock`]
    pub fn check_purchase(&self, quantity: i64) -> CoreResult<()> {
        if validate_quantity(quantity).is_err() {
            return Err(CoreError::InvalidQuantity {
                requested: quantity,
            });
        }

        if quantity > self.stock {
            return Err(CoreError::InsufficientStock {
                name: self.name.clone(),
                available: self.stock,
                requested: quantity,
            });
        }

        Ok(())
    }

    /// Removes `quantity` units from stock, following the rules of
    /// [`Product::check_purchase`]. Stock is untouched on failure.
    pub fn purchase(&mut self, quantity: i64) -> CoreResult<()> {
        self.check_purchase(quantity)?;
        self.stock -= quantity;
        Ok(())
    }
}

/// One-line product summary, e.g.
/// `Chips - $1.35 (was $1.50, 10% off) | 10 in stock`.
impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        match &self.kind {
            ProductKind::Standard => {}
            ProductKind::Beverage { volume_ml } => write!(f, " ({} ml)", volume_ml)?,
            ProductKind::LimitedTime { available_until } => write!(
                f,
                " [limited time, until {}]",
                available_until.format("%Y-%m-%d %H:%M UTC")
            )?,
        }

        write!(f, " - {}", self.effective_price())?;
        if self.is_discounted() {
            write!(f, " (was {}, {} off)", self.price(), self.discount())?;
        }

        if self.is_sold_out() {
            write!(f, " | SOLD OUT")
        } else {
            write!(f, " | {} in stock", self.stock)
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn chips() -> Product {
        Product::new("Chips", Money::from_cents(150), 10, ProductKind::Standard).unwrap()
    }

    #[test]
    fn test_discount_rate_from_bps() {
        let rate = DiscountRate::from_bps(1250);
        assert_eq!(rate.bps(), 1250);
        assert!(!rate.is_zero());
    }

    #[test]
    fn test_discount_rate_bounds() {
        assert!(DiscountRate::new(10_000).is_ok());
        assert!(DiscountRate::new(10_001).is_err());
        assert!(DiscountRate::from_percentage(0).unwrap().is_zero());
        assert!(DiscountRate::from_percentage(150).is_err());
    }

    #[test]
    fn test_discount_rate_display() {
        assert_eq!(DiscountRate::from_bps(1000).to_string(), "10%");
        assert_eq!(DiscountRate::from_bps(1250).to_string(), "12.50%");
        assert_eq!(DiscountRate::zero().to_string(), "0%");
    }

    #[test]
    fn test_new_product_validates() {
        assert!(Product::new("Chips", Money::from_cents(-1), 1, ProductKind::Standard).is_err());
        assert!(Product::new("Chips", Money::zero(), 0, ProductKind::Standard).is_ok());

        let trimmed =
            Product::new("  Candy ", Money::from_cents(100), 1, ProductKind::Standard).unwrap();
        assert_eq!(trimmed.name(), "Candy");
    }

    #[test]
    fn test_effective_price() {
        let mut product = chips();
        assert_eq!(product.effective_price(), Money::from_cents(150));

        product.apply_discount(DiscountRate::from_bps(1000)).unwrap();
        assert_eq!(product.effective_price(), Money::from_cents(135));
        assert_eq!(product.price(), Money::from_cents(150));

        product.apply_discount(DiscountRate::from_bps(10_000)).unwrap();
        assert!(product.effective_price().is_zero());
    }

    #[test]
    fn test_apply_discount_replaces_previous() {
        let mut product = chips();
        product.apply_discount(DiscountRate::from_bps(2000)).unwrap();
        product.apply_discount(DiscountRate::from_bps(500)).unwrap();
        assert_eq!(product.discount().bps(), 500);
        assert_eq!(product.effective_price(), Money::from_cents(142));
    }

    #[test]
    fn test_apply_discount_out_of_range_rejected() {
        let mut product = chips();
        product.apply_discount(DiscountRate::from_bps(1000)).unwrap();

        let err = product
            .apply_discount(DiscountRate::from_bps(10_001))
            .unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
        assert_eq!(product.discount().bps(), 1000);
    }

    #[test]
    fn test_purchase_decrements_stock() {
        let mut product = chips();
        product.purchase(3).unwrap();
        assert_eq!(product.stock(), 7);

        product.purchase(7).unwrap();
        assert_eq!(product.stock(), 0);
        assert!(product.is_sold_out());
    }

    #[test]
    fn test_purchase_failures_leave_stock_unchanged() {
        let mut product = chips();

        assert_eq!(
            product.purchase(11),
            Err(CoreError::InsufficientStock {
                name: "Chips".to_string(),
                available: 10,
                requested: 11,
            })
        );
        assert_eq!(
            product.purchase(0),
            Err(CoreError::InvalidQuantity { requested: 0 })
        );
        assert_eq!(
            product.purchase(-2),
            Err(CoreError::InvalidQuantity { requested: -2 })
        );
        assert_eq!(product.stock(), 10);
    }

    #[test]
    fn test_check_purchase_leaves_stock_alone() {
        let product = chips();
        assert!(product.check_purchase(10).is_ok());
        assert!(product.check_purchase(11).is_err());
        assert_eq!(product.stock(), 10);
        assert_eq!(ProductKind::default(), ProductKind::Standard);
    }

    #[test]
    fn test_purchase_succeeds_iff_quantity_within_stock() {
        for stock in 0..6 {
            for qty in -2..8 {
                let mut product =
                    Product::new("Gum", Money::from_cents(50), stock, ProductKind::Standard)
                        .unwrap();
                let result = product.purchase(qty);
                if qty > 0 && qty <= stock {
                    assert!(result.is_ok());
                    assert_eq!(product.stock(), stock - qty);
                } else {
                    assert!(result.is_err());
                    assert_eq!(product.stock(), stock);
                }
            }
        }
    }

    #[test]
    fn test_limited_time_availability() {
        let until = Utc.with_ymd_and_hms(2026, 10, 31, 23, 0, 0).unwrap();
        let product = Product::new(
            "Pumpkin Cookie",
            Money::from_cents(200),
            5,
            ProductKind::LimitedTime {
                available_until: until,
            },
        )
        .unwrap();

        assert!(product.is_available(until - Duration::minutes(1)));
        assert!(!product.is_available(until));
        assert!(chips().is_available(until + Duration::days(365)));
    }

    #[test]
    fn test_display() {
        let mut product = chips();
        assert_eq!(product.to_string(), "Chips - $1.50 | 10 in stock");

        product.apply_discount(DiscountRate::from_bps(1000)).unwrap();
        assert_eq!(
            product.to_string(),
            "Chips - $1.35 (was $1.50, 10% off) | 10 in stock"
        );

        let soda = Product::new(
            "Soda",
            Money::from_cents(125),
            0,
            ProductKind::Beverage { volume_ml: 355 },
        )
        .unwrap();
        assert_eq!(soda.to_string(), "Soda (355 ml) - $1.25 | SOLD OUT");
    }

    #[test]
    fn test_product_kind_serialization() {
        let json = serde_json::to_string(&ProductKind::Beverage { volume_ml: 500 }).unwrap();
        assert_eq!(json, r#"{"kind":"beverage","volume_ml":500}"#);
        assert_eq!(ProductKind::default(), ProductKind::Standard);
    }
}
