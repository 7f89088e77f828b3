//! # Starting Catalog
//!
//! Products loaded into the machine at startup.
//!
//! | Product        | Price | Stock | Kind                     |
//! |----------------|-------|-------|--------------------------|
//! | Chips          | $1.50 | 10    | standard                 |
//! | Candy          | $1.00 | 15    | standard                 |
//! | Soda           | $1.25 | 20    | beverage, 355 ml         |
//! | Water          | $1.00 | 12    | beverage, 500 ml         |
//! | Pumpkin Cookie | $2.00 | 5     | limited time, one week   |

use chrono::{DateTime, Duration, Utc};
use vend_core::{CoreResult, Money, Product, ProductKind};

/// How long the limited-time item stays on sale after startup.
const LIMITED_TIME_DAYS: i64 = 7;

/// (name, price in cents, stock, volume in ml for beverages)
const REGULAR_STOCK: &[(&str, i64, i64, Option<u32>)] = &[
    ("Chips", 150, 10, None),
    ("Candy", 100, 15, None),
    ("Soda", 125, 20, Some(355)),
    ("Water", 100, 12, Some(500)),
];

/// Builds the starting catalog, in shelf order.
pub fn default_catalog(now: DateTime<Utc>) -> CoreResult<Vec<Product>> {
    let mut products = REGULAR_STOCK
        .iter()
        .map(|&(name, price_cents, stock, volume_ml)| {
            let kind = match volume_ml {
                Some(volume_ml) => ProductKind::Beverage { volume_ml },
                None => ProductKind::Standard,
            };
            Product::new(name, Money::from_cents(price_cents), stock, kind)
        })
        .collect::<CoreResult<Vec<_>>>()?;

    products.push(Product::new(
        "Pumpkin Cookie",
        Money::from_cents(200),
        5,
        ProductKind::LimitedTime {
            available_until: now + Duration::days(LIMITED_TIME_DAYS),
        },
    )?);

    Ok(products)
}
