//! Price arithmetic shared by the catalog, cart, checkout and order history.
//!
//! All amounts are integers in minor currency units. The per-unit discount is
//! truncated (amounts are never negative, so this is a floor) and every total
//! in the service is derived from [`current_price`], which keeps the cart page,
//! the quantity update endpoint and placed orders in agreement.

use serde::Serialize;

/// Largest discount a product may carry, in percent.
pub const MAX_DISCOUNT_PERCENT: i32 = 100;

/// Largest price or shipping cost accepted for a product, in minor units.
///
/// Keeps `price * discount` and line totals of up to 100 units inside `i64`.
pub const MAX_PRODUCT_AMOUNT: i64 = 1_000_000_000_000;

/// Unit price after applying `discount` percent to `price`.
pub fn current_price(price: i64, discount: i32) -> i64 {
    price - price * i64::from(discount) / 100
}

/// Format an amount in minor units as `major.minor`.
pub fn format_minor_units(amount: i64) -> String {
    let sign = if amount < 0 { "-" } else { "" };
    let abs = amount.unsigned_abs();
    format!("{sign}{}.{:02}", abs / 100, abs % 100)
}

/// Pricing inputs of one cart or order line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricedLine {
    pub price: i64,
    pub discount: i32,
    pub shipping_cost: i64,
    pub quantity: i32,
}

impl PricedLine {
    pub fn new(price: i64, discount: i32, shipping_cost: i64, quantity: i32) -> Self {
        Self {
            price,
            discount,
            shipping_cost,
            quantity,
        }
    }

    /// Discounted price of a single unit.
    pub fn unit_price(&self) -> i64 {
        current_price(self.price, self.discount)
    }

    /// Quantity multiplied by the discounted unit price.
    pub fn line_total(&self) -> i64 {
        i64::from(self.quantity) * self.unit_price()
    }
}

/// Aggregated amounts for a set of lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Totals {
    /// Sum of line totals.
    pub subtotal: i64,
    /// Shipping charged once per line.
    pub shipping: i64,
    /// `subtotal + shipping`.
    pub grand_total: i64,
    /// Number of units across all lines.
    pub total_count: i64,
}

impl Totals {
    pub fn from_lines<I>(lines: I) -> Self
    where
        I: IntoIterator<Item = PricedLine>,
    {
        let mut totals = Totals::default();
        for line in lines {
            totals.subtotal += line.line_total();
            totals.shipping += line.shipping_cost;
            totals.total_count += i64::from(line.quantity);
        }
        totals.grand_total = totals.subtotal + totals.shipping;
        totals
    }

    pub fn subtotal_formatted(&self) -> String {
        format_minor_units(self.subtotal)
    }

    pub fn grand_total_formatted(&self) -> String {
        format_minor_units(self.grand_total)
    }
}
