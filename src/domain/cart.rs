use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::pricing::{PricedLine, Totals};
use crate::domain::product::Product;

/// Smallest quantity a cart line may hold.
pub const MIN_CART_QUANTITY: i32 = 1;

/// Largest quantity accepted from the cart forms.
pub const MAX_CART_QUANTITY: i32 = 100;

/// A product placed in a user's cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartItem {
    pub id: i32,
    pub user_id: i32,
    pub product_id: i32,
    /// Always at least [`MIN_CART_QUANTITY`].
    pub quantity: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Cart item joined with the product it refers to.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub item: CartItem,
    pub product: Product,
}

impl CartLine {
    pub fn priced(&self) -> PricedLine {
        self.product.priced_line(self.item.quantity)
    }

    /// Quantity multiplied by the discounted unit price.
    pub fn line_total(&self) -> i64 {
        self.priced().line_total()
    }
}

/// Totals for a set of cart lines.
pub fn cart_totals(lines: &[CartLine]) -> Totals {
    Totals::from_lines(lines.iter().map(CartLine::priced))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use serde_json::Map;

    use super::*;

    fn datetime() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .unwrap_or_default()
    }

    fn line(id: i32, price: i64, discount: i32, quantity: i32) -> CartLine {
        CartLine {
            item: CartItem {
                id,
                user_id: 1,
                product_id: id,
                quantity,
                created_at: datetime(),
                updated_at: datetime(),
            },
            product: Product {
                id,
                hub_id: 1,
                category_id: 1,
                name: format!("Product {id}"),
                price,
                discount,
                quantity: 10,
                shipping_cost: 0,
                short_description: None,
                description: None,
                specifications: Map::new(),
                created_at: datetime(),
                updated_at: datetime(),
            },
        }
    }

    #[test]
    fn cart_subtotal_matches_discounted_lines() {
        let lines = vec![line(1, 500, 0, 2), line(2, 300, 50, 1)];

        let totals = cart_totals(&lines);

        assert_eq!(lines[1].line_total(), 150);
        assert_eq!(totals.subtotal, 1150);
        assert_eq!(totals.total_count, 3);
    }
}
