use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::pricing::{PricedLine, Totals};

/// Possible lifecycle states for a placed order.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Order has been placed and is being prepared.
    #[default]
    Processing,
    /// Order is paused, usually waiting on the customer.
    OnHold,
    /// Order awaits payment or pickup.
    Pending,
    /// Order has been fulfilled.
    Completed,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 4] = [
        OrderStatus::Processing,
        OrderStatus::OnHold,
        OrderStatus::Pending,
        OrderStatus::Completed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Processing => "processing",
            OrderStatus::OnHold => "on_hold",
            OrderStatus::Pending => "pending",
            OrderStatus::Completed => "completed",
        }
    }

    /// Parse a stored or submitted status value.
    pub fn parse(value: &str) -> Option<Self> {
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == value.trim())
    }
}

impl From<&str> for OrderStatus {
    /// Unknown values fall back to the default status.
    fn from(value: &str) -> Self {
        OrderStatus::parse(value).unwrap_or_default()
    }
}

impl From<OrderStatus> for &'static str {
    fn from(value: OrderStatus) -> Self {
        value.as_str()
    }
}

/// How the customer intends to pay. No payment details are stored.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    #[default]
    Cash,
    Card,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Card => "card",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "cash" => Some(PaymentMethod::Cash),
            "card" => Some(PaymentMethod::Card),
            _ => None,
        }
    }
}

impl From<&str> for PaymentMethod {
    fn from(value: &str) -> Self {
        PaymentMethod::parse(value).unwrap_or_default()
    }
}

/// Snapshot of a cart line taken when the order was placed.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct OrderItem {
    pub id: i32,
    /// Product the line was taken from; cleared if the product is deleted.
    pub product_id: Option<i32>,
    pub name: String,
    pub price: i64,
    pub discount: i32,
    pub shipping_cost: i64,
    pub quantity: i32,
}

impl OrderItem {
    pub fn priced(&self) -> PricedLine {
        PricedLine::new(self.price, self.discount, self.shipping_cost, self.quantity)
    }

    pub fn line_total(&self) -> i64 {
        self.priced().line_total()
    }
}

/// Domain representation of an order placed by a user of a hub.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Order {
    /// Unique identifier of the order.
    pub id: i32,
    /// Owning hub identifier.
    pub hub_id: i32,
    /// Local user that placed the order.
    pub user_id: i32,
    /// Delivery address, cleared if the address is deleted later.
    pub address_id: Option<i32>,
    /// Current lifecycle status of the order.
    pub status: OrderStatus,
    /// Payment method chosen at checkout.
    pub payment_method: PaymentMethod,
    /// Lines copied from the cart.
    pub items: Vec<OrderItem>,
    /// Timestamp for when the order record was created.
    pub created_at: NaiveDateTime,
    /// Timestamp for the last update to the order record.
    pub updated_at: NaiveDateTime,
}

impl Order {
    /// Totals derived from the order lines.
    pub fn totals(&self) -> Totals {
        Totals::from_lines(self.items.iter().map(OrderItem::priced))
    }
}

/// Request to turn a user's cart into an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub hub_id: i32,
    pub user_id: i32,
    pub address_id: Option<i32>,
    pub payment_method: PaymentMethod,
}

/// Query definition used to list orders for a hub.
#[derive(Debug, Clone)]
pub struct OrderListQuery {
    /// Owning hub identifier.
    pub hub_id: i32,
    /// Optional user filter.
    pub user_id: Option<i32>,
    /// Optional status filter.
    pub status: Option<OrderStatus>,
}

impl OrderListQuery {
    /// Construct a query that targets all orders belonging to `hub_id`.
    pub fn new(hub_id: i32) -> Self {
        Self {
            hub_id,
            user_id: None,
            status: None,
        }
    }

    /// Filter the results by the user who placed the order.
    pub fn user_id(mut self, user_id: i32) -> Self {
        self.user_id = Some(user_id);
        self
    }

    /// Filter the results by the provided status.
    pub fn status(mut self, status: OrderStatus) -> Self {
        self.status = Some(status);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_storage_value() {
        for status in OrderStatus::ALL {
            assert_eq!(OrderStatus::from(status.as_str()), status);
        }
        assert_eq!(OrderStatus::from("unknown"), OrderStatus::Processing);
    }

    #[test]
    fn payment_method_rejects_unknown_values() {
        assert_eq!(PaymentMethod::parse("card"), Some(PaymentMethod::Card));
        assert_eq!(PaymentMethod::parse("crypto"), None);
    }

    #[test]
    fn order_totals_come_from_items() {
        let item = |id, price, discount, shipping_cost, quantity| OrderItem {
            id,
            product_id: Some(id),
            name: format!("Item {id}"),
            price,
            discount,
            shipping_cost,
            quantity,
        };
        let order = Order {
            id: 1,
            hub_id: 1,
            user_id: 1,
            address_id: None,
            status: OrderStatus::Processing,
            payment_method: PaymentMethod::Cash,
            items: vec![item(1, 500, 0, 100, 2), item(2, 300, 50, 0, 1)],
            created_at: NaiveDateTime::default(),
            updated_at: NaiveDateTime::default(),
        };

        let totals = order.totals();

        assert_eq!(totals.subtotal, 1150);
        assert_eq!(totals.shipping, 100);
        assert_eq!(totals.grand_total, 1250);
    }
}
