use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::cart::CartLine as DomainCartLine;
use crate::domain::order::{
    NewOrder as DomainNewOrder, Order as DomainOrder, OrderItem as DomainOrderItem,
    OrderStatus, PaymentMethod,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::orders)]
pub struct Order {
    pub id: i32,
    pub hub_id: i32,
    pub user_id: i32,
    pub address_id: Option<i32>,
    pub status: String,
    pub payment_method: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(table_name = crate::schema::order_items)]
#[diesel(belongs_to(Order, foreign_key = order_id))]
pub struct OrderItem {
    pub id: i32,
    pub order_id: i32,
    pub product_id: Option<i32>,
    pub name: String,
    pub price: i64,
    pub discount: i32,
    pub shipping_cost: i64,
    pub quantity: i32,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::orders)]
pub struct NewOrder<'a> {
    pub hub_id: i32,
    pub user_id: i32,
    pub address_id: Option<i32>,
    pub status: &'a str,
    pub payment_method: &'a str,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::order_items)]
pub struct NewOrderItem<'a> {
    pub order_id: i32,
    pub product_id: Option<i32>,
    pub name: &'a str,
    pub price: i64,
    pub discount: i32,
    pub shipping_cost: i64,
    pub quantity: i32,
}

impl Order {
    pub fn into_domain(self, items: Vec<OrderItem>) -> DomainOrder {
        DomainOrder {
            id: self.id,
            hub_id: self.hub_id,
            user_id: self.user_id,
            address_id: self.address_id,
            status: OrderStatus::from(self.status.as_str()),
            payment_method: PaymentMethod::from(self.payment_method.as_str()),
            items: items.into_iter().map(OrderItem::into_domain).collect(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl OrderItem {
    pub fn into_domain(self) -> DomainOrderItem {
        DomainOrderItem {
            id: self.id,
            product_id: self.product_id,
            name: self.name,
            price: self.price,
            discount: self.discount,
            shipping_cost: self.shipping_cost,
            quantity: self.quantity,
        }
    }
}

impl From<(Order, Vec<OrderItem>)> for DomainOrder {
    fn from(value: (Order, Vec<OrderItem>)) -> Self {
        value.0.into_domain(value.1)
    }
}

impl<'a> From<&'a DomainNewOrder> for NewOrder<'a> {
    fn from(value: &'a DomainNewOrder) -> Self {
        Self {
            hub_id: value.hub_id,
            user_id: value.user_id,
            address_id: value.address_id,
            status: OrderStatus::default().as_str(),
            payment_method: value.payment_method.as_str(),
        }
    }
}

impl<'a> NewOrderItem<'a> {
    /// Snapshot a cart line into an order item row.
    pub fn from_cart_line(order_id: i32, line: &'a DomainCartLine) -> Self {
        Self {
            order_id,
            product_id: Some(line.product.id),
            name: line.product.name.as_str(),
            price: line.product.price,
            discount: line.product.discount,
            shipping_cost: line.product.shipping_cost,
            quantity: line.item.quantity,
        }
    }
}
