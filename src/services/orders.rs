use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::routes::check_role;
use serde::Serialize;

use crate::SERVICE_MANAGER_ROLE;
use crate::domain::address::Address;
use crate::domain::order::{NewOrder, Order, OrderListQuery, OrderStatus};
use crate::domain::pricing::Totals;
use crate::forms::checkout::{ChangeOrderStatusForm, PlaceOrderForm};
use crate::repository::{
    AddressReader, CartReader, OrderReader, OrderWriter, UserReader, UserWriter,
};
use crate::services::cart::CartData;
use crate::services::users::ensure_user;
use crate::services::{ServiceError, ServiceResult};

/// Order with its derived totals.
#[derive(Debug, Clone, Serialize)]
pub struct OrderView {
    pub order: Order,
    pub totals: Totals,
    pub subtotal_formatted: String,
    pub grand_total_formatted: String,
}

impl From<Order> for OrderView {
    fn from(order: Order) -> Self {
        let totals = order.totals();
        Self {
            subtotal_formatted: totals.subtotal_formatted(),
            grand_total_formatted: totals.grand_total_formatted(),
            totals,
            order,
        }
    }
}

/// Data required to render the checkout page.
pub struct CheckoutData {
    pub cart: CartData,
    pub addresses: Vec<Address>,
}

pub fn load_checkout<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<CheckoutData>
where
    R: CartReader + AddressReader + UserReader + UserWriter + ?Sized,
{
    let owner = ensure_user(repo, user)?;
    let lines = repo.list_cart_lines(owner.id)?;
    let addresses = repo.list_addresses(owner.id)?;

    Ok(CheckoutData {
        cart: CartData::from_lines(&lines),
        addresses,
    })
}

/// Turns the user's cart into an order and empties the cart.
pub fn place_order<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: PlaceOrderForm,
) -> ServiceResult<Order>
where
    R: CartReader + AddressReader + OrderWriter + UserReader + UserWriter + ?Sized,
{
    let payload = form
        .into_payload()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let owner = ensure_user(repo, user)?;

    if let Some(address_id) = payload.address_id {
        if repo.get_address(address_id, owner.id)?.is_none() {
            return Err(ServiceError::NotFound);
        }
    }

    if repo.list_cart_lines(owner.id)?.is_empty() {
        return Err(ServiceError::Form("Корзина пуста.".to_string()));
    }

    let new_order = NewOrder {
        hub_id: user.hub_id,
        user_id: owner.id,
        address_id: payload.address_id,
        payment_method: payload.payment_method,
    };

    let order = repo.create_order_from_cart(&new_order)?;
    log::info!(
        "Order {} placed by user {} with {} items",
        order.id,
        owner.id,
        order.items.len()
    );

    Ok(order)
}

/// Orders placed by the current user, newest first.
pub fn load_orders<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<Vec<OrderView>>
where
    R: OrderReader + UserReader + UserWriter + ?Sized,
{
    let owner = ensure_user(repo, user)?;

    let orders = repo.list_orders(OrderListQuery::new(user.hub_id).user_id(owner.id))?;

    Ok(orders.into_iter().map(OrderView::from).collect())
}

/// Every order of the hub, optionally narrowed to one status.
pub fn load_hub_orders<R>(
    repo: &R,
    user: &AuthenticatedUser,
    status: Option<OrderStatus>,
) -> ServiceResult<Vec<OrderView>>
where
    R: OrderReader + ?Sized,
{
    if !check_role(SERVICE_MANAGER_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let mut query = OrderListQuery::new(user.hub_id);
    if let Some(status) = status {
        query = query.status(status);
    }

    Ok(repo
        .list_orders(query)?
        .into_iter()
        .map(OrderView::from)
        .collect())
}

/// Loads one order. Shoppers only see their own orders.
pub fn load_order<R>(repo: &R, user: &AuthenticatedUser, order_id: i32) -> ServiceResult<OrderView>
where
    R: OrderReader + UserReader + UserWriter + ?Sized,
{
    let order = repo
        .get_order_by_id(order_id, user.hub_id)?
        .ok_or(ServiceError::NotFound)?;

    if !check_role(SERVICE_MANAGER_ROLE, &user.roles) {
        let owner = ensure_user(repo, user)?;
        if order.user_id != owner.id {
            return Err(ServiceError::NotFound);
        }
    }

    Ok(OrderView::from(order))
}

pub fn change_order_status<R>(
    repo: &R,
    user: &AuthenticatedUser,
    order_id: i32,
    form: ChangeOrderStatusForm,
) -> ServiceResult<Order>
where
    R: OrderWriter + ?Sized,
{
    if !check_role(SERVICE_MANAGER_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let status = form
        .into_status()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    repo.update_order_status(order_id, user.hub_id, status)
        .map_err(ServiceError::from)
}
