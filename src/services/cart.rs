use pushkind_common::domain::auth::AuthenticatedUser;
use serde::Serialize;

use crate::domain::cart::{CartItem, CartLine, MAX_CART_QUANTITY, cart_totals};
use crate::domain::pricing::{Totals, format_minor_units};
use crate::forms::cart::{AddToCartForm, UpdateQuantityForm};
use crate::repository::{CartReader, CartWriter, ProductReader, UserReader, UserWriter};
use crate::services::users::ensure_user;
use crate::services::{ServiceError, ServiceResult};

/// One cart line prepared for templates.
#[derive(Debug, Clone, Serialize)]
pub struct CartLineView {
    pub item_id: i32,
    pub product_id: i32,
    pub name: String,
    pub quantity: i32,
    pub unit_price: i64,
    pub unit_price_formatted: String,
    pub shipping_cost: i64,
    pub line_total: i64,
    pub line_total_formatted: String,
}

impl From<&CartLine> for CartLineView {
    fn from(line: &CartLine) -> Self {
        let priced = line.priced();
        Self {
            item_id: line.item.id,
            product_id: line.product.id,
            name: line.product.name.clone(),
            quantity: line.item.quantity,
            unit_price: priced.unit_price(),
            unit_price_formatted: format_minor_units(priced.unit_price()),
            shipping_cost: line.product.shipping_cost,
            line_total: priced.line_total(),
            line_total_formatted: format_minor_units(priced.line_total()),
        }
    }
}

/// Data required to render the cart page.
pub struct CartData {
    pub lines: Vec<CartLineView>,
    pub totals: Totals,
}

impl CartData {
    pub(crate) fn from_lines(lines: &[CartLine]) -> Self {
        Self {
            lines: lines.iter().map(CartLineView::from).collect(),
            totals: cart_totals(lines),
        }
    }
}

/// Response of the quantity update endpoint.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct QuantityUpdate {
    pub new_quantity: i32,
    /// Sum of discounted line totals, shipping excluded.
    pub total_sum: i64,
    pub total_count: i64,
}

/// Loads the user's cart with its totals.
pub fn load_cart<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<CartData>
where
    R: CartReader + UserReader + UserWriter + ?Sized,
{
    let owner = ensure_user(repo, user)?;
    let lines = repo.list_cart_lines(owner.id)?;

    Ok(CartData::from_lines(&lines))
}

/// Puts a product into the cart or raises the quantity of its line.
pub fn add_to_cart<R>(
    repo: &R,
    user: &AuthenticatedUser,
    product_id: i32,
    form: AddToCartForm,
) -> ServiceResult<CartItem>
where
    R: CartReader + CartWriter + ProductReader + UserReader + UserWriter + ?Sized,
{
    let quantity = form
        .into_quantity()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    if repo.get_product_by_id(product_id, user.hub_id)?.is_none() {
        return Err(ServiceError::NotFound);
    }

    let owner = ensure_user(repo, user)?;

    let in_cart = repo
        .list_cart_lines(owner.id)?
        .iter()
        .find(|line| line.product.id == product_id)
        .map_or(0, |line| line.item.quantity);

    if in_cart + quantity > MAX_CART_QUANTITY {
        return Err(ServiceError::Form(format!(
            "В корзине может быть не больше {MAX_CART_QUANTITY} единиц товара."
        )));
    }

    repo.add_to_cart(owner.id, product_id, quantity)
        .map_err(ServiceError::from)
}

/// Sets the quantity of a cart line and reports the refreshed cart totals.
pub fn update_cart_quantity<R>(
    repo: &R,
    user: &AuthenticatedUser,
    item_id: i32,
    form: UpdateQuantityForm,
) -> ServiceResult<QuantityUpdate>
where
    R: CartReader + CartWriter + UserReader + UserWriter + ?Sized,
{
    let quantity = form
        .into_quantity()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let owner = ensure_user(repo, user)?;

    if repo.get_cart_item(item_id, owner.id)?.is_none() {
        return Err(ServiceError::NotFound);
    }

    let updated = repo.set_cart_item_quantity(item_id, owner.id, quantity)?;
    let totals = cart_totals(&repo.list_cart_lines(owner.id)?);

    Ok(QuantityUpdate {
        new_quantity: updated.quantity,
        total_sum: totals.subtotal,
        total_count: totals.total_count,
    })
}

/// Removes a line from the user's cart.
pub fn remove_cart_item<R>(repo: &R, user: &AuthenticatedUser, item_id: i32) -> ServiceResult<()>
where
    R: CartWriter + UserReader + UserWriter + ?Sized,
{
    let owner = ensure_user(repo, user)?;

    repo.remove_cart_item(item_id, owner.id)
        .map_err(ServiceError::from)
}
