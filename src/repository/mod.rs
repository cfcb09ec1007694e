use diesel::RunQueryDsl;
use pushkind_common::db::{DbConnection, DbPool};
use pushkind_common::repository::errors::RepositoryResult;

use crate::domain::{
    address::{Address, NewAddress},
    cart::{CartItem, CartLine},
    category::{Category, NewCategory, UpdateCategory},
    favorite::{Favorite, FavoriteProduct},
    order::{NewOrder, Order, OrderListQuery, OrderStatus},
    product::{NewProduct, Product, ProductListQuery, UpdateProduct},
    review::{NewReview, Review},
    user::{NewUser, User},
};

pub mod address;
pub mod cart;
pub mod category;
pub mod favorite;
pub mod order;
pub mod product;
pub mod review;
pub mod user;

#[cfg(test)]
pub mod mock;

#[derive(Clone)]
/// Diesel-backed repository implementation that wraps an r2d2 pool.
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository using the provided connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Check out a connection with foreign key enforcement switched on.
    fn conn(&self) -> RepositoryResult<DbConnection> {
        let mut conn = self.pool.get()?;
        // SQLite keeps this pragma per connection and defaults it to off.
        diesel::sql_query("PRAGMA foreign_keys = ON").execute(&mut conn)?;
        Ok(conn)
    }
}

/// Read-only operations over category records.
pub trait CategoryReader {
    fn list_categories(&self, hub_id: i32) -> RepositoryResult<Vec<Category>>;
    fn get_category_by_id(&self, category_id: i32, hub_id: i32)
    -> RepositoryResult<Option<Category>>;
    fn get_category_by_slug(&self, slug: &str, hub_id: i32) -> RepositoryResult<Option<Category>>;
    fn get_category_by_name(&self, name: &str, hub_id: i32) -> RepositoryResult<Option<Category>>;
}

/// Write operations over category records.
///
/// Implementations assign the slug from the category name on create and
/// rename.
pub trait CategoryWriter {
    fn create_category(&self, new_category: &NewCategory) -> RepositoryResult<Category>;
    fn update_category(
        &self,
        category_id: i32,
        hub_id: i32,
        updates: &UpdateCategory,
    ) -> RepositoryResult<Category>;
    fn delete_category(&self, category_id: i32, hub_id: i32) -> RepositoryResult<()>;
    fn assign_child_categories(
        &self,
        hub_id: i32,
        parent_id: i32,
        child_ids: &[i32],
    ) -> RepositoryResult<Category>;
}

/// Read-only operations over product records.
pub trait ProductReader {
    fn get_product_by_id(&self, id: i32, hub_id: i32) -> RepositoryResult<Option<Product>>;
    fn list_products(&self, query: ProductListQuery) -> RepositoryResult<Vec<Product>>;
}

/// Write operations over product records.
pub trait ProductWriter {
    fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product>;
    fn update_product(
        &self,
        product_id: i32,
        hub_id: i32,
        updates: &UpdateProduct,
    ) -> RepositoryResult<Product>;
    fn delete_product(&self, product_id: i32, hub_id: i32) -> RepositoryResult<()>;
}

/// Read-only operations over a user's cart.
pub trait CartReader {
    /// Cart lines joined with their products, oldest first.
    fn list_cart_lines(&self, user_id: i32) -> RepositoryResult<Vec<CartLine>>;
    fn get_cart_item(&self, item_id: i32, user_id: i32) -> RepositoryResult<Option<CartItem>>;
}

/// Write operations over a user's cart.
pub trait CartWriter {
    /// Insert the product or add `quantity` to the existing line.
    fn add_to_cart(
        &self,
        user_id: i32,
        product_id: i32,
        quantity: i32,
    ) -> RepositoryResult<CartItem>;
    fn set_cart_item_quantity(
        &self,
        item_id: i32,
        user_id: i32,
        quantity: i32,
    ) -> RepositoryResult<CartItem>;
    fn remove_cart_item(&self, item_id: i32, user_id: i32) -> RepositoryResult<()>;
}

/// Read-only operations over favorites.
pub trait FavoriteReader {
    fn list_favorites(&self, user_id: i32) -> RepositoryResult<Vec<FavoriteProduct>>;
}

/// Write operations over favorites.
pub trait FavoriteWriter {
    /// Returns the existing favorite when the product is already bookmarked.
    fn add_favorite(&self, user_id: i32, product_id: i32) -> RepositoryResult<Favorite>;
    fn remove_favorite(&self, favorite_id: i32, user_id: i32) -> RepositoryResult<()>;
}

/// Read-only operations over delivery addresses.
pub trait AddressReader {
    fn list_addresses(&self, user_id: i32) -> RepositoryResult<Vec<Address>>;
    fn get_address(&self, address_id: i32, user_id: i32) -> RepositoryResult<Option<Address>>;
}

/// Write operations over delivery addresses.
pub trait AddressWriter {
    fn create_address(&self, new_address: &NewAddress) -> RepositoryResult<Address>;
    fn delete_address(&self, address_id: i32, user_id: i32) -> RepositoryResult<()>;
}

/// Read-only operations over placed orders.
pub trait OrderReader {
    fn get_order_by_id(&self, id: i32, hub_id: i32) -> RepositoryResult<Option<Order>>;
    fn list_orders(&self, query: OrderListQuery) -> RepositoryResult<Vec<Order>>;
}

/// Write operations over placed orders.
pub trait OrderWriter {
    /// Snapshot the user's cart into a new order and empty the cart.
    ///
    /// Fails with `NotFound` when the cart is empty.
    fn create_order_from_cart(&self, new_order: &NewOrder) -> RepositoryResult<Order>;
    fn update_order_status(
        &self,
        order_id: i32,
        hub_id: i32,
        status: OrderStatus,
    ) -> RepositoryResult<Order>;
}

/// Read-only operations over product reviews.
pub trait ReviewReader {
    fn list_reviews(&self, product_id: i32) -> RepositoryResult<Vec<Review>>;
}

/// Write operations over product reviews.
pub trait ReviewWriter {
    fn create_review(&self, new_review: &NewReview) -> RepositoryResult<Review>;
}

/// Read-only operations over local user records.
pub trait UserReader {
    fn get_user_by_email(&self, email: &str, hub_id: i32) -> RepositoryResult<Option<User>>;
}

/// Write operations over local user records.
pub trait UserWriter {
    fn create_user(&self, new_user: &NewUser) -> RepositoryResult<User>;
}
