use mockall::mock;

use super::{
    AddressReader, AddressWriter, CartReader, CartWriter, CategoryReader, CategoryWriter,
    FavoriteReader, FavoriteWriter, OrderReader, OrderWriter, ProductReader, ProductWriter,
    ReviewReader, ReviewWriter, UserReader, UserWriter,
};
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
use pushkind_common::repository::errors::RepositoryResult;

mock! {
    pub CategoryReader {}

    impl CategoryReader for CategoryReader {
        fn list_categories(&self, hub_id: i32) -> RepositoryResult<Vec<Category>>;
        fn get_category_by_id(&self, category_id: i32, hub_id: i32) -> RepositoryResult<Option<Category>>;
        fn get_category_by_slug(&self, slug: &str, hub_id: i32) -> RepositoryResult<Option<Category>>;
        fn get_category_by_name(&self, name: &str, hub_id: i32) -> RepositoryResult<Option<Category>>;
    }
}

mock! {
    pub CategoryWriter {}

    impl CategoryWriter for CategoryWriter {
        fn create_category(&self, new_category: &NewCategory) -> RepositoryResult<Category>;
        fn update_category(&self, category_id: i32, hub_id: i32, updates: &UpdateCategory) -> RepositoryResult<Category>;
        fn delete_category(&self, category_id: i32, hub_id: i32) -> RepositoryResult<()>;
        fn assign_child_categories(&self, hub_id: i32, parent_id: i32, child_ids: &[i32]) -> RepositoryResult<Category>;
    }
}

// A single mock for services that span several stores at once.
mock! {
    pub Repository {}

    impl CategoryReader for Repository {
        fn list_categories(&self, hub_id: i32) -> RepositoryResult<Vec<Category>>;
        fn get_category_by_id(&self, category_id: i32, hub_id: i32) -> RepositoryResult<Option<Category>>;
        fn get_category_by_slug(&self, slug: &str, hub_id: i32) -> RepositoryResult<Option<Category>>;
        fn get_category_by_name(&self, name: &str, hub_id: i32) -> RepositoryResult<Option<Category>>;
    }

    impl CategoryWriter for Repository {
        fn create_category(&self, new_category: &NewCategory) -> RepositoryResult<Category>;
        fn update_category(&self, category_id: i32, hub_id: i32, updates: &UpdateCategory) -> RepositoryResult<Category>;
        fn delete_category(&self, category_id: i32, hub_id: i32) -> RepositoryResult<()>;
        fn assign_child_categories(&self, hub_id: i32, parent_id: i32, child_ids: &[i32]) -> RepositoryResult<Category>;
    }

    impl ProductReader for Repository {
        fn get_product_by_id(&self, id: i32, hub_id: i32) -> RepositoryResult<Option<Product>>;
        fn list_products(&self, query: ProductListQuery) -> RepositoryResult<Vec<Product>>;
    }

    impl ProductWriter for Repository {
        fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product>;
        fn update_product(&self, product_id: i32, hub_id: i32, updates: &UpdateProduct) -> RepositoryResult<Product>;
        fn delete_product(&self, product_id: i32, hub_id: i32) -> RepositoryResult<()>;
    }

    impl CartReader for Repository {
        fn list_cart_lines(&self, user_id: i32) -> RepositoryResult<Vec<CartLine>>;
        fn get_cart_item(&self, item_id: i32, user_id: i32) -> RepositoryResult<Option<CartItem>>;
    }

    impl CartWriter for Repository {
        fn add_to_cart(&self, user_id: i32, product_id: i32, quantity: i32) -> RepositoryResult<CartItem>;
        fn set_cart_item_quantity(&self, item_id: i32, user_id: i32, quantity: i32) -> RepositoryResult<CartItem>;
        fn remove_cart_item(&self, item_id: i32, user_id: i32) -> RepositoryResult<()>;
    }

    impl FavoriteReader for Repository {
        fn list_favorites(&self, user_id: i32) -> RepositoryResult<Vec<FavoriteProduct>>;
    }

    impl FavoriteWriter for Repository {
        fn add_favorite(&self, user_id: i32, product_id: i32) -> RepositoryResult<Favorite>;
        fn remove_favorite(&self, favorite_id: i32, user_id: i32) -> RepositoryResult<()>;
    }

    impl AddressReader for Repository {
        fn list_addresses(&self, user_id: i32) -> RepositoryResult<Vec<Address>>;
        fn get_address(&self, address_id: i32, user_id: i32) -> RepositoryResult<Option<Address>>;
    }

    impl AddressWriter for Repository {
        fn create_address(&self, new_address: &NewAddress) -> RepositoryResult<Address>;
        fn delete_address(&self, address_id: i32, user_id: i32) -> RepositoryResult<()>;
    }

    impl OrderReader for Repository {
        fn get_order_by_id(&self, id: i32, hub_id: i32) -> RepositoryResult<Option<Order>>;
        fn list_orders(&self, query: OrderListQuery) -> RepositoryResult<Vec<Order>>;
    }

    impl OrderWriter for Repository {
        fn create_order_from_cart(&self, new_order: &NewOrder) -> RepositoryResult<Order>;
        fn update_order_status(&self, order_id: i32, hub_id: i32, status: OrderStatus) -> RepositoryResult<Order>;
    }

    impl ReviewReader for Repository {
        fn list_reviews(&self, product_id: i32) -> RepositoryResult<Vec<Review>>;
    }

    impl ReviewWriter for Repository {
        fn create_review(&self, new_review: &NewReview) -> RepositoryResult<Review>;
    }

    impl UserReader for Repository {
        fn get_user_by_email(&self, email: &str, hub_id: i32) -> RepositoryResult<Option<User>>;
    }

    impl UserWriter for Repository {
        fn create_user(&self, new_user: &NewUser) -> RepositoryResult<User>;
    }
}
