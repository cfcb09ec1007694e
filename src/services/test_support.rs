//! Fixtures shared by the service unit tests.

use chrono::{NaiveDate, NaiveDateTime};
use pushkind_common::domain::auth::AuthenticatedUser;
use serde_json::Map;

use crate::SERVICE_MANAGER_ROLE;
use crate::domain::cart::{CartItem, CartLine};
use crate::domain::category::Category;
use crate::domain::product::Product;
use crate::domain::user::User;
use crate::repository::mock::MockRepository;

pub const HUB_ID: i32 = 9;
pub const USER_ID: i32 = 21;

pub fn fixed_datetime() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .unwrap_or_default()
}

pub fn user_with_roles(roles: &[&str]) -> AuthenticatedUser {
    AuthenticatedUser {
        sub: "user-1".to_string(),
        email: "shopper@example.com".to_string(),
        hub_id: HUB_ID,
        name: "Shopper".to_string(),
        roles: roles.iter().map(|role| (*role).to_string()).collect(),
        exp: 0,
    }
}

pub fn shopper() -> AuthenticatedUser {
    user_with_roles(&[])
}

pub fn manager() -> AuthenticatedUser {
    user_with_roles(&[SERVICE_MANAGER_ROLE])
}

pub fn stored_user() -> User {
    User {
        id: USER_ID,
        hub_id: HUB_ID,
        name: "Shopper".to_string(),
        email: "shopper@example.com".to_string(),
    }
}

/// Mock repository that already knows the shopper's local record.
pub fn repo_with_user() -> MockRepository {
    let mut repo = MockRepository::new();
    repo.expect_get_user_by_email()
        .returning(|_, _| Ok(Some(stored_user())));
    repo
}

pub fn category(id: i32, parent_id: Option<i32>, name: &str) -> Category {
    Category {
        id,
        hub_id: HUB_ID,
        parent_id,
        name: name.to_string(),
        slug: name.to_lowercase().replace(' ', "-"),
        description: None,
        created_at: fixed_datetime(),
        updated_at: fixed_datetime(),
    }
}

pub fn product(id: i32, price: i64, discount: i32, shipping_cost: i64) -> Product {
    Product {
        id,
        hub_id: HUB_ID,
        category_id: 1,
        name: format!("Product {id}"),
        price,
        discount,
        quantity: 10,
        shipping_cost,
        short_description: None,
        description: None,
        specifications: Map::new(),
        created_at: fixed_datetime(),
        updated_at: fixed_datetime(),
    }
}

pub fn cart_line(item_id: i32, product: Product, quantity: i32) -> CartLine {
    CartLine {
        item: CartItem {
            id: item_id,
            user_id: USER_ID,
            product_id: product.id,
            quantity,
            created_at: fixed_datetime(),
            updated_at: fixed_datetime(),
        },
        product,
    }
}
