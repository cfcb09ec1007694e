use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::product::Product;

/// A product bookmarked by a user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Favorite {
    pub id: i32,
    pub user_id: i32,
    pub product_id: i32,
    pub created_at: NaiveDateTime,
}

/// Favorite joined with its product.
#[derive(Debug, Clone, PartialEq)]
pub struct FavoriteProduct {
    pub favorite: Favorite,
    pub product: Product,
}
