use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::favorite::{Favorite as DomainFavorite, FavoriteProduct as DomainFavoriteProduct};
use crate::models::product::Product;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(table_name = crate::schema::favorites)]
#[diesel(belongs_to(Product, foreign_key = product_id))]
pub struct Favorite {
    pub id: i32,
    pub user_id: i32,
    pub product_id: i32,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::favorites)]
pub struct NewFavorite {
    pub user_id: i32,
    pub product_id: i32,
}

impl From<Favorite> for DomainFavorite {
    fn from(value: Favorite) -> Self {
        Self {
            id: value.id,
            user_id: value.user_id,
            product_id: value.product_id,
            created_at: value.created_at,
        }
    }
}

impl From<(Favorite, Product)> for DomainFavoriteProduct {
    fn from((favorite, product): (Favorite, Product)) -> Self {
        Self {
            favorite: favorite.into(),
            product: product.into(),
        }
    }
}
