use diesel::prelude::*;
use pushkind_common::repository::errors::{RepositoryError, RepositoryResult};

use crate::{
    domain::favorite::{Favorite as DomainFavorite, FavoriteProduct as DomainFavoriteProduct},
    models::favorite::{Favorite as DbFavorite, NewFavorite as DbNewFavorite},
    models::product::Product as DbProduct,
    repository::{DieselRepository, FavoriteReader, FavoriteWriter},
};

impl FavoriteReader for DieselRepository {
    fn list_favorites(&self, user_id: i32) -> RepositoryResult<Vec<DomainFavoriteProduct>> {
        use crate::schema::{favorites, products};

        let mut conn = self.conn()?;

        let rows = favorites::table
            .inner_join(products::table)
            .filter(favorites::user_id.eq(user_id))
            .order((favorites::created_at.desc(), favorites::id.desc()))
            .select((DbFavorite::as_select(), DbProduct::as_select()))
            .load::<(DbFavorite, DbProduct)>(&mut conn)?;

        Ok(rows.into_iter().map(DomainFavoriteProduct::from).collect())
    }
}

impl FavoriteWriter for DieselRepository {
    fn add_favorite(&self, user_id: i32, product_id: i32) -> RepositoryResult<DomainFavorite> {
        use crate::schema::favorites;

        let mut conn = self.conn()?;

        conn.transaction::<DomainFavorite, RepositoryError, _>(|conn| {
            let existing = favorites::table
                .filter(favorites::user_id.eq(user_id))
                .filter(favorites::product_id.eq(product_id))
                .first::<DbFavorite>(conn)
                .optional()?;

            if let Some(favorite) = existing {
                return Ok(favorite.into());
            }

            let created = diesel::insert_into(favorites::table)
                .values(&DbNewFavorite {
                    user_id,
                    product_id,
                })
                .get_result::<DbFavorite>(conn)?;

            Ok(created.into())
        })
    }

    fn remove_favorite(&self, favorite_id: i32, user_id: i32) -> RepositoryResult<()> {
        use crate::schema::favorites;

        let mut conn = self.conn()?;

        let deleted = diesel::delete(
            favorites::table
                .filter(favorites::id.eq(favorite_id))
                .filter(favorites::user_id.eq(user_id)),
        )
        .execute(&mut conn)?;

        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
