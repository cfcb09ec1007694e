use chrono::Local;
use diesel::prelude::*;
use pushkind_common::repository::errors::{RepositoryError, RepositoryResult};

use crate::{
    domain::cart::{CartItem as DomainCartItem, CartLine as DomainCartLine},
    models::cart::{CartItem as DbCartItem, NewCartItem as DbNewCartItem},
    models::product::Product as DbProduct,
    repository::{CartReader, CartWriter, DieselRepository},
};

impl CartReader for DieselRepository {
    fn list_cart_lines(&self, user_id: i32) -> RepositoryResult<Vec<DomainCartLine>> {
        use crate::schema::{cart_items, products};

        let mut conn = self.conn()?;

        let rows = cart_items::table
            .inner_join(products::table)
            .filter(cart_items::user_id.eq(user_id))
            .order(cart_items::id.asc())
            .select((DbCartItem::as_select(), DbProduct::as_select()))
            .load::<(DbCartItem, DbProduct)>(&mut conn)?;

        Ok(rows.into_iter().map(DomainCartLine::from).collect())
    }

    fn get_cart_item(
        &self,
        item_id: i32,
        user_id: i32,
    ) -> RepositoryResult<Option<DomainCartItem>> {
        use crate::schema::cart_items;

        let mut conn = self.conn()?;

        let item = cart_items::table
            .filter(cart_items::id.eq(item_id))
            .filter(cart_items::user_id.eq(user_id))
            .first::<DbCartItem>(&mut conn)
            .optional()?;

        Ok(item.map(DomainCartItem::from))
    }
}

impl CartWriter for DieselRepository {
    fn add_to_cart(
        &self,
        user_id: i32,
        product_id: i32,
        quantity: i32,
    ) -> RepositoryResult<DomainCartItem> {
        use crate::schema::cart_items;

        let mut conn = self.conn()?;

        conn.transaction::<DomainCartItem, RepositoryError, _>(|conn| {
            let existing = cart_items::table
                .filter(cart_items::user_id.eq(user_id))
                .filter(cart_items::product_id.eq(product_id))
                .first::<DbCartItem>(conn)
                .optional()?;

            let item = match existing {
                Some(item) => diesel::update(cart_items::table.find(item.id))
                    .set((
                        cart_items::quantity.eq(cart_items::quantity + quantity),
                        cart_items::updated_at.eq(Local::now().naive_utc()),
                    ))
                    .get_result::<DbCartItem>(conn)?,
                None => diesel::insert_into(cart_items::table)
                    .values(&DbNewCartItem {
                        user_id,
                        product_id,
                        quantity,
                    })
                    .get_result::<DbCartItem>(conn)?,
            };

            Ok(item.into())
        })
    }

    fn set_cart_item_quantity(
        &self,
        item_id: i32,
        user_id: i32,
        quantity: i32,
    ) -> RepositoryResult<DomainCartItem> {
        use crate::schema::cart_items;

        let mut conn = self.conn()?;

        let target = cart_items::table
            .filter(cart_items::id.eq(item_id))
            .filter(cart_items::user_id.eq(user_id));

        let updated = diesel::update(target)
            .set((
                cart_items::quantity.eq(quantity),
                cart_items::updated_at.eq(Local::now().naive_utc()),
            ))
            .get_result::<DbCartItem>(&mut conn)?;

        Ok(updated.into())
    }

    fn remove_cart_item(&self, item_id: i32, user_id: i32) -> RepositoryResult<()> {
        use crate::schema::cart_items;

        let mut conn = self.conn()?;

        let deleted = diesel::delete(
            cart_items::table
                .filter(cart_items::id.eq(item_id))
                .filter(cart_items::user_id.eq(user_id)),
        )
        .execute(&mut conn)?;

        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
