use std::collections::HashMap;

use chrono::Local;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use pushkind_common::repository::errors::{RepositoryError, RepositoryResult};

use crate::{
    domain::cart::CartLine as DomainCartLine,
    domain::order::{NewOrder as DomainNewOrder, Order as DomainOrder, OrderListQuery, OrderStatus},
    models::cart::CartItem as DbCartItem,
    models::order::{
        NewOrder as DbNewOrder, NewOrderItem as DbNewOrderItem, Order as DbOrder,
        OrderItem as DbOrderItem,
    },
    models::product::Product as DbProduct,
    repository::{DieselRepository, OrderReader, OrderWriter},
};

impl OrderReader for DieselRepository {
    fn get_order_by_id(&self, id: i32, hub_id: i32) -> RepositoryResult<Option<DomainOrder>> {
        use crate::schema::orders;

        let mut conn = self.conn()?;
        let order = orders::table
            .filter(orders::id.eq(id))
            .filter(orders::hub_id.eq(hub_id))
            .first::<DbOrder>(&mut conn)
            .optional()?;

        let Some(order) = order else {
            return Ok(None);
        };

        let items = load_items(&mut conn, order.id)?;

        Ok(Some(DomainOrder::from((order, items))))
    }

    fn list_orders(&self, query: OrderListQuery) -> RepositoryResult<Vec<DomainOrder>> {
        use crate::schema::{order_items, orders};

        let mut conn = self.conn()?;

        let OrderListQuery {
            hub_id,
            user_id,
            status,
        } = query;

        let mut items = orders::table
            .filter(orders::hub_id.eq(hub_id))
            .into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(user_id) = user_id {
            items = items.filter(orders::user_id.eq(user_id));
        }

        if let Some(status) = status {
            items = items.filter(orders::status.eq(status.as_str()));
        }

        let db_orders = items
            .order((orders::created_at.desc(), orders::id.desc()))
            .load::<DbOrder>(&mut conn)?;
        if db_orders.is_empty() {
            return Ok(Vec::new());
        }

        let order_ids: Vec<i32> = db_orders.iter().map(|order| order.id).collect();

        let mut items_by_order: HashMap<i32, Vec<DbOrderItem>> = HashMap::new();

        let rows = order_items::table
            .filter(order_items::order_id.eq_any(&order_ids))
            .order(order_items::id.asc())
            .load::<DbOrderItem>(&mut conn)?;

        for item in rows {
            items_by_order.entry(item.order_id).or_default().push(item);
        }

        let orders = db_orders
            .into_iter()
            .map(|order| {
                let items = items_by_order.remove(&order.id).unwrap_or_default();
                DomainOrder::from((order, items))
            })
            .collect();

        Ok(orders)
    }
}

impl OrderWriter for DieselRepository {
    fn create_order_from_cart(&self, new_order: &DomainNewOrder) -> RepositoryResult<DomainOrder> {
        use crate::schema::{cart_items, order_items, orders, products};

        let mut conn = self.conn()?;

        conn.transaction::<DomainOrder, RepositoryError, _>(|conn| {
            let lines: Vec<DomainCartLine> = cart_items::table
                .inner_join(products::table)
                .filter(cart_items::user_id.eq(new_order.user_id))
                .filter(products::hub_id.eq(new_order.hub_id))
                .order(cart_items::id.asc())
                .select((DbCartItem::as_select(), DbProduct::as_select()))
                .load::<(DbCartItem, DbProduct)>(conn)?
                .into_iter()
                .map(DomainCartLine::from)
                .collect();

            if lines.is_empty() {
                return Err(RepositoryError::NotFound);
            }

            let created = diesel::insert_into(orders::table)
                .values(&DbNewOrder::from(new_order))
                .get_result::<DbOrder>(conn)?;

            let payload: Vec<DbNewOrderItem> = lines
                .iter()
                .map(|line| DbNewOrderItem::from_cart_line(created.id, line))
                .collect();

            diesel::insert_into(order_items::table)
                .values(&payload)
                .execute(conn)?;

            let ordered_ids: Vec<i32> = lines.iter().map(|line| line.item.id).collect();
            diesel::delete(cart_items::table.filter(cart_items::id.eq_any(&ordered_ids)))
                .execute(conn)?;

            let items = load_items(conn, created.id)?;

            Ok(DomainOrder::from((created, items)))
        })
    }

    fn update_order_status(
        &self,
        order_id: i32,
        hub_id: i32,
        status: OrderStatus,
    ) -> RepositoryResult<DomainOrder> {
        use crate::schema::orders;

        let mut conn = self.conn()?;

        conn.transaction::<DomainOrder, RepositoryError, _>(|conn| {
            let target = orders::table
                .filter(orders::id.eq(order_id))
                .filter(orders::hub_id.eq(hub_id));

            let updated = diesel::update(target)
                .set((
                    orders::status.eq(status.as_str()),
                    orders::updated_at.eq(Local::now().naive_utc()),
                ))
                .get_result::<DbOrder>(conn)?;

            let items = load_items(conn, updated.id)?;

            Ok(DomainOrder::from((updated, items)))
        })
    }
}

fn load_items(conn: &mut SqliteConnection, order_id: i32) -> RepositoryResult<Vec<DbOrderItem>> {
    use crate::schema::order_items;

    let items = order_items::table
        .filter(order_items::order_id.eq(order_id))
        .order(order_items::id.asc())
        .load::<DbOrderItem>(conn)?;

    Ok(items)
}
