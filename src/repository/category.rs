use chrono::Local;
use diesel::dsl::{exists, select};
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use pushkind_common::repository::errors::{RepositoryError, RepositoryResult};

use crate::domain::category::{
    Category as DomainCategory, NewCategory as DomainNewCategory,
    UpdateCategory as DomainUpdateCategory,
};
use crate::domain::slug::{base_slug, unique_slug};
use crate::models::category::{
    Category as DbCategory, NewCategory as DbNewCategory, UpdateCategory as DbUpdateCategory,
};
use crate::repository::{CategoryReader, CategoryWriter, DieselRepository};

impl CategoryReader for DieselRepository {
    fn list_categories(&self, hub_id: i32) -> RepositoryResult<Vec<DomainCategory>> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let categories = categories::table
            .filter(categories::hub_id.eq(hub_id))
            .order((categories::parent_id.asc(), categories::name.asc()))
            .load::<DbCategory>(&mut conn)?;

        Ok(categories.into_iter().map(DomainCategory::from).collect())
    }

    fn get_category_by_id(
        &self,
        category_id: i32,
        hub_id: i32,
    ) -> RepositoryResult<Option<DomainCategory>> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let category = categories::table
            .filter(categories::id.eq(category_id))
            .filter(categories::hub_id.eq(hub_id))
            .first::<DbCategory>(&mut conn)
            .optional()?;

        Ok(category.map(DomainCategory::from))
    }

    fn get_category_by_slug(
        &self,
        slug: &str,
        hub_id: i32,
    ) -> RepositoryResult<Option<DomainCategory>> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let category = categories::table
            .filter(categories::slug.eq(slug))
            .filter(categories::hub_id.eq(hub_id))
            .first::<DbCategory>(&mut conn)
            .optional()?;

        Ok(category.map(DomainCategory::from))
    }

    fn get_category_by_name(
        &self,
        name: &str,
        hub_id: i32,
    ) -> RepositoryResult<Option<DomainCategory>> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let category = categories::table
            .filter(categories::name.eq(name))
            .filter(categories::hub_id.eq(hub_id))
            .first::<DbCategory>(&mut conn)
            .optional()?;

        Ok(category.map(DomainCategory::from))
    }
}

impl CategoryWriter for DieselRepository {
    fn create_category(
        &self,
        new_category: &DomainNewCategory,
    ) -> RepositoryResult<DomainCategory> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        conn.transaction::<DomainCategory, RepositoryError, _>(|conn| {
            if let Some(parent_id) = new_category.parent_id {
                ensure_category_with_hub(conn, new_category.hub_id, parent_id)?;
            }

            let slug = assign_slug(conn, new_category.hub_id, &new_category.name, None)?;

            let insertable = DbNewCategory {
                hub_id: new_category.hub_id,
                parent_id: new_category.parent_id,
                name: new_category.name.as_str(),
                slug: slug.as_str(),
                description: new_category.description.as_deref(),
                updated_at: new_category.updated_at,
            };

            let created = diesel::insert_into(categories::table)
                .values(&insertable)
                .get_result::<DbCategory>(conn)?;

            Ok(created.into())
        })
    }

    fn update_category(
        &self,
        category_id: i32,
        hub_id: i32,
        updates: &DomainUpdateCategory,
    ) -> RepositoryResult<DomainCategory> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        conn.transaction::<DomainCategory, RepositoryError, _>(|conn| {
            let target = categories::table
                .filter(categories::id.eq(category_id))
                .filter(categories::hub_id.eq(hub_id));

            let current = categories::table
                .filter(categories::id.eq(category_id))
                .filter(categories::hub_id.eq(hub_id))
                .first::<DbCategory>(conn)
                .optional()?
                .ok_or(RepositoryError::NotFound)?;

            // The slug only moves on a rename so stored links stay valid.
            let slug = if current.name == updates.name {
                current.slug
            } else {
                assign_slug(conn, hub_id, &updates.name, Some(category_id))?
            };
            let db_updates = DbUpdateCategory::from_domain(updates, &slug);

            let updated = diesel::update(target)
                .set(&db_updates)
                .get_result::<DbCategory>(conn)?;

            Ok(updated.into())
        })
    }

    fn delete_category(&self, category_id: i32, hub_id: i32) -> RepositoryResult<()> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        // Descendants, their products and dependent rows go through ON DELETE CASCADE.
        let deleted = diesel::delete(
            categories::table
                .filter(categories::id.eq(category_id))
                .filter(categories::hub_id.eq(hub_id)),
        )
        .execute(&mut conn)?;

        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    fn assign_child_categories(
        &self,
        hub_id: i32,
        parent_id: i32,
        child_ids: &[i32],
    ) -> RepositoryResult<DomainCategory> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        conn.transaction::<DomainCategory, RepositoryError, _>(|conn| {
            ensure_category_with_hub(conn, hub_id, parent_id)?;

            let now = Local::now().naive_utc();

            diesel::update(
                categories::table
                    .filter(categories::hub_id.eq(hub_id))
                    .filter(categories::parent_id.eq(Some(parent_id))),
            )
            .set((
                categories::parent_id.eq::<Option<i32>>(None),
                categories::updated_at.eq(now),
            ))
            .execute(conn)?;

            if !child_ids.is_empty() {
                let valid_children = categories::table
                    .filter(categories::hub_id.eq(hub_id))
                    .filter(categories::id.eq_any(child_ids))
                    .select(categories::id)
                    .load::<i32>(conn)?;

                if valid_children.len() != child_ids.len() {
                    return Err(RepositoryError::NotFound);
                }

                diesel::update(
                    categories::table
                        .filter(categories::hub_id.eq(hub_id))
                        .filter(categories::id.eq_any(child_ids)),
                )
                .set((
                    categories::parent_id.eq(Some(parent_id)),
                    categories::updated_at.eq(now),
                ))
                .execute(conn)?;
            }

            let parent = diesel::update(
                categories::table
                    .filter(categories::id.eq(parent_id))
                    .filter(categories::hub_id.eq(hub_id)),
            )
            .set(categories::updated_at.eq(now))
            .get_result::<DbCategory>(conn)?;

            Ok(parent.into())
        })
    }
}

/// Pick a slug for `name` that no other category of the hub holds.
fn assign_slug(
    conn: &mut SqliteConnection,
    hub_id: i32,
    name: &str,
    exclude_id: Option<i32>,
) -> RepositoryResult<String> {
    use crate::schema::categories;

    unique_slug::<RepositoryError, _>(&base_slug(name), |candidate| {
        let holders = categories::table
            .filter(categories::hub_id.eq(hub_id))
            .filter(categories::slug.eq(candidate))
            .select(categories::id)
            .load::<i32>(conn)?;

        Ok(holders.into_iter().any(|id| Some(id) != exclude_id))
    })
}

pub(super) fn ensure_category_with_hub(
    conn: &mut SqliteConnection,
    hub_id: i32,
    category_id: i32,
) -> RepositoryResult<()> {
    use crate::schema::categories;

    let exists = select(exists(
        categories::table
            .filter(categories::id.eq(category_id))
            .filter(categories::hub_id.eq(hub_id)),
    ))
    .get_result(conn)?;

    if exists {
        Ok(())
    } else {
        Err(RepositoryError::NotFound)
    }
}
