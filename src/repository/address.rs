use diesel::prelude::*;
use pushkind_common::repository::errors::{RepositoryError, RepositoryResult};

use crate::{
    domain::address::{Address as DomainAddress, NewAddress as DomainNewAddress},
    models::address::{Address as DbAddress, NewAddress as DbNewAddress},
    repository::{AddressReader, AddressWriter, DieselRepository},
};

impl AddressReader for DieselRepository {
    fn list_addresses(&self, user_id: i32) -> RepositoryResult<Vec<DomainAddress>> {
        use crate::schema::addresses;

        let mut conn = self.conn()?;

        let rows = addresses::table
            .filter(addresses::user_id.eq(user_id))
            .order(addresses::id.asc())
            .load::<DbAddress>(&mut conn)?;

        Ok(rows.into_iter().map(DomainAddress::from).collect())
    }

    fn get_address(
        &self,
        address_id: i32,
        user_id: i32,
    ) -> RepositoryResult<Option<DomainAddress>> {
        use crate::schema::addresses;

        let mut conn = self.conn()?;

        let address = addresses::table
            .filter(addresses::id.eq(address_id))
            .filter(addresses::user_id.eq(user_id))
            .first::<DbAddress>(&mut conn)
            .optional()?;

        Ok(address.map(DomainAddress::from))
    }
}

impl AddressWriter for DieselRepository {
    fn create_address(&self, new_address: &DomainNewAddress) -> RepositoryResult<DomainAddress> {
        use crate::schema::addresses;

        let mut conn = self.conn()?;

        let created = diesel::insert_into(addresses::table)
            .values(&DbNewAddress::from(new_address))
            .get_result::<DbAddress>(&mut conn)?;

        Ok(created.into())
    }

    fn delete_address(&self, address_id: i32, user_id: i32) -> RepositoryResult<()> {
        use crate::schema::addresses;

        let mut conn = self.conn()?;

        let deleted = diesel::delete(
            addresses::table
                .filter(addresses::id.eq(address_id))
                .filter(addresses::user_id.eq(user_id)),
        )
        .execute(&mut conn)?;

        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
