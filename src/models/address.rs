use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::address::{Address as DomainAddress, NewAddress as DomainNewAddress};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::addresses)]
pub struct Address {
    pub id: i32,
    pub user_id: i32,
    pub full_name: String,
    pub street: String,
    pub zip_code: String,
    pub city: String,
    pub phone: String,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::addresses)]
pub struct NewAddress<'a> {
    pub user_id: i32,
    pub full_name: &'a str,
    pub street: &'a str,
    pub zip_code: &'a str,
    pub city: &'a str,
    pub phone: &'a str,
}

impl From<Address> for DomainAddress {
    fn from(value: Address) -> Self {
        Self {
            id: value.id,
            user_id: value.user_id,
            full_name: value.full_name,
            street: value.street,
            zip_code: value.zip_code,
            city: value.city,
            phone: value.phone,
            created_at: value.created_at,
        }
    }
}

impl<'a> From<&'a DomainNewAddress> for NewAddress<'a> {
    fn from(value: &'a DomainNewAddress) -> Self {
        Self {
            user_id: value.user_id,
            full_name: value.full_name.as_str(),
            street: value.street.as_str(),
            zip_code: value.zip_code.as_str(),
            city: value.city.as_str(),
            phone: value.phone.as_str(),
        }
    }
}
