use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Delivery address saved by a user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
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

/// Payload required to store a new address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAddress {
    pub user_id: i32,
    pub full_name: String,
    pub street: String,
    pub zip_code: String,
    pub city: String,
    pub phone: String,
}
