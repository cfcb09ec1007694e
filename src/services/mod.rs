pub use pushkind_common::services::errors::{ServiceError, ServiceResult};

pub mod addresses;
pub mod cart;
pub mod catalog;
pub mod categories;
pub mod favorites;
pub mod orders;
pub mod products;
pub mod users;

#[cfg(test)]
pub(crate) mod test_support;
