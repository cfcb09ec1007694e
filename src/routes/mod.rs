pub mod addresses;
pub mod api;
pub mod cart;
pub mod categories;
pub mod favorites;
pub mod main;
pub mod orders;
pub mod products;
