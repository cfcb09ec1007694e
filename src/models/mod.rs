pub mod address;
pub mod cart;
pub mod category;
pub mod favorite;
pub mod order;
pub mod product;
pub mod review;
pub mod user;
