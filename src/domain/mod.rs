pub mod address;
pub mod cart;
pub mod category;
pub mod favorite;
pub mod order;
pub mod pricing;
pub mod product;
pub mod review;
pub mod slug;
pub mod user;
